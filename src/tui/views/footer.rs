//! Footer view rendering

use crate::tui::keybindings::get_navigation_commands;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// What the footer line should show, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterContent<'a> {
    /// Operation result or notice: (message, is_error)
    Status(&'a str, bool),
    /// Last fetch failed; rows on screen are from an earlier fetch
    FetchError(&'a str),
    /// Key hints
    Hints { read_only: bool },
}

/// Build the footer line
pub fn footer_line<'a>(content: FooterContent<'a>, theme: &Theme) -> Line<'a> {
    match content {
        FooterContent::Status(message, is_error) => {
            let style = if is_error {
                theme.operation_error_style()
            } else {
                theme.operation_success_style()
            };
            Line::from(vec![
                Span::styled(message, style),
                Span::styled("  (Esc to dismiss)", Style::default().fg(theme.text_secondary)),
            ])
        }
        FooterContent::FetchError(error) => Line::from(vec![
            Span::styled("Fetch failed: ", theme.status_error_style()),
            Span::styled(error, theme.status_error_style()),
            Span::styled(
                "  (showing last known data, ^R to retry)",
                Style::default().fg(theme.text_secondary),
            ),
        ]),
        FooterContent::Hints { read_only } => {
            let mut spans = Vec::new();
            for cmd in get_navigation_commands(read_only) {
                if !spans.is_empty() {
                    spans.push(Span::raw("  "));
                }
                spans.push(Span::styled(format!("<{}>", cmd.key), theme.footer_key_style()));
                spans.push(Span::raw(format!(" {}", cmd.label)));
            }
            Line::from(spans)
        }
    }
}

/// Render the footer
pub fn render_footer(f: &mut Frame, area: Rect, content: FooterContent<'_>, theme: &Theme) {
    let paragraph = Paragraph::new(footer_line(content, theme)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.text_label)),
    );
    f.render_widget(paragraph, area);
}

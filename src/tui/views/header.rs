//! Header view rendering

use crate::models::FluxResourceKind;
use crate::tui::app::state::Selection;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::helpers::create_themed_block;

/// Everything the header shows
pub struct HeaderInfo<'a> {
    pub context: &'a str,
    pub selection: &'a Selection,
    pub count: usize,
    pub loading: bool,
    pub read_only: bool,
    pub no_icons: bool,
}

/// Build the single header line: context, namespace, kind tabs, count and flags
pub fn header_line<'a>(info: &HeaderInfo<'a>, theme: &Theme) -> Line<'a> {
    let label = Style::default().fg(theme.text_label);
    let mut spans = vec![
        Span::styled("Context: ", label),
        Span::styled(info.context, theme.header_context_style()),
        Span::raw("  "),
        Span::styled("Namespace: ", label),
        Span::styled(
            info.selection.namespace_display().to_string(),
            theme.header_namespace_style(info.selection.is_all_namespaces()),
        ),
        Span::raw("  "),
    ];

    for (i, kind) in FluxResourceKind::all().iter().enumerate() {
        let active = *kind == info.selection.kind;
        spans.push(Span::styled(
            format!("{}:{}", i + 1, kind),
            theme.header_kind_style(active),
        ));
        spans.push(Span::raw(" "));
    }

    spans.push(Span::styled(
        format!(" [{}]", info.count),
        Style::default().fg(theme.text_secondary),
    ));

    if info.loading {
        let indicator = if info.no_icons { " [...]" } else { " ⟳" };
        spans.push(Span::styled(indicator, theme.status_pending_style()));
    }

    if info.read_only {
        let text = if info.no_icons {
            "  [READ-ONLY]"
        } else {
            "  🔒 READ-ONLY"
        };
        spans.push(Span::styled(
            text,
            Style::default().fg(theme.header_read_only),
        ));
    }

    Line::from(spans)
}

/// Render the header
pub fn render_header(f: &mut Frame, area: Rect, info: &HeaderInfo<'_>, theme: &Theme) {
    let paragraph =
        Paragraph::new(header_line(info, theme)).block(create_themed_block("fluxcli", theme));
    f.render_widget(paragraph, area);
}

//! Common helper functions for view rendering
//!
//! Pure formatting utilities plus a few reusable widgets.

use crate::tui::theme::Theme;
use chrono::Duration;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

/// Marker appended to truncated cell text
pub const ELLIPSIS: &str = "…";

/// Format an age as "{n}s", "{n}m", "{n}h" or "{n}d"
///
/// `n` is the truncated count at the largest unit that fits. Negative ages
/// (clock skew) render as "0s".
pub fn format_age(age: Duration) -> String {
    let secs = age.num_seconds().max(0);
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86_400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86_400)
    }
}

/// Truncate text longer than `max_chars` to its first `keep_chars` plus "…"
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize, keep_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let kept: String = text.chars().take(keep_chars).collect();
        format!("{}{}", kept, ELLIPSIS)
    } else {
        text.to_string()
    }
}

/// Render an empty state message
///
/// Shows a consistent empty state message across all views.
pub fn render_empty_state(
    f: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    instructions: &str,
    theme: &Theme,
) {
    let text = vec![
        Line::from(message),
        Line::from(""),
        Line::from(instructions),
    ];
    let paragraph = Paragraph::new(text)
        .block(create_themed_block(title, theme))
        .style(Style::default().fg(theme.text_secondary));
    f.render_widget(paragraph, area);
}

/// Create a block with title and borders using theme
pub fn create_themed_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.text_label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_age_unit_boundaries() {
        assert_eq!(format_age(Duration::seconds(0)), "0s");
        assert_eq!(format_age(Duration::seconds(59)), "59s");
        assert_eq!(format_age(Duration::seconds(60)), "1m");
        assert_eq!(format_age(Duration::seconds(3599)), "59m");
        assert_eq!(format_age(Duration::seconds(3600)), "1h");
        assert_eq!(format_age(Duration::seconds(86_399)), "23h");
        assert_eq!(format_age(Duration::seconds(86_400)), "1d");
    }

    #[test]
    fn test_format_age_negative_is_zero() {
        assert_eq!(format_age(Duration::seconds(-30)), "0s");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate_with_ellipsis("ÄÖÜäöüßÄÖÜäöü", 12, 9), "ÄÖÜäöüßÄÖ…");
        assert_eq!(truncate_with_ellipsis("short", 12, 9), "short");
    }
}

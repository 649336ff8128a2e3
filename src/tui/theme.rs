//! Theme and styling definitions
//!
//! This module provides a centralized place for all color and style definitions.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
pub struct Theme {
    // Header colors
    pub header_context: Color,
    pub header_namespace: Color,
    pub header_namespace_all: Color,
    pub header_kind_active: Color,
    pub header_kind_inactive: Color,
    pub header_read_only: Color,

    // Status colors
    pub status_ready: Color,
    pub status_suspended: Color,
    pub status_error: Color,
    pub status_pending: Color,

    // Table colors
    pub table_header: Color,
    pub table_selected: Color,
    pub table_selected_bg: Color,

    // Text colors
    pub text_secondary: Color,
    pub text_label: Color,

    // Operation colors
    pub operation_success: Color,
    pub operation_error: Color,

    // Footer colors
    pub footer_key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Header colors
            header_context: Color::Yellow,
            header_namespace: Color::Yellow,
            header_namespace_all: Color::Green,
            header_kind_active: Color::Cyan,
            header_kind_inactive: Color::DarkGray,
            header_read_only: Color::Magenta,

            // Status colors
            status_ready: Color::Green,
            status_suspended: Color::Gray,
            status_error: Color::Red,
            status_pending: Color::Yellow,

            // Table colors
            table_header: Color::Cyan,
            table_selected: Color::Blue,
            table_selected_bg: Color::DarkGray,

            // Text colors
            text_secondary: Color::Gray,
            text_label: Color::Cyan,

            // Operation colors
            operation_success: Color::Green,
            operation_error: Color::Red,

            // Footer colors
            footer_key: Color::Yellow,
        }
    }
}

impl Theme {
    pub fn header_context_style(&self) -> Style {
        Style::default()
            .fg(self.header_context)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header_namespace_style(&self, is_all: bool) -> Style {
        Style::default()
            .fg(if is_all {
                self.header_namespace_all
            } else {
                self.header_namespace
            })
            .add_modifier(Modifier::BOLD)
    }

    pub fn header_kind_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.header_kind_active)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(self.header_kind_inactive)
        }
    }

    pub fn table_header_style(&self) -> Style {
        Style::default()
            .fg(self.table_header)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_ready_style(&self) -> Style {
        Style::default().fg(self.status_ready)
    }

    pub fn status_error_style(&self) -> Style {
        Style::default().fg(self.status_error)
    }

    pub fn status_suspended_style(&self) -> Style {
        Style::default().fg(self.status_suspended)
    }

    pub fn status_pending_style(&self) -> Style {
        Style::default().fg(self.status_pending)
    }

    pub fn table_selected_style(&self) -> Style {
        Style::default()
            .fg(self.table_selected)
            .bg(self.table_selected_bg)
    }

    pub fn footer_key_style(&self) -> Style {
        Style::default().fg(self.footer_key)
    }

    pub fn operation_success_style(&self) -> Style {
        Style::default()
            .fg(self.operation_success)
            .add_modifier(Modifier::BOLD)
    }

    pub fn operation_error_style(&self) -> Style {
        Style::default()
            .fg(self.operation_error)
            .add_modifier(Modifier::BOLD)
    }
}

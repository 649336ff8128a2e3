//! Rendering logic for the application
//!
//! Splits the screen into header, table and footer and keeps the table's
//! layout in step with the terminal size.

use super::core::App;
use crate::tui::constants::{FOOTER_HEIGHT, HEADER_HEIGHT};
use crate::tui::views::{self, FooterContent, HeaderInfo};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

impl App {
    /// Main render entry point
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(f.area());

        // Only resize the table when its area changes
        let table_size = (chunks[1].width, chunks[1].height);
        if self.ui_state.cached_table_size != Some(table_size) {
            tracing::trace!("Table area resized to {:?}", table_size);
            self.ui_state.cached_table_size = Some(table_size);
            self.table.resize(table_size.0, table_size.1);
        }

        let header = HeaderInfo {
            context: &self.context,
            selection: &self.selection,
            count: self.table.resources().len(),
            loading: self.is_loading(),
            read_only: self.settings.read_only,
            no_icons: self.settings.no_icons,
        };
        views::render_header(f, chunks[0], &header, &self.theme);

        views::render_resource_table(f, chunks[1], &self.table, &self.theme);

        let footer = if let Some((message, is_error)) = &self.ui_state.status_message {
            FooterContent::Status(message, *is_error)
        } else if let Some(error) = &self.fetch_state.last_error {
            FooterContent::FetchError(error)
        } else {
            FooterContent::Hints {
                read_only: self.settings.read_only,
            }
        };
        views::render_footer(f, chunks[2], footer, &self.theme);
    }
}

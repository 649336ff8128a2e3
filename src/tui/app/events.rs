//! Event handling for the application
//!
//! Global keys (quit, kind and namespace switching, refresh, operations) are
//! handled here; everything else goes to the table.

use super::core::App;
use crate::models::FluxResourceKind;
use crate::tui::table::TableAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

impl App {
    /// Main keyboard event handler
    ///
    /// Returns true when the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Esc dismisses status messages and the fetch error
        if key.code == KeyCode::Esc {
            self.ui_state.clear_status();
            self.fetch_state.last_error = None;
            return false;
        }

        match key.code {
            KeyCode::Char('c') if ctrl => return true,
            KeyCode::Char('q') if !ctrl => return true,
            KeyCode::Char('r') if ctrl => {
                tracing::debug!("Manual refresh");
                self.force_refresh();
                return false;
            }
            KeyCode::Tab => {
                self.set_kind(self.selection.kind.next());
                return false;
            }
            KeyCode::BackTab => {
                self.set_kind(self.selection.kind.previous());
                return false;
            }
            KeyCode::Char(c @ '1'..='9') if !ctrl => {
                let index = c as usize - '1' as usize;
                if let Some(kind) = FluxResourceKind::all().get(index) {
                    self.set_kind(*kind);
                }
                return false;
            }
            KeyCode::Char('a') if !ctrl => {
                self.toggle_all_namespaces();
                return false;
            }
            KeyCode::Char(c @ ('s' | 'r' | 'R')) if !ctrl => {
                self.request_operation(c);
                return false;
            }
            _ => {}
        }

        match self.table.handle_key(key) {
            TableAction::Reserved => {
                tracing::trace!("Selection key {:?} has no action yet", key.code);
            }
            TableAction::Moved | TableAction::Unchanged | TableAction::Unhandled => {}
        }
        false
    }
}

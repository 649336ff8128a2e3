//! Application state structures
//!
//! This module contains state sub-structures that organize the App's fields
//! into logical groupings for better maintainability and testability.

use crate::config::Config;
use crate::models::{FluxResourceKind, Resource};
use crate::sync::SyncError;
use crate::tui::constants::STATUS_MESSAGE_TIMEOUT_SECS;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// What the table is currently showing: one kind in one namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub kind: FluxResourceKind,
    /// Empty for all namespaces
    pub namespace: String,
}

impl Selection {
    pub fn new(kind: FluxResourceKind, namespace: impl Into<String>) -> Self {
        Self {
            kind,
            namespace: namespace.into(),
        }
    }

    pub fn is_all_namespaces(&self) -> bool {
        self.namespace.is_empty()
    }

    /// Namespace label for display
    pub fn namespace_display(&self) -> &str {
        if self.is_all_namespaces() {
            "all"
        } else {
            &self.namespace
        }
    }
}

/// Completion messages delivered from background tasks
#[derive(Debug)]
pub enum AppMessage {
    /// A list call finished for `selection`
    ResourcesFetched {
        selection: Selection,
        result: Result<Vec<Resource>, SyncError>,
    },
    /// A suspend/resume/reconcile finished
    OperationFinished {
        operation: &'static str,
        result: Result<String, SyncError>,
    },
}

/// Settings resolved from configuration and flags
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub read_only: bool,
    pub kind: FluxResourceKind,
    /// Empty for all namespaces
    pub namespace: String,
    /// None disables background refresh
    pub refresh_interval: Option<Duration>,
    pub show_namespace: bool,
    pub columns_name: u16,
    pub columns_status: u16,
    pub no_icons: bool,
}

impl From<&Config> for AppSettings {
    fn from(config: &Config) -> Self {
        Self {
            read_only: config.read_only,
            kind: config.kind().unwrap_or(FluxResourceKind::Kustomization),
            namespace: config.namespace().to_string(),
            refresh_interval: (config.refresh_interval_secs > 0)
                .then(|| Duration::from_secs(config.refresh_interval_secs)),
            show_namespace: config.ui.show_namespace,
            columns_name: config.ui.columns_name,
            columns_status: config.ui.columns_status,
            no_icons: config.ui.no_icons,
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// A fetch task still running for a selection
#[derive(Debug)]
pub struct InFlightFetch {
    pub selection: Selection,
    pub handle: JoinHandle<()>,
}

/// Fetch bookkeeping
#[derive(Debug, Default)]
pub struct FetchState {
    pub in_flight: Option<InFlightFetch>,
    /// When the last fetch was started, for periodic refresh
    pub last_started: Option<Instant>,
    /// Error of the most recent fetch, cleared by the next successful one
    pub last_error: Option<String>,
}

impl FetchState {
    /// Whether a fetch for exactly this selection is still running
    pub fn is_fetching(&self, selection: &Selection) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|f| &f.selection == selection && !f.handle.is_finished())
    }
}

/// Operation in progress against one resource
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingOperation {
    pub operation: &'static str,
    pub target: String,
}

/// UI-related state (status messages, layout cache)
#[derive(Debug, Default)]
pub struct UIState {
    /// Status message to display (message, is_error)
    pub status_message: Option<(String, bool)>,
    /// When status message was set (for auto-clearing)
    pub status_message_time: Option<Instant>,
    /// Last table area size passed to the table, to detect resizes
    pub cached_table_size: Option<(u16, u16)>,
}

impl UIState {
    pub fn set_status(&mut self, message: String, is_error: bool) {
        self.status_message = Some((message, is_error));
        self.status_message_time = Some(Instant::now());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
        self.status_message_time = None;
    }

    /// Clear non-error messages once they have been shown long enough
    pub fn expire_status(&mut self) {
        let expired = self.status_message_time.is_some_and(|t| {
            t.elapsed() >= Duration::from_secs(STATUS_MESSAGE_TIMEOUT_SECS)
        });
        if expired && matches!(self.status_message, Some((_, false))) {
            self.clear_status();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_config() {
        let config = Config {
            default_namespace: "all".to_string(),
            default_kind: "gitrepo".to_string(),
            refresh_interval_secs: 0,
            ..Config::default()
        };
        let settings = AppSettings::from(&config);
        assert_eq!(settings.namespace, "");
        assert_eq!(settings.kind, FluxResourceKind::GitRepository);
        assert_eq!(settings.refresh_interval, None);
    }

    #[test]
    fn test_unknown_kind_falls_back_to_kustomization() {
        let config = Config {
            default_kind: "Bucket".to_string(),
            ..Config::default()
        };
        assert_eq!(
            AppSettings::from(&config).kind,
            FluxResourceKind::Kustomization
        );
    }

    #[test]
    fn test_selection_display() {
        assert_eq!(
            Selection::new(FluxResourceKind::HelmRelease, "").namespace_display(),
            "all"
        );
        assert_eq!(
            Selection::new(FluxResourceKind::HelmRelease, "apps").namespace_display(),
            "apps"
        );
    }

    #[test]
    fn test_error_status_does_not_expire() {
        let mut ui = UIState::default();
        ui.set_status("boom".to_string(), true);
        ui.status_message_time = Some(Instant::now() - Duration::from_secs(60));
        ui.expire_status();
        assert!(ui.status_message.is_some());

        ui.set_status("done".to_string(), false);
        ui.status_message_time = Some(Instant::now() - Duration::from_secs(60));
        ui.expire_status();
        assert!(ui.status_message.is_none());
    }
}

//! Application state and main TUI logic

use super::state::{AppMessage, AppSettings, FetchState, PendingOperation, Selection, UIState};
use crate::models::FluxResourceKind;
use crate::sync::ResourceSync;
use crate::tui::constants::FALLBACK_NAMESPACE;
use crate::tui::table::ResourceTable;
use crate::tui::{OperationRegistry, Theme};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Main application state
pub struct App {
    // Core data
    pub(crate) sync: Arc<ResourceSync>,
    pub(crate) settings: AppSettings,
    pub(crate) theme: Theme,
    pub(crate) context: String,

    // Organized state
    pub(crate) table: ResourceTable,
    pub(crate) selection: Selection,
    /// Namespace the `a` toggle returns to
    pub(crate) home_namespace: String,
    pub(crate) fetch_state: FetchState,
    pub(crate) ui_state: UIState,
    pub(crate) pending_operation: Option<PendingOperation>,

    // Services & infrastructure
    pub(crate) operation_registry: OperationRegistry,
    pub(crate) tx: mpsc::UnboundedSender<AppMessage>,
    pub(crate) rx: mpsc::UnboundedReceiver<AppMessage>,
}

impl App {
    pub fn new(sync: Arc<ResourceSync>, context: String, settings: AppSettings) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let table = ResourceTable::new(settings.kind).with_options(
            settings.show_namespace,
            settings.columns_name,
            settings.columns_status,
        );
        let selection = Selection::new(settings.kind, settings.namespace.clone());
        let home_namespace = if settings.namespace.is_empty() {
            FALLBACK_NAMESPACE.to_string()
        } else {
            settings.namespace.clone()
        };

        Self {
            // Core data
            sync,
            settings,
            theme: Theme::default(),
            context,

            // Organized state
            table,
            selection,
            home_namespace,
            fetch_state: FetchState::default(),
            ui_state: UIState::default(),
            pending_operation: None,

            // Services & infrastructure
            operation_registry: OperationRegistry::new(),
            tx,
            rx,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn table(&self) -> &ResourceTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut ResourceTable {
        &mut self.table
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn status_message(&self) -> Option<&(String, bool)> {
        self.ui_state.status_message.as_ref()
    }

    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_state.last_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.fetch_state.is_fetching(&self.selection)
    }

    pub fn pending_operation(&self) -> Option<&PendingOperation> {
        self.pending_operation.as_ref()
    }

    /// Switch the displayed kind and fetch it
    pub fn set_kind(&mut self, kind: FluxResourceKind) {
        if kind == self.selection.kind {
            return;
        }
        tracing::debug!("Switching kind to {}", kind);
        self.selection.kind = kind;
        self.table.set_resource_kind(kind);
        self.table.set_resources(Vec::new());
        self.fetch_state.last_error = None;
        self.request_fetch();
    }

    /// Switch the namespace ("" for all) and fetch it
    pub fn set_namespace(&mut self, namespace: impl Into<String>) {
        let namespace = namespace.into();
        if namespace == self.selection.namespace {
            return;
        }
        tracing::debug!("Switching namespace to '{}'", namespace);
        if !namespace.is_empty() {
            self.home_namespace = namespace.clone();
        }
        self.selection.namespace = namespace;
        self.table.set_resources(Vec::new());
        self.fetch_state.last_error = None;
        self.request_fetch();
    }

    /// Toggle between all namespaces and the last single namespace
    pub fn toggle_all_namespaces(&mut self) {
        let target = if self.selection.is_all_namespaces() {
            self.home_namespace.clone()
        } else {
            String::new()
        };
        self.set_namespace(target);
    }
}

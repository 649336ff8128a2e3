//! Async operation management
//!
//! This module handles the background fetches and resource operations and
//! applies their results when they come back over the message channel.

use super::core::App;
use super::state::{AppMessage, InFlightFetch, PendingOperation};
use std::sync::Arc;
use std::time::Instant;

impl App {
    /// Start a fetch for the current selection
    ///
    /// A fetch already running for the same selection is left alone; one for a
    /// different selection is aborted, and if its result still arrives it is
    /// dropped as stale.
    pub fn request_fetch(&mut self) {
        if self.fetch_state.is_fetching(&self.selection) {
            tracing::trace!("Fetch for {:?} already running", self.selection);
            return;
        }
        if let Some(previous) = self.fetch_state.in_flight.take()
            && !previous.handle.is_finished()
        {
            tracing::debug!("Aborting superseded fetch for {:?}", previous.selection);
            previous.handle.abort();
        }

        let selection = self.selection.clone();
        let sync = Arc::clone(&self.sync);
        let tx = self.tx.clone();
        let task_selection = selection.clone();
        let handle = tokio::spawn(async move {
            let result = sync
                .list(task_selection.kind, &task_selection.namespace)
                .await;
            if tx
                .send(AppMessage::ResourcesFetched {
                    selection: task_selection,
                    result,
                })
                .is_err()
            {
                tracing::debug!("App closed before fetch result was delivered");
            }
        });

        self.fetch_state.in_flight = Some(InFlightFetch { selection, handle });
        self.fetch_state.last_started = Some(Instant::now());
    }

    /// Restart the fetch for the current selection even if one is running
    ///
    /// Used after a mutation, where a fetch started earlier may predate it.
    pub fn force_refresh(&mut self) {
        if let Some(previous) = self.fetch_state.in_flight.take() {
            previous.handle.abort();
        }
        self.request_fetch();
    }

    /// Run the operation bound to `key` against the selected row
    pub fn request_operation(&mut self, key: char) {
        let Some(operation) = self.operation_registry.get_by_keybinding(key) else {
            return;
        };

        if self.settings.read_only {
            self.ui_state.set_status(
                format!("{} not allowed: read-only mode", operation.name()),
                true,
            );
            return;
        }

        let Some(resource) = self.table.selected().cloned() else {
            return;
        };

        if let Some(pending) = &self.pending_operation {
            self.ui_state.set_status(
                format!("{} of {} still in progress", pending.operation, pending.target),
                true,
            );
            return;
        }

        let target = format!("{}/{}", resource.namespace, resource.name);
        tracing::info!("Running {} on {} {}", operation.name(), resource.kind, target);
        self.pending_operation = Some(PendingOperation {
            operation: operation.name(),
            target,
        });

        let sync = Arc::clone(&self.sync);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = operation
                .execute(&sync, &resource)
                .await
                .map(|()| operation.success_message(&resource));
            if tx
                .send(AppMessage::OperationFinished {
                    operation: operation.name(),
                    result,
                })
                .is_err()
            {
                tracing::debug!("App closed before {} result was delivered", operation.name());
            }
        });
    }

    /// Apply every message that has arrived since the last call
    pub fn drain_messages(&mut self) {
        while let Ok(message) = self.rx.try_recv() {
            self.handle_message(message);
        }
    }

    /// Apply one completion message
    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::ResourcesFetched { selection, result } => {
                if selection != self.selection {
                    tracing::warn!(
                        "Discarding stale result for {} in '{}'",
                        selection.kind,
                        selection.namespace
                    );
                    return;
                }
                if self
                    .fetch_state
                    .in_flight
                    .as_ref()
                    .is_some_and(|f| f.selection == selection)
                {
                    self.fetch_state.in_flight = None;
                }
                match result {
                    Ok(resources) => {
                        tracing::debug!(
                            "Fetched {} {} resources",
                            resources.len(),
                            selection.kind
                        );
                        self.table.set_resources(resources);
                        self.fetch_state.last_error = None;
                    }
                    Err(e) => {
                        tracing::error!("Failed to fetch {}: {}", selection.kind, e);
                        self.fetch_state.last_error = Some(e.to_string());
                    }
                }
            }
            AppMessage::OperationFinished { operation, result } => {
                self.pending_operation = None;
                match result {
                    Ok(message) => {
                        tracing::info!("{}", message);
                        self.ui_state.set_status(message, false);
                        self.force_refresh();
                    }
                    Err(e) => {
                        tracing::error!("{} failed: {}", operation, e);
                        self.ui_state
                            .set_status(format!("{} failed: {}", operation, e), true);
                    }
                }
            }
        }
    }

    /// Periodic housekeeping: refresh when due and expire status messages
    pub fn tick(&mut self) {
        self.ui_state.expire_status();

        let Some(interval) = self.settings.refresh_interval else {
            return;
        };
        let due = self
            .fetch_state
            .last_started
            .is_none_or(|t| t.elapsed() >= interval);
        if due {
            self.request_fetch();
        }
    }
}

//! fluxcli library
//!
//! Core functionality of the fluxcli dashboard: the Flux resource model, the
//! sync layer that lists and mutates resources through the Kubernetes API,
//! configuration, and (with the `tui` feature) the terminal interface.

pub mod cli;
pub mod config;
pub mod kube;
pub mod models;
pub mod sync;
#[cfg(feature = "tui")]
pub mod tui;

// Re-export commonly used types for convenience
pub use models::{FluxResourceKind, Resource};
pub use sync::{ResourceSync, SyncError};

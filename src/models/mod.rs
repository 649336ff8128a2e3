//! Flux TUI Model Layer
//!
//! Structure:
//! - `flux_resource_kind.rs` - The monitored kinds and their API coordinates
//! - `resource.rs` - The normalized `Resource`/`Condition` entity model

pub mod flux_resource_kind;
pub mod resource;

pub use flux_resource_kind::{FluxResourceKind, KindVersion, ReadinessRule};
pub use resource::{Condition, READY_CONDITION, Resource};

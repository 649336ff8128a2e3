//! TUI view components
//!
//! This module contains the rendering components for the header, the
//! resource table and the footer.

mod footer;
mod header;
pub mod helpers;
mod resource_list;

pub use footer::*;
pub use header::*;
pub use helpers::{format_age, truncate_with_ellipsis};
pub use resource_list::*;

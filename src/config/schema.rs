//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use crate::models::FluxResourceKind;
use serde::{Deserialize, Serialize};

/// Namespace value meaning "every namespace"
pub const ALL_NAMESPACES: &str = "all";

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Disable suspend/resume/reconcile
    #[serde(default = "default_read_only")]
    pub read_only: bool,

    /// Starting namespace ("all" or empty for every namespace)
    #[serde(default = "default_namespace")]
    pub default_namespace: String,

    /// Kind shown on startup
    #[serde(default = "default_kind")]
    pub default_kind: String,

    /// Seconds between background refreshes, 0 disables them
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// UI configuration
    #[serde(default)]
    pub ui: UiConfig,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    /// Prefix names with their namespace
    #[serde(default = "default_false")]
    pub show_namespace: bool,

    /// Width of the Name column
    #[serde(default = "default_columns_name")]
    pub columns_name: u16,

    /// Width of the Status column
    #[serde(default = "default_columns_status")]
    pub columns_status: u16,

    /// Disable Unicode icons for compatibility
    #[serde(default = "default_false")]
    pub no_icons: bool,
}

// Default value functions
fn default_read_only() -> bool {
    true
}

fn default_namespace() -> String {
    "flux-system".to_string()
}

fn default_kind() -> String {
    FluxResourceKind::Kustomization.as_str().to_string()
}

fn default_refresh_interval_secs() -> u64 {
    5
}

fn default_false() -> bool {
    false
}

fn default_columns_name() -> u16 {
    30
}

fn default_columns_status() -> u16 {
    12
}

impl Config {
    /// Namespace to list, with "all namespaces" mapped to the empty string
    pub fn namespace(&self) -> &str {
        if self.default_namespace == ALL_NAMESPACES {
            ""
        } else {
            &self.default_namespace
        }
    }

    /// Kind to start on, if `defaultKind` names one
    pub fn kind(&self) -> Option<FluxResourceKind> {
        FluxResourceKind::from_str_case_insensitive(&self.default_kind)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            read_only: default_read_only(),
            default_namespace: default_namespace(),
            default_kind: default_kind(),
            refresh_interval_secs: default_refresh_interval_secs(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_namespace: default_false(),
            columns_name: default_columns_name(),
            columns_status: default_columns_status(),
            no_icons: default_false(),
        }
    }
}

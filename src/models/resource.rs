//! Normalized entity model shared by every resource kind
//!
//! A [`Resource`] is built once per fetch and never patched afterwards; a
//! refresh produces a brand-new sequence that replaces the previous one.

use super::FluxResourceKind;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Condition type that carries the readiness verdict
pub const READY_CONDITION: &str = "Ready";

/// A status condition exactly as reported by the cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type", default)]
    pub type_: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub message: String,
    /// `None` when absent or not an RFC3339 timestamp
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_transition_time: Option<DateTime<Utc>>,
}

/// Accept any value for a timestamp; unparseable ones become `None`
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc)))
}

impl Condition {
    pub fn is_true(&self) -> bool {
        self.status == "True"
    }
}

/// Unified representation of a monitored Flux object
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub kind: FluxResourceKind,
    pub name: String,
    pub namespace: String,

    pub ready: bool,
    pub status: String,
    pub message: String,

    /// Time since creation, computed at fetch time
    pub age: Duration,
    pub last_update: DateTime<Utc>,

    pub suspended: bool,

    pub source: Option<String>,
    pub path: Option<String>,
    pub url: Option<String>,
    pub chart: Option<String>,
    pub version: Option<String>,
    pub revision: Option<String>,

    pub conditions: Vec<Condition>,
}

impl Resource {
    /// Create a resource with identity set and every derived field empty
    pub fn new(kind: FluxResourceKind, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            namespace: namespace.into(),
            ready: false,
            status: String::new(),
            message: String::new(),
            age: Duration::zero(),
            last_update: Utc::now(),
            suspended: false,
            source: None,
            path: None,
            url: None,
            chart: None,
            version: None,
            revision: None,
            conditions: Vec::new(),
        }
    }

    /// The "Ready" condition, if the cluster reported one
    pub fn ready_condition(&self) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.type_ == READY_CONDITION)
    }

    /// Stable identity key: "kind:namespace:name"
    pub fn key(&self) -> String {
        format!("{}:{}:{}", self.kind, self.namespace, self.name)
    }
}

//! Mapping of raw Flux objects onto the normalized [`Resource`] model
//!
//! Conditions are copied verbatim; `ready`, `status` and `message` are derived
//! from them according to the version's [`ReadinessRule`].

use crate::models::{Condition, FluxResourceKind, READY_CONDITION, ReadinessRule, Resource};
use chrono::{DateTime, Duration, Utc};
use kube::core::DynamicObject;
use serde_json::Value;

/// Status label used when no condition tells us anything
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Derived readiness view over a condition list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readiness {
    pub ready: bool,
    pub status: String,
    pub message: String,
}

impl Readiness {
    fn unknown() -> Self {
        Self {
            ready: false,
            status: UNKNOWN_STATUS.to_string(),
            message: String::new(),
        }
    }
}

/// Derive ready/status/message from conditions
pub fn derive_readiness(conditions: &[Condition], rule: ReadinessRule) -> Readiness {
    match rule {
        ReadinessRule::ReadyCondition => conditions
            .iter()
            .rev()
            .find(|c| c.type_ == READY_CONDITION)
            .map(|c| Readiness {
                ready: c.is_true(),
                status: c.reason.clone(),
                message: c.message.clone(),
            })
            .unwrap_or_else(Readiness::unknown),
        // Legacy schema: the last listed condition stands in for readiness
        ReadinessRule::LastCondition => conditions
            .last()
            .map(|c| Readiness {
                ready: c.is_true(),
                status: c.status.clone(),
                message: c.message.clone(),
            })
            .unwrap_or_else(Readiness::unknown),
    }
}

/// Parse `status.conditions`, skipping entries that are not condition objects
pub fn extract_conditions(obj: &DynamicObject) -> Vec<Condition> {
    obj.data
        .get("status")
        .and_then(|s| s.get("conditions"))
        .and_then(|c| c.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match serde_json::from_value::<Condition>(item.clone()) {
                    Ok(condition) => Some(condition),
                    Err(e) => {
                        tracing::debug!("Skipping malformed condition: {}", e);
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Creation timestamp of an object, if set
pub fn creation_time(obj: &DynamicObject) -> Option<DateTime<Utc>> {
    let value = serde_json::to_value(&obj.metadata.creation_timestamp).ok()?;
    value.as_str()?.parse().ok()
}

fn str_at<'a>(value: Option<&'a Value>, path: &[&str]) -> Option<&'a str> {
    let mut current = value?;
    for segment in path {
        current = current.get(segment)?;
    }
    current.as_str()
}

fn string_at(value: Option<&Value>, path: &[&str]) -> Option<String> {
    str_at(value, path)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Build a [`Resource`] from a listed or fetched object
pub fn normalize(
    obj: &DynamicObject,
    kind: FluxResourceKind,
    rule: ReadinessRule,
    now: DateTime<Utc>,
) -> Resource {
    let mut resource = Resource::new(
        kind,
        obj.metadata.namespace.clone().unwrap_or_default(),
        obj.metadata.name.clone().unwrap_or_default(),
    );

    let spec = obj.data.get("spec");
    let status = obj.data.get("status");

    resource.last_update = now;
    resource.age = creation_time(obj)
        .map(|created| now.signed_duration_since(created))
        .filter(|age| *age > Duration::zero())
        .unwrap_or_else(Duration::zero);
    resource.suspended = spec
        .and_then(|s| s.get("suspend"))
        .and_then(Value::as_bool)
        .unwrap_or(false);

    resource.conditions = extract_conditions(obj);
    let readiness = derive_readiness(&resource.conditions, rule);
    resource.ready = readiness.ready;
    resource.status = readiness.status;
    resource.message = readiness.message;

    match kind {
        FluxResourceKind::GitRepository | FluxResourceKind::HelmRepository => {
            resource.url = string_at(spec, &["url"]);
            resource.revision = string_at(status, &["artifact", "revision"]);
        }
        FluxResourceKind::Kustomization => {
            resource.path = string_at(spec, &["path"]);
            if str_at(spec, &["sourceRef", "kind"]) == Some("GitRepository") {
                resource.source = string_at(spec, &["sourceRef", "name"]);
            }
            resource.revision = string_at(status, &["lastAppliedRevision"]);
        }
        FluxResourceKind::HelmRelease => {
            resource.chart = string_at(spec, &["chart", "spec", "chart"]);
            resource.version = string_at(spec, &["chart", "spec", "version"]);
            if str_at(spec, &["chart", "spec", "sourceRef", "kind"]) == Some("HelmRepository") {
                resource.source = string_at(spec, &["chart", "spec", "sourceRef", "name"]);
            }
            resource.revision = string_at(status, &["lastAppliedRevision"])
                .or_else(|| string_at(status, &["lastAttemptedRevision"]));
        }
    }

    resource
}

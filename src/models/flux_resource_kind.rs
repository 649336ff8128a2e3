//! Flux Resource Kind definitions
//!
//! This module provides a centralized enum for the Flux CRD kinds the dashboard
//! monitors, together with the API coordinates used to list and mutate them.
//! This eliminates hardcoded strings throughout the codebase and provides
//! type safety for resource kind references.

use kube::core::ApiResource;
use std::fmt;
use std::str::FromStr;

const SOURCE_GROUP: &str = "source.toolkit.fluxcd.io";
const KUSTOMIZE_GROUP: &str = "kustomize.toolkit.fluxcd.io";
const HELM_GROUP: &str = "helm.toolkit.fluxcd.io";

/// Enumeration of the monitored Flux CRD kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FluxResourceKind {
    // Source Controller resources
    GitRepository,
    HelmRepository,
    // Kustomize Controller resources
    Kustomization,
    // Helm Controller resources
    HelmRelease,
}

/// How `ready`/`status`/`message` are derived from a version's conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessRule {
    /// Derive from the condition of type "Ready" (status label = its reason)
    ReadyCondition,
    /// Derive from the last condition in the list (status label = its status).
    /// Only used by the legacy HelmRepository schema.
    LastCondition,
}

/// One API version under which a kind can be served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindVersion {
    pub version: &'static str,
    pub readiness: ReadinessRule,
}

impl FluxResourceKind {
    /// Get the display name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            FluxResourceKind::GitRepository => "GitRepository",
            FluxResourceKind::HelmRepository => "HelmRepository",
            FluxResourceKind::Kustomization => "Kustomization",
            FluxResourceKind::HelmRelease => "HelmRelease",
        }
    }

    /// Try to parse a string into a FluxResourceKind, returning None if invalid
    pub fn parse_optional(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Get all monitored kinds, in tab order
    pub fn all() -> &'static [Self] {
        &[
            FluxResourceKind::GitRepository,
            FluxResourceKind::HelmRepository,
            FluxResourceKind::Kustomization,
            FluxResourceKind::HelmRelease,
        ]
    }

    /// Try to parse a string (case-insensitive) into a FluxResourceKind
    pub fn from_str_case_insensitive(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gitrepository" | "gitrepo" | "gitrepositories" => {
                Some(FluxResourceKind::GitRepository)
            }
            "helmrepository" | "helmrepo" | "helmrepositories" => {
                Some(FluxResourceKind::HelmRepository)
            }
            "kustomization" | "ks" | "kustomizations" => Some(FluxResourceKind::Kustomization),
            "helmrelease" | "hr" | "helmreleases" => Some(FluxResourceKind::HelmRelease),
            _ => None,
        }
    }

    /// API group of the kind
    pub fn api_group(&self) -> &'static str {
        match self {
            FluxResourceKind::GitRepository | FluxResourceKind::HelmRepository => SOURCE_GROUP,
            FluxResourceKind::Kustomization => KUSTOMIZE_GROUP,
            FluxResourceKind::HelmRelease => HELM_GROUP,
        }
    }

    /// Plural resource name used in API paths
    pub fn plural(&self) -> &'static str {
        match self {
            FluxResourceKind::GitRepository => "gitrepositories",
            FluxResourceKind::HelmRepository => "helmrepositories",
            FluxResourceKind::Kustomization => "kustomizations",
            FluxResourceKind::HelmRelease => "helmreleases",
        }
    }

    /// Newest supported API version, tried first
    pub fn primary_version(&self) -> KindVersion {
        let version = match self {
            FluxResourceKind::GitRepository
            | FluxResourceKind::HelmRepository
            | FluxResourceKind::Kustomization => "v1",
            FluxResourceKind::HelmRelease => "v2",
        };
        KindVersion {
            version,
            readiness: ReadinessRule::ReadyCondition,
        }
    }

    /// Older API version retried when the primary one is not installed
    pub fn fallback_version(&self) -> Option<KindVersion> {
        match self {
            FluxResourceKind::HelmRepository => Some(KindVersion {
                version: "v1beta2",
                readiness: ReadinessRule::LastCondition,
            }),
            _ => None,
        }
    }

    /// Build the dynamic API descriptor for one of this kind's versions
    pub fn api_resource(&self, version: &str) -> ApiResource {
        let group = self.api_group();
        ApiResource {
            group: group.to_string(),
            version: version.to_string(),
            api_version: format!("{}/{}", group, version),
            kind: self.as_str().to_string(),
            plural: self.plural().to_string(),
        }
    }

    /// The kind after this one, wrapping around
    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|k| k == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    /// The kind before this one, wrapping around
    pub fn previous(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|k| k == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

impl fmt::Display for FluxResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<FluxResourceKind> for String {
    fn from(kind: FluxResourceKind) -> Self {
        kind.as_str().to_string()
    }
}

impl FromStr for FluxResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GitRepository" => Ok(FluxResourceKind::GitRepository),
            "HelmRepository" => Ok(FluxResourceKind::HelmRepository),
            "Kustomization" => Ok(FluxResourceKind::Kustomization),
            "HelmRelease" => Ok(FluxResourceKind::HelmRelease),
            _ => Err(format!("Unknown Flux resource kind: {}", s)),
        }
    }
}

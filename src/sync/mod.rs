//! Resource synchronization layer
//!
//! Lists Flux objects through the [`ClusterApi`] seam, retries the legacy API
//! version when a kind is not served under its primary one, and hands back
//! normalized [`Resource`] sequences. Mutations live in [`mutations`].

pub mod mutations;
pub mod normalize;

pub use mutations::RECONCILE_ANNOTATION;
pub use normalize::{Readiness, UNKNOWN_STATUS, derive_readiness, normalize};

use crate::kube::{ClusterApi, ClusterError, ErrorClass, ErrorClassifier, MessageClassifier};
use crate::models::{FluxResourceKind, KindVersion, Resource};
use chrono::Utc;
use futures::FutureExt;
use kube::core::DynamicObject;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use thiserror::Error;

/// Failure of a sync-layer call, carrying the kind/object it was about
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to list {kind} ({version}): {source}")]
    ListFailed {
        kind: FluxResourceKind,
        version: &'static str,
        #[source]
        source: ClusterError,
    },

    #[error("{kind} {namespace}/{name} not found")]
    NotFound {
        kind: FluxResourceKind,
        namespace: String,
        name: String,
    },

    #[error("failed to get {kind} {namespace}/{name}: {source}")]
    GetFailed {
        kind: FluxResourceKind,
        namespace: String,
        name: String,
        #[source]
        source: ClusterError,
    },

    #[error("failed to update {kind} {namespace}/{name}: {source}")]
    UpdateFailed {
        kind: FluxResourceKind,
        namespace: String,
        name: String,
        #[source]
        source: ClusterError,
    },

    #[error("cluster client panicked while listing {kind}: {message}")]
    ClientPanic {
        kind: FluxResourceKind,
        message: String,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl SyncError {
    /// Classification of this failure as seen by callers
    pub fn class(&self) -> ErrorClass {
        match self {
            SyncError::NotFound { .. } => ErrorClass::NotFound,
            _ => ErrorClass::Other,
        }
    }

    /// Whether an update lost a race against a concurrent modification
    pub fn is_conflict(&self) -> bool {
        matches!(self, SyncError::UpdateFailed { source, .. } if source.is_conflict())
    }
}

/// Result of one list attempt against a single API version
enum ListAttempt {
    Listed(Vec<DynamicObject>),
    KindAbsent,
}

/// Fetches and mutates Flux resources for one cluster connection
pub struct ResourceSync {
    cluster: Arc<dyn ClusterApi>,
    classifier: Box<dyn ErrorClassifier>,
}

impl ResourceSync {
    pub fn new(cluster: Arc<dyn ClusterApi>) -> Self {
        Self::with_classifier(cluster, Box::new(MessageClassifier))
    }

    pub fn with_classifier(
        cluster: Arc<dyn ClusterApi>,
        classifier: Box<dyn ErrorClassifier>,
    ) -> Self {
        Self {
            cluster,
            classifier,
        }
    }

    /// List every object of `kind` in `namespace` (empty = all namespaces)
    ///
    /// A kind that is not installed under any supported version yields an
    /// empty sequence. Order follows the API server's response.
    pub async fn list(
        &self,
        kind: FluxResourceKind,
        namespace: &str,
    ) -> Result<Vec<Resource>, SyncError> {
        let primary = kind.primary_version();
        if let ListAttempt::Listed(items) = self.list_version(kind, primary, namespace).await? {
            return Ok(Self::normalize_all(kind, primary, &items));
        }

        let Some(fallback) = kind.fallback_version() else {
            tracing::debug!("{} is not installed, returning no resources", kind);
            return Ok(Vec::new());
        };

        tracing::debug!(
            "{} {} not served, retrying with {}",
            kind,
            primary.version,
            fallback.version
        );
        match self.list_version(kind, fallback, namespace).await? {
            ListAttempt::Listed(items) => Ok(Self::normalize_all(kind, fallback, &items)),
            ListAttempt::KindAbsent => {
                tracing::debug!("{} is not installed, returning no resources", kind);
                Ok(Vec::new())
            }
        }
    }

    async fn list_version(
        &self,
        kind: FluxResourceKind,
        version: KindVersion,
        namespace: &str,
    ) -> Result<ListAttempt, SyncError> {
        let api_resource = kind.api_resource(version.version);
        let call = AssertUnwindSafe(async {
            self.cluster.list(&api_resource, namespace).await
        });

        match call.catch_unwind().await {
            Ok(Ok(items)) => Ok(ListAttempt::Listed(items)),
            Ok(Err(err)) => {
                if self.classifier.classify(&err).means_kind_absent() {
                    Ok(ListAttempt::KindAbsent)
                } else {
                    tracing::warn!("Failed to list {} {}: {}", kind, version.version, err);
                    Err(SyncError::ListFailed {
                        kind,
                        version: version.version,
                        source: err,
                    })
                }
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::warn!("Cluster client panicked listing {}: {}", kind, message);
                Err(SyncError::ClientPanic { kind, message })
            }
        }
    }

    fn normalize_all(
        kind: FluxResourceKind,
        version: KindVersion,
        items: &[DynamicObject],
    ) -> Vec<Resource> {
        let now = Utc::now();
        items
            .iter()
            .map(|obj| normalize(obj, kind, version.readiness, now))
            .collect()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kube::cluster::MockClusterApi;
    use serde_json::json;

    fn object(name: &str, namespace: &str, conditions: serde_json::Value) -> DynamicObject {
        serde_json::from_value(json!({
            "apiVersion": "source.toolkit.fluxcd.io/v1",
            "kind": "HelmRepository",
            "metadata": {"name": name, "namespace": namespace},
            "spec": {"url": "https://charts.example.com"},
            "status": {"conditions": conditions}
        }))
        .unwrap()
    }

    fn not_installed() -> ClusterError {
        ClusterError::new(
            None,
            "no matches for kind \"HelmRepository\" in version \"source.toolkit.fluxcd.io/v1\"",
        )
    }

    #[tokio::test]
    async fn test_list_preserves_server_order() {
        let mut mock = MockClusterApi::new();
        mock.expect_list().times(1).returning(|_, _| {
            Ok(vec![
                object("zeta", "a", json!([])),
                object("alpha", "b", json!([])),
                object("mid", "a", json!([])),
            ])
        });

        let sync = ResourceSync::new(Arc::new(mock));
        let resources = sync
            .list(FluxResourceKind::HelmRepository, "")
            .await
            .unwrap();
        let names: Vec<_> = resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[tokio::test]
    async fn test_helm_repository_falls_back_once_then_empty() {
        let mut mock = MockClusterApi::new();
        mock.expect_list()
            .withf(|ar, _| ar.version == "v1")
            .times(1)
            .returning(|_, _| Err(not_installed()));
        mock.expect_list()
            .withf(|ar, _| ar.version == "v1beta2")
            .times(1)
            .returning(|_, _| Err(ClusterError::not_found("the server could not find the requested resource")));

        let sync = ResourceSync::new(Arc::new(mock));
        let resources = sync
            .list(FluxResourceKind::HelmRepository, "flux-system")
            .await
            .unwrap();
        assert!(resources.is_empty());
    }

    #[tokio::test]
    async fn test_fallback_uses_last_condition_rule() {
        let mut mock = MockClusterApi::new();
        mock.expect_list()
            .withf(|ar, _| ar.version == "v1")
            .times(1)
            .returning(|_, _| Err(not_installed()));
        mock.expect_list()
            .withf(|ar, _| ar.version == "v1beta2")
            .times(1)
            .returning(|_, _| {
                Ok(vec![object(
                    "bitnami",
                    "flux-system",
                    json!([
                        {"type": "Ready", "status": "False", "reason": "Failed", "message": "old"},
                        {"type": "ArtifactInStorage", "status": "True", "message": "stored"}
                    ]),
                )])
            });

        let sync = ResourceSync::new(Arc::new(mock));
        let resources = sync
            .list(FluxResourceKind::HelmRepository, "flux-system")
            .await
            .unwrap();
        assert_eq!(resources.len(), 1);
        assert!(resources[0].ready);
        assert_eq!(resources[0].status, "True");
        assert_eq!(resources[0].message, "stored");
        assert_eq!(resources[0].conditions.len(), 2);
    }

    #[tokio::test]
    async fn test_kind_without_fallback_absent_is_empty() {
        let mut mock = MockClusterApi::new();
        mock.expect_list()
            .times(1)
            .returning(|_, _| Err(ClusterError::not_found("404 page not found")));

        let sync = ResourceSync::new(Arc::new(mock));
        let resources = sync
            .list(FluxResourceKind::HelmRelease, "")
            .await
            .unwrap();
        assert!(resources.is_empty());
    }

    #[tokio::test]
    async fn test_other_failure_is_not_retried() {
        let mut mock = MockClusterApi::new();
        mock.expect_list().times(1).returning(|_, _| {
            Err(ClusterError::new(
                Some(403),
                "helmrepositories is forbidden: User \"dev\" cannot list",
            ))
        });

        let sync = ResourceSync::new(Arc::new(mock));
        let err = sync
            .list(FluxResourceKind::HelmRepository, "flux-system")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SyncError::ListFailed {
                kind: FluxResourceKind::HelmRepository,
                version: "v1",
                ..
            }
        ));
        assert_eq!(err.class(), ErrorClass::Other);
        assert!(err.to_string().contains("forbidden"));
    }

    #[tokio::test]
    async fn test_fallback_other_failure_reports_fallback_version() {
        let mut mock = MockClusterApi::new();
        mock.expect_list()
            .withf(|ar, _| ar.version == "v1")
            .times(1)
            .returning(|_, _| Err(not_installed()));
        mock.expect_list()
            .withf(|ar, _| ar.version == "v1beta2")
            .times(1)
            .returning(|_, _| Err(ClusterError::new(None, "connection refused")));

        let sync = ResourceSync::new(Arc::new(mock));
        let err = sync
            .list(FluxResourceKind::HelmRepository, "")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SyncError::ListFailed {
                version: "v1beta2",
                ..
            }
        ));
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bad response"));
        assert_eq!(panic_message(payload.as_ref()), "bad response");
        let payload: Box<dyn Any + Send> = Box::new(42);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}

//! Suspend, resume and reconcile requests
//!
//! Every mutation is a single get followed by a single replace. Nothing is
//! retried here: a conflict on the replace is reported and the caller
//! refreshes before the user tries again.

use super::{ResourceSync, SyncError};
use crate::kube::{ClusterError, ErrorClass};
use crate::models::FluxResourceKind;
use chrono::{SecondsFormat, Utc};
use kube::core::{ApiResource, DynamicObject};
use serde_json::Value;
use std::collections::BTreeMap;

/// Annotation watched by Flux controllers to trigger an out-of-band reconcile
pub const RECONCILE_ANNOTATION: &str = "reconcile.fluxcd.io/requestedAt";

impl ResourceSync {
    /// Pause reconciliation of an object
    pub async fn suspend(
        &self,
        kind: FluxResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<(), SyncError> {
        self.set_suspended(kind, namespace, name, true).await
    }

    /// Resume reconciliation of a suspended object
    pub async fn resume(
        &self,
        kind: FluxResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<(), SyncError> {
        self.set_suspended(kind, namespace, name, false).await
    }

    /// Set `spec.suspend` to the requested value
    pub async fn set_suspended(
        &self,
        kind: FluxResourceKind,
        namespace: &str,
        name: &str,
        suspend: bool,
    ) -> Result<(), SyncError> {
        validate_target(namespace, name)?;

        let (api_resource, mut obj) = self.fetch_for_update(kind, namespace, name).await?;
        let spec = spec_mut(&mut obj).ok_or_else(|| {
            SyncError::InvalidRequest(format!(
                "{} {}/{} has a malformed spec",
                kind, namespace, name
            ))
        })?;
        spec.insert("suspend".to_string(), Value::Bool(suspend));

        self.write_back(kind, namespace, name, &api_resource, &obj)
            .await?;
        tracing::info!(
            "Set suspend={} on {} {}/{}",
            suspend,
            kind,
            namespace,
            name
        );
        Ok(())
    }

    /// Ask the owning controller to reconcile now
    ///
    /// Returns once the annotation is written; the controller acts on it
    /// asynchronously.
    pub async fn trigger_reconcile(
        &self,
        kind: FluxResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<(), SyncError> {
        validate_target(namespace, name)?;

        let (api_resource, mut obj) = self.fetch_for_update(kind, namespace, name).await?;
        let requested_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        obj.metadata
            .annotations
            .get_or_insert_with(BTreeMap::new)
            .insert(RECONCILE_ANNOTATION.to_string(), requested_at.clone());

        self.write_back(kind, namespace, name, &api_resource, &obj)
            .await?;
        tracing::info!(
            "Requested reconcile of {} {}/{} at {}",
            kind,
            namespace,
            name,
            requested_at
        );
        Ok(())
    }

    /// Get the current object, trying the legacy version if the primary one is not served
    async fn fetch_for_update(
        &self,
        kind: FluxResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<(ApiResource, DynamicObject), SyncError> {
        let primary = kind.api_resource(kind.primary_version().version);
        let err = match self.cluster.get(&primary, namespace, name).await {
            Ok(obj) => return Ok((primary, obj)),
            Err(err) => err,
        };

        if let Some(fallback) = kind.fallback_version()
            && self.classifier.classify(&err) == ErrorClass::KindNotInstalled
        {
            tracing::debug!(
                "{} {} not served, getting {}/{} with {}",
                kind,
                primary.version,
                namespace,
                name,
                fallback.version
            );
            let legacy = kind.api_resource(fallback.version);
            return match self.cluster.get(&legacy, namespace, name).await {
                Ok(obj) => Ok((legacy, obj)),
                Err(err) => Err(self.get_error(kind, namespace, name, err)),
            };
        }

        Err(self.get_error(kind, namespace, name, err))
    }

    async fn write_back(
        &self,
        kind: FluxResourceKind,
        namespace: &str,
        name: &str,
        api_resource: &ApiResource,
        obj: &DynamicObject,
    ) -> Result<(), SyncError> {
        match self.cluster.replace(api_resource, namespace, name, obj).await {
            Ok(_) => Ok(()),
            Err(source) => {
                tracing::warn!("Failed to update {} {}/{}: {}", kind, namespace, name, source);
                Err(SyncError::UpdateFailed {
                    kind,
                    namespace: namespace.to_string(),
                    name: name.to_string(),
                    source,
                })
            }
        }
    }

    fn get_error(
        &self,
        kind: FluxResourceKind,
        namespace: &str,
        name: &str,
        source: ClusterError,
    ) -> SyncError {
        tracing::warn!("Failed to get {} {}/{}: {}", kind, namespace, name, source);
        if self.classifier.classify(&source).means_kind_absent() {
            SyncError::NotFound {
                kind,
                namespace: namespace.to_string(),
                name: name.to_string(),
            }
        } else {
            SyncError::GetFailed {
                kind,
                namespace: namespace.to_string(),
                name: name.to_string(),
                source,
            }
        }
    }
}

fn validate_target(namespace: &str, name: &str) -> Result<(), SyncError> {
    if name.is_empty() {
        return Err(SyncError::InvalidRequest(
            "resource name must not be empty".to_string(),
        ));
    }
    if namespace.is_empty() {
        return Err(SyncError::InvalidRequest(format!(
            "namespace of {} must not be empty",
            name
        )));
    }
    Ok(())
}

/// `spec` as a mutable map, created when the object has none
fn spec_mut(obj: &mut DynamicObject) -> Option<&mut serde_json::Map<String, Value>> {
    if obj.data.is_null() {
        obj.data = Value::Object(serde_json::Map::new());
    }
    obj.data
        .as_object_mut()?
        .entry("spec")
        .or_insert_with(|| Value::Object(serde_json::Map::new()))
        .as_object_mut()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kube::cluster::MockClusterApi;
    use serde_json::json;
    use std::sync::Arc;

    fn kustomization(suspend: bool) -> DynamicObject {
        serde_json::from_value(json!({
            "apiVersion": "kustomize.toolkit.fluxcd.io/v1",
            "kind": "Kustomization",
            "metadata": {
                "name": "apps",
                "namespace": "flux-system",
                "resourceVersion": "1234",
                "labels": {"team": "platform"}
            },
            "spec": {
                "interval": "10m",
                "path": "./apps",
                "prune": true,
                "suspend": suspend,
                "sourceRef": {"kind": "GitRepository", "name": "fleet"}
            },
            "status": {"lastAppliedRevision": "main@sha1:abc"}
        }))
        .unwrap()
    }

    fn as_json(obj: &DynamicObject) -> Value {
        serde_json::to_value(obj).unwrap()
    }

    #[tokio::test]
    async fn test_suspend_is_one_get_and_one_replace_touching_only_suspend() {
        let original = kustomization(false);
        let mut expected = as_json(&original);
        expected["spec"]["suspend"] = json!(true);

        let mut mock = MockClusterApi::new();
        let fetched = original.clone();
        mock.expect_get()
            .withf(|ar, ns, name| ar.version == "v1" && ns == "flux-system" && name == "apps")
            .times(1)
            .returning(move |_, _, _| Ok(fetched.clone()));
        mock.expect_replace()
            .withf(move |_, ns, name, obj| {
                ns == "flux-system" && name == "apps" && as_json(obj) == expected
            })
            .times(1)
            .returning(|_, _, _, obj| Ok(obj.clone()));

        let sync = ResourceSync::new(Arc::new(mock));
        sync.suspend(FluxResourceKind::Kustomization, "flux-system", "apps")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_resume_clears_suspend() {
        let mut mock = MockClusterApi::new();
        mock.expect_get()
            .times(1)
            .returning(|_, _, _| Ok(kustomization(true)));
        mock.expect_replace()
            .withf(|_, _, _, obj| obj.data["spec"]["suspend"] == json!(false))
            .times(1)
            .returning(|_, _, _, obj| Ok(obj.clone()));

        let sync = ResourceSync::new(Arc::new(mock));
        sync.resume(FluxResourceKind::Kustomization, "flux-system", "apps")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_conflict_on_replace_is_update_failed() {
        let mut mock = MockClusterApi::new();
        mock.expect_get()
            .times(1)
            .returning(|_, _, _| Ok(kustomization(false)));
        mock.expect_replace().times(1).returning(|_, _, _, _| {
            Err(ClusterError::new(
                Some(409),
                "Operation cannot be fulfilled: the object has been modified",
            ))
        });

        let sync = ResourceSync::new(Arc::new(mock));
        let err = sync
            .suspend(FluxResourceKind::Kustomization, "flux-system", "apps")
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::UpdateFailed { .. }));
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_missing_object_is_not_found() {
        let mut mock = MockClusterApi::new();
        mock.expect_get().times(1).returning(|_, _, _| {
            Err(ClusterError::not_found(
                "kustomizations.kustomize.toolkit.fluxcd.io \"apps\" not found",
            ))
        });
        mock.expect_replace().never();

        let sync = ResourceSync::new(Arc::new(mock));
        let err = sync
            .suspend(FluxResourceKind::Kustomization, "flux-system", "apps")
            .await
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::NotFound);
        assert_eq!(err.to_string(), "Kustomization flux-system/apps not found");
    }

    #[tokio::test]
    async fn test_get_failure_is_get_failed() {
        let mut mock = MockClusterApi::new();
        mock.expect_get()
            .times(1)
            .returning(|_, _, _| Err(ClusterError::new(None, "connection reset by peer")));
        mock.expect_replace().never();

        let sync = ResourceSync::new(Arc::new(mock));
        let err = sync
            .trigger_reconcile(FluxResourceKind::GitRepository, "flux-system", "fleet")
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::GetFailed { .. }));
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected_before_any_call() {
        let mut mock = MockClusterApi::new();
        mock.expect_get().never();
        mock.expect_replace().never();

        let sync = ResourceSync::new(Arc::new(mock));
        let err = sync
            .suspend(FluxResourceKind::HelmRelease, "apps", "")
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::InvalidRequest(_)));
        let err = sync
            .trigger_reconcile(FluxResourceKind::HelmRelease, "", "podinfo")
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_reconcile_sets_annotation() {
        let mut mock = MockClusterApi::new();
        mock.expect_get()
            .times(1)
            .returning(|_, _, _| Ok(kustomization(false)));
        mock.expect_replace()
            .withf(|_, _, _, obj| {
                let Some(value) = obj
                    .metadata
                    .annotations
                    .as_ref()
                    .and_then(|a| a.get(RECONCILE_ANNOTATION))
                else {
                    return false;
                };
                chrono::DateTime::parse_from_rfc3339(value).is_ok()
                    && value.ends_with('Z')
                    && obj.data["spec"]["suspend"] == json!(false)
            })
            .times(1)
            .returning(|_, _, _, obj| Ok(obj.clone()));

        let sync = ResourceSync::new(Arc::new(mock));
        sync.trigger_reconcile(FluxResourceKind::Kustomization, "flux-system", "apps")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_helm_repository_mutation_uses_legacy_version() {
        let legacy: DynamicObject = serde_json::from_value(json!({
            "apiVersion": "source.toolkit.fluxcd.io/v1beta2",
            "kind": "HelmRepository",
            "metadata": {"name": "bitnami", "namespace": "flux-system"},
            "spec": {"url": "https://charts.bitnami.com/bitnami"}
        }))
        .unwrap();

        let mut mock = MockClusterApi::new();
        mock.expect_get()
            .withf(|ar, _, _| ar.version == "v1")
            .times(1)
            .returning(|_, _, _| {
                Err(ClusterError::not_found(
                    "the server could not find the requested resource",
                ))
            });
        mock.expect_get()
            .withf(|ar, _, _| ar.version == "v1beta2")
            .times(1)
            .returning(move |_, _, _| Ok(legacy.clone()));
        mock.expect_replace()
            .withf(|ar, _, _, obj| {
                ar.version == "v1beta2" && obj.data["spec"]["suspend"] == json!(true)
            })
            .times(1)
            .returning(|_, _, _, obj| Ok(obj.clone()));

        let sync = ResourceSync::new(Arc::new(mock));
        sync.suspend(FluxResourceKind::HelmRepository, "flux-system", "bitnami")
            .await
            .unwrap();
    }

    #[test]
    fn test_spec_mut_creates_missing_spec() {
        let mut obj: DynamicObject = serde_json::from_value(json!({
            "apiVersion": "source.toolkit.fluxcd.io/v1",
            "kind": "GitRepository",
            "metadata": {"name": "fleet", "namespace": "flux-system"}
        }))
        .unwrap();
        spec_mut(&mut obj)
            .unwrap()
            .insert("suspend".to_string(), Value::Bool(true));
        assert_eq!(obj.data["spec"]["suspend"], json!(true));
    }
}

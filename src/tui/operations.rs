//! Flux operations module
//!
//! Operations are implemented as a trait-based system for easy extension.
//! Each one delegates to the sync layer and runs on a background task.

use crate::models::Resource;
use crate::sync::{ResourceSync, SyncError};
use std::sync::Arc;

/// Trait for Flux operations
#[async_trait::async_trait]
pub trait FluxOperation: Send + Sync {
    /// Execute the operation on the given resource
    async fn execute(&self, sync: &ResourceSync, resource: &Resource) -> Result<(), SyncError>;

    /// Keybinding character for this operation
    fn keybinding(&self) -> char;

    /// Human-readable name for this operation
    fn name(&self) -> &'static str;

    /// Status line shown after the operation succeeded
    fn success_message(&self, resource: &Resource) -> String;
}

/// Suspend operation - suspends reconciliation
pub struct SuspendOperation;

#[async_trait::async_trait]
impl FluxOperation for SuspendOperation {
    async fn execute(&self, sync: &ResourceSync, resource: &Resource) -> Result<(), SyncError> {
        tracing::debug!(
            "Suspending {}/{} in namespace {}",
            resource.kind,
            resource.name,
            resource.namespace
        );
        sync.suspend(resource.kind, &resource.namespace, &resource.name)
            .await
    }

    fn keybinding(&self) -> char {
        's'
    }

    fn name(&self) -> &'static str {
        "Suspend"
    }

    fn success_message(&self, resource: &Resource) -> String {
        format!(
            "Suspended {} {}/{}",
            resource.kind, resource.namespace, resource.name
        )
    }
}

/// Resume operation - resumes reconciliation
pub struct ResumeOperation;

#[async_trait::async_trait]
impl FluxOperation for ResumeOperation {
    async fn execute(&self, sync: &ResourceSync, resource: &Resource) -> Result<(), SyncError> {
        tracing::debug!(
            "Resuming {}/{} in namespace {}",
            resource.kind,
            resource.name,
            resource.namespace
        );
        sync.resume(resource.kind, &resource.namespace, &resource.name)
            .await
    }

    fn keybinding(&self) -> char {
        'r'
    }

    fn name(&self) -> &'static str {
        "Resume"
    }

    fn success_message(&self, resource: &Resource) -> String {
        format!(
            "Resumed {} {}/{}",
            resource.kind, resource.namespace, resource.name
        )
    }
}

/// Reconcile operation - asks the controller to reconcile now
pub struct ReconcileOperation;

#[async_trait::async_trait]
impl FluxOperation for ReconcileOperation {
    async fn execute(&self, sync: &ResourceSync, resource: &Resource) -> Result<(), SyncError> {
        tracing::debug!(
            "Triggering reconcile of {}/{} in namespace {}",
            resource.kind,
            resource.name,
            resource.namespace
        );
        sync.trigger_reconcile(resource.kind, &resource.namespace, &resource.name)
            .await
    }

    fn keybinding(&self) -> char {
        'R'
    }

    fn name(&self) -> &'static str {
        "Reconcile"
    }

    fn success_message(&self, resource: &Resource) -> String {
        format!(
            "Reconcile requested for {} {}/{}",
            resource.kind, resource.namespace, resource.name
        )
    }
}

/// Operation registry - holds all available operations
pub struct OperationRegistry {
    operations: Vec<Arc<dyn FluxOperation>>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            operations: Vec::new(),
        };

        registry.register(Arc::new(SuspendOperation));
        registry.register(Arc::new(ResumeOperation));
        registry.register(Arc::new(ReconcileOperation));

        registry
    }

    pub fn register(&mut self, operation: Arc<dyn FluxOperation>) {
        self.operations.push(operation);
    }

    /// Look up an operation; the returned handle can be moved into a task
    pub fn get_by_keybinding(&self, key: char) -> Option<Arc<dyn FluxOperation>> {
        self.operations
            .iter()
            .find(|op| op.keybinding() == key)
            .cloned()
    }

    pub fn get_all(&self) -> &[Arc<dyn FluxOperation>] {
        &self.operations
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kube::ClusterError;
    use crate::kube::cluster::MockClusterApi;
    use crate::models::FluxResourceKind;
    use kube::core::DynamicObject;
    use serde_json::json;

    fn helm_release() -> DynamicObject {
        serde_json::from_value(json!({
            "apiVersion": "helm.toolkit.fluxcd.io/v2",
            "kind": "HelmRelease",
            "metadata": {"name": "podinfo", "namespace": "apps"},
            "spec": {"interval": "5m"}
        }))
        .unwrap()
    }

    #[test]
    fn test_operation_registry() {
        let registry = OperationRegistry::new();

        assert_eq!(registry.get_all().len(), 3);
        assert_eq!(registry.get_by_keybinding('s').unwrap().name(), "Suspend");
        assert_eq!(registry.get_by_keybinding('r').unwrap().name(), "Resume");
        assert_eq!(registry.get_by_keybinding('R').unwrap().name(), "Reconcile");
        assert!(registry.get_by_keybinding('d').is_none());
    }

    #[test]
    fn test_success_messages_name_the_target() {
        let resource = Resource::new(FluxResourceKind::HelmRelease, "apps", "podinfo");
        let msg = SuspendOperation.success_message(&resource);
        assert_eq!(msg, "Suspended HelmRelease apps/podinfo");
        let msg = ReconcileOperation.success_message(&resource);
        assert!(msg.contains("apps/podinfo"));
    }

    #[tokio::test]
    async fn test_resume_operation_writes_suspend_false() {
        let mut mock = MockClusterApi::new();
        mock.expect_get()
            .times(1)
            .returning(|_, _, _| Ok(helm_release()));
        mock.expect_replace()
            .withf(|ar, _, _, obj| {
                ar.api_version == "helm.toolkit.fluxcd.io/v2"
                    && obj.data["spec"]["suspend"] == json!(false)
                    && obj.data["spec"]["interval"] == json!("5m")
            })
            .times(1)
            .returning(|_, _, _, obj| Ok(obj.clone()));

        let sync = ResourceSync::new(Arc::new(mock));
        let resource = Resource::new(FluxResourceKind::HelmRelease, "apps", "podinfo");
        ResumeOperation.execute(&sync, &resource).await.unwrap();
    }

    #[tokio::test]
    async fn test_operation_error_is_propagated() {
        let mut mock = MockClusterApi::new();
        mock.expect_get()
            .times(1)
            .returning(|_, _, _| Err(ClusterError::new(Some(403), "forbidden")));

        let sync = ResourceSync::new(Arc::new(mock));
        let resource = Resource::new(FluxResourceKind::HelmRelease, "apps", "podinfo");
        let err = SuspendOperation.execute(&sync, &resource).await.unwrap_err();
        assert!(matches!(err, SyncError::GetFailed { .. }));
    }
}

//! Cluster access seam
//!
//! The sync layer talks to the API server only through [`ClusterApi`], which
//! works on untyped objects so that several versions of the same kind can be
//! served by one code path.

use super::errors::ClusterError;
use kube::api::{ListParams, PostParams};
use kube::core::{ApiResource, DynamicObject};
use kube::{Api, Client};

/// Namespace values that mean "every namespace the caller can see"
pub fn is_all_namespaces(namespace: &str) -> bool {
    namespace.is_empty() || namespace == "<nil>"
}

/// Minimal set of API server calls the dashboard needs
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ClusterApi: Send + Sync {
    /// List objects of a kind/version. An empty namespace lists across all namespaces.
    async fn list(
        &self,
        resource: &ApiResource,
        namespace: &str,
    ) -> Result<Vec<DynamicObject>, ClusterError>;

    /// Get a single object by namespaced name
    async fn get(
        &self,
        resource: &ApiResource,
        namespace: &str,
        name: &str,
    ) -> Result<DynamicObject, ClusterError>;

    /// Write a full object back (PUT). Fails with a conflict on a stale resourceVersion.
    async fn replace(
        &self,
        resource: &ApiResource,
        namespace: &str,
        name: &str,
        object: &DynamicObject,
    ) -> Result<DynamicObject, ClusterError>;
}

/// [`ClusterApi`] backed by a connected kube-rs client
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn namespaced(&self, resource: &ApiResource, namespace: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, resource)
    }
}

#[async_trait::async_trait]
impl ClusterApi for KubeCluster {
    async fn list(
        &self,
        resource: &ApiResource,
        namespace: &str,
    ) -> Result<Vec<DynamicObject>, ClusterError> {
        let api: Api<DynamicObject> = if is_all_namespaces(namespace) {
            Api::all_with(self.client.clone(), resource)
        } else {
            self.namespaced(resource, namespace)
        };
        tracing::debug!(
            "Listing {} in namespace '{}'",
            resource.api_version,
            namespace
        );
        let list = api.list(&ListParams::default()).await?;
        Ok(list.items)
    }

    async fn get(
        &self,
        resource: &ApiResource,
        namespace: &str,
        name: &str,
    ) -> Result<DynamicObject, ClusterError> {
        let obj = self.namespaced(resource, namespace).get(name).await?;
        Ok(obj)
    }

    async fn replace(
        &self,
        resource: &ApiResource,
        namespace: &str,
        name: &str,
        object: &DynamicObject,
    ) -> Result<DynamicObject, ClusterError> {
        let obj = self
            .namespaced(resource, namespace)
            .replace(name, &PostParams::default(), object)
            .await?;
        Ok(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_all_namespaces() {
        assert!(is_all_namespaces(""));
        assert!(is_all_namespaces("<nil>"));
        assert!(!is_all_namespaces("flux-system"));
    }
}

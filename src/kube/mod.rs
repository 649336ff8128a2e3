//! Kubernetes client module
//!
//! Handles connection to the Kubernetes API server and exposes the narrow
//! [`ClusterApi`] seam plus error classification used by the sync layer.

pub mod cluster;
pub mod errors;

pub use cluster::{ClusterApi, KubeCluster, is_all_namespaces};
pub use errors::{ClusterError, ErrorClass, ErrorClassifier, MessageClassifier};

use anyhow::{Context, Result};
use kube::config::Kubeconfig;
use kube::{Client, Config};

/// Initialize and return a Kubernetes client
///
/// Uses the default kubeconfig loading strategy:
/// 1. In-cluster config (if running in a pod)
/// 2. KUBECONFIG environment variable
/// 3. ~/.kube/config
pub async fn create_client() -> Result<Client> {
    let config = Config::infer()
        .await
        .context("Failed to infer Kubernetes configuration")?;
    tracing::debug!("Connecting to cluster at {}", config.cluster_url);
    let client = Client::try_from(config).context("Failed to create Kubernetes client")?;
    Ok(client)
}

/// Get the current Kubernetes context name
///
/// Falls back to "in-cluster" when no kubeconfig can be read (e.g. running in a pod).
pub fn get_context() -> String {
    match Kubeconfig::read() {
        Ok(kubeconfig) => kubeconfig
            .current_context
            .unwrap_or_else(|| "default".to_string()),
        Err(e) => {
            tracing::debug!("No readable kubeconfig ({}), assuming in-cluster", e);
            "in-cluster".to_string()
        }
    }
}

//! fluxcli - a terminal dashboard for Flux GitOps resources
//!
//! Lists Flux sources, Kustomizations and HelmReleases for one namespace (or
//! all of them) and lets the user suspend, resume or reconcile the selection.

use anyhow::{Context, Result};
use clap::Parser;
use fluxcli::cli::{self, Args, Command};
use fluxcli::config::ConfigLoader;
use fluxcli::kube::{self, KubeCluster};
use fluxcli::sync::ResourceSync;
use fluxcli::tui::{self, AppSettings};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = Args::parse();

    match args.command.take() {
        Some(Command::Config { subcommand }) => return cli::handle_config_command(subcommand),
        Some(Command::Version) => {
            cli::display_version();
            return Ok(());
        }
        None => {}
    }

    let log_file = cli::init_logging(args.debug)?;

    // Print log file location to stderr before starting TUI (so it doesn't interfere)
    if let Some(ref log_path) = log_file {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    let config = ConfigLoader::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load configuration, using defaults: {:#}", e);
        ConfigLoader::load_defaults()
    });
    let config = args.apply_to(config)?;
    let settings = AppSettings::from(&config);
    tracing::debug!(
        "Configuration loaded: readOnly={}, namespace='{}', kind={}",
        settings.read_only,
        settings.namespace,
        settings.kind
    );

    // Initialize Kubernetes client
    tracing::debug!("Initializing Kubernetes client");
    let client = kube::create_client()
        .await
        .context("Failed to connect to the cluster")?;
    let context = kube::get_context();
    tracing::info!("Connected to Kubernetes cluster: {}", context);

    let sync = Arc::new(ResourceSync::new(Arc::new(KubeCluster::new(client))));

    tui::run_tui(sync, context, settings).await
}

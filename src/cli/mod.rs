//! CLI command handling module
//!
//! Handles argument parsing, subcommands and logging setup.

mod commands;
mod logging;
mod version;

pub use commands::{ConfigSubcommand, handle_config_command};
pub use logging::init_logging;
pub use version::display_version;

use crate::config::{ALL_NAMESPACES, Config};
use crate::models::FluxResourceKind;
use clap::{Parser, Subcommand};

/// fluxcli - a terminal dashboard for Flux GitOps resources
#[derive(Parser, Debug, Default)]
#[command(name = "fluxcli")]
#[command(about = "A terminal dashboard for observing and operating Flux GitOps resources", long_about = None)]
pub struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd')]
    pub debug: bool,

    /// Namespace to show on startup
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,

    /// Show resources from every namespace
    #[arg(long, short = 'A', conflicts_with = "namespace")]
    pub all_namespaces: bool,

    /// Kind to show on startup (e.g. "ks", "hr", "GitRepository")
    #[arg(long, short = 'k')]
    pub kind: Option<String>,

    /// Prefix resource names with their namespace
    #[arg(long)]
    pub show_namespace: bool,

    /// Disable suspend/resume/reconcile for this session
    #[arg(long)]
    pub read_only: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Display version information
    Version,
}

impl Args {
    /// Layer command line flags over a loaded configuration
    pub fn apply_to(&self, mut config: Config) -> anyhow::Result<Config> {
        if let Some(namespace) = &self.namespace {
            config.default_namespace = namespace.clone();
        }
        if self.all_namespaces {
            config.default_namespace = ALL_NAMESPACES.to_string();
        }
        if let Some(kind) = &self.kind {
            let kind = FluxResourceKind::from_str_case_insensitive(kind)
                .ok_or_else(|| anyhow::anyhow!("Unknown Flux kind: {}", kind))?;
            config.default_kind = kind.as_str().to_string();
        }
        if self.show_namespace {
            config.ui.show_namespace = true;
        }
        if self.read_only {
            config.read_only = true;
        }
        Ok(config)
    }
}

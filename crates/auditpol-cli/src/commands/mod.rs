//! CLI commands and argument parsing.

pub mod check;
pub mod compute;
pub mod default;
pub mod profiles;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use auditpol_assembler::{DirectoryManifests, PolicyCatalog};
use clap::{Parser, Subcommand};
use tracing::debug;

/// auditpol - Audit policy assembly for API servers
#[derive(Parser)]
#[command(name = "auditpol")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing a `manifests/` tree to use instead of the embedded manifests
    #[arg(long, global = true, env = "AUDITPOL_MANIFESTS_ROOT")]
    pub manifests_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print the default audit policy
    Default,

    /// Compute the audit policy for a profile
    Compute(compute::ComputeArgs),

    /// List known profiles
    Profiles(profiles::ProfilesArgs),

    /// Load every manifest and report problems
    Check,

    /// Print version information
    Version,
}

/// Output format for documents and listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// YAML documents.
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

/// Loads the catalog from `root`, or returns a copy of the embedded one.
pub fn load_catalog(root: Option<&Path>) -> Result<PolicyCatalog> {
    match root {
        Some(root) => {
            debug!(root = %root.display(), "Loading manifests from directory");
            PolicyCatalog::load(&DirectoryManifests::new(root))
                .with_context(|| format!("failed to load manifests from {}", root.display()))
        }
        None => PolicyCatalog::embedded()
            .cloned()
            .context("failed to load embedded manifests"),
    }
}

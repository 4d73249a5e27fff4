//! auditpol CLI - Computes API server audit policies from profiles.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{Cli, Commands};

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only policy documents
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auditpol=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let root = cli.manifests_root.as_deref();

    match cli.command {
        Commands::Default => commands::default::run(root),
        Commands::Compute(args) => commands::compute::run(root, &args),
        Commands::Profiles(args) => commands::profiles::run(root, &args),
        Commands::Check => commands::check::run(root),
        Commands::Version => {
            println!("auditpol {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

//! Compute command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use auditpol_assembler::PolicyCatalog;
use auditpol_core::{codec, AuditProfile, PolicyRule};
use clap::Args;
use tracing::info;

use super::{load_catalog, OutputFormat};

/// Arguments for the compute command.
#[derive(Args)]
pub struct ComputeArgs {
    /// Audit profile (Default, WriteRequestBodies, AllRequestBodies)
    #[arg(short, long, default_value = "Default")]
    pub profile: AuditProfile,

    /// YAML file holding a list of rules appended after the profile rules
    #[arg(short, long)]
    pub custom_rules: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub output: OutputFormat,
}

/// Runs the compute command.
pub fn run(root: Option<&Path>, args: &ComputeArgs) -> Result<()> {
    info!(profile = %args.profile, custom_rules = ?args.custom_rules, "Computing audit policy");

    let catalog = load_catalog(root)?;
    let custom_rules = match &args.custom_rules {
        Some(path) => read_custom_rules(path)?,
        None => Vec::new(),
    };

    let rendered = render(&catalog, args.profile, &custom_rules, args.output)?;
    std::io::stdout().lock().write_all(&rendered)?;
    Ok(())
}

/// Assembles, stamps and serializes the policy.
pub fn render(
    catalog: &PolicyCatalog,
    profile: AuditProfile,
    custom_rules: &[PolicyRule],
    output: OutputFormat,
) -> Result<Vec<u8>> {
    let policy = catalog
        .assembler()
        .compute_policy(profile, custom_rules)?
        .with_type_meta();

    match output {
        OutputFormat::Yaml => Ok(codec::encode_policy(&policy)?),
        OutputFormat::Json => {
            let mut bytes = serde_json::to_vec_pretty(&policy)?;
            bytes.push(b'\n');
            Ok(bytes)
        }
    }
}

fn read_custom_rules(path: &Path) -> Result<Vec<PolicyRule>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read custom rules from {}", path.display()))?;
    codec::decode_rules(&bytes)
        .with_context(|| format!("invalid custom rules in {}", path.display()))
}

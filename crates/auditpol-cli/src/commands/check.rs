//! Check command implementation.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use super::load_catalog;

/// Runs the check command.
///
/// Loads the catalog and assembles every profile once, failing on the first
/// problem.
pub fn run(root: Option<&Path>) -> Result<()> {
    let catalog = load_catalog(root)?;
    let assembler = catalog.assembler();

    for profile in catalog.profiles() {
        let policy = assembler.compute_policy(profile, &[])?;
        info!(%profile, rules = policy.rules.len(), "Profile assembled");
        println!("✓ {profile} ({} rules)", policy.rules.len());
    }

    assembler.default_policy()?;
    println!("\n✓ All manifests loaded successfully");
    Ok(())
}

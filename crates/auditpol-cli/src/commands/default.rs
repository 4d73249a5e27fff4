//! Default command implementation.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tracing::info;

use super::load_catalog;

/// Runs the default command.
pub fn run(root: Option<&Path>) -> Result<()> {
    info!("Rendering default audit policy");
    let bytes = render(root)?;
    std::io::stdout().lock().write_all(&bytes)?;
    Ok(())
}

/// Renders the default policy from `root`, or from the embedded manifests.
fn render(root: Option<&Path>) -> Result<Vec<u8>> {
    Ok(match root {
        Some(_) => load_catalog(root)?.assembler().default_policy()?,
        None => auditpol_assembler::default_policy()?,
    })
}

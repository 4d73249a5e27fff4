//! Profiles command implementation.

use std::path::Path;

use anyhow::Result;
use auditpol_assembler::{manifest::profile_manifest, PolicyCatalog};
use clap::Args;
use serde_json::json;

use super::{load_catalog, OutputFormat};

/// Arguments for the profiles command.
#[derive(Args)]
pub struct ProfilesArgs {
    /// Output format (yaml prints a plain table)
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub output: OutputFormat,
}

/// Runs the profiles command.
pub fn run(root: Option<&Path>, args: &ProfilesArgs) -> Result<()> {
    let catalog = load_catalog(root)?;
    print!("{}", render(&catalog, args.output)?);
    Ok(())
}

/// Renders the profile listing.
pub fn render(catalog: &PolicyCatalog, output: OutputFormat) -> Result<String> {
    let rows: Vec<_> = catalog
        .profiles()
        .map(|profile| {
            let rules = catalog.profile_rules(profile).map_or(0, <[_]>::len);
            (profile, profile_manifest(profile), rules)
        })
        .collect();

    match output {
        OutputFormat::Yaml => {
            let mut out = format!("{:<20} {:<42} {}\n", "PROFILE", "MANIFEST", "RULES");
            for (profile, manifest, rules) in &rows {
                out.push_str(&format!("{:<20} {manifest:<42} {rules}\n", profile.as_str()));
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let entries: Vec<_> = rows
                .iter()
                .map(|(profile, manifest, rules)| {
                    json!({ "profile": profile, "manifest": manifest, "rules": rules })
                })
                .collect();
            Ok(serde_json::to_string_pretty(&entries)? + "\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_every_profile() {
        let catalog = load_catalog(None).unwrap();
        let table = render(&catalog, OutputFormat::Yaml).unwrap();

        assert!(table.starts_with("PROFILE"));
        assert!(table.contains("WriteRequestBodies"));
        assert!(table.contains("manifests/allrequestbodies-rules.yaml"));
        assert_eq!(table.lines().count(), 4);
    }

    #[test]
    fn test_json_listing() {
        let catalog = load_catalog(None).unwrap();
        let listing: serde_json::Value =
            serde_json::from_str(&render(&catalog, OutputFormat::Json).unwrap()).unwrap();

        assert_eq!(listing[0]["profile"], "Default");
        assert_eq!(listing[0]["manifest"], "manifests/default-rules.yaml");
    }
}

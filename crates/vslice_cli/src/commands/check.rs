//! Check command - Validate configuration and manifest anchors.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use vslice_core::ManifestSummary;
use vslice_templates::{ScaffoldConfig, Section};

use super::Cli;

#[derive(Args)]
pub struct CheckArgs {
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    config: &'a ScaffoldConfig,
    manifest: ManifestSummary,
}

pub fn execute(cli: &Cli, args: &CheckArgs) -> Result<()> {
    let scaffolder = cli.scaffolder()?;
    let manifest_path = scaffolder.manifest_path();

    let summary = scaffolder
        .injector()
        .check(&manifest_path)
        .with_context(|| format!("Manifest check failed for {:?}", manifest_path))?;

    if args.json {
        let report = CheckReport {
            config: scaffolder.config(),
            manifest: summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let config = scaffolder.config();
    println!("🔍 Checking {}", scaffolder.project_root().display());
    println!("   Source root: {}", config.source_root.display());
    println!("   Manifest:    {}", config.manifest.display());
    println!();
    println!("   Section       Anchor                Line  Entries");
    for section in Section::all() {
        println!(
            "   {:<13} {:<21} {:>4}  {:>7}",
            section.as_str(),
            config.anchors.sentinel(section),
            summary.anchor_lines.get(&section).copied().unwrap_or_default(),
            summary.entries.get(&section).copied().unwrap_or_default(),
        );
    }
    println!();
    println!("✅ Configuration and manifest anchors are valid");

    Ok(())
}

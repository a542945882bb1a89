//! Module command - Create an owning module skeleton.

use anyhow::{Context, Result};
use clap::Args;

use vslice_core::ModuleOutcome;
use vslice_templates::validate_module_name;

use super::Cli;

#[derive(Args)]
pub struct ModuleArgs {
    /// Name of the module to create
    #[arg(short, long)]
    pub name: String,
}

pub fn execute(cli: &Cli, args: &ModuleArgs) -> Result<()> {
    validate_module_name(&args.name)?;
    let scaffolder = cli.scaffolder()?;
    let bootstrapper = scaffolder.bootstrapper();

    let outcome = bootstrapper
        .create(&args.name)
        .with_context(|| format!("Failed to create module {}", args.name))?;

    let path = bootstrapper.module_path(&args.name);
    match outcome {
        ModuleOutcome::Created => {
            println!("✅ Module {} created at {}", args.name, path.display());
            if !cli.quiet {
                for dir in &scaffolder.config().module_dirs {
                    println!("  📁 {}/", dir);
                }
            }
        }
        ModuleOutcome::AlreadyExists => {
            println!(
                "⚠️  Module {} already exists at {}",
                args.name,
                path.display()
            );
        }
    }

    Ok(())
}

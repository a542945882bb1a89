//! Resource command - Scaffold one resource.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use vslice_core::{
    FragmentOutcome, MergeOutcome, ModuleOutcome, ScaffoldReport, ScaffoldRequest, WriteOutcome,
};
use vslice_templates::ResourceSpec;

use super::Cli;

#[derive(Args)]
pub struct ResourceArgs {
    /// Owning module the resource belongs to
    #[arg(short, long)]
    pub module: String,

    /// Resource name in PascalCase (e.g. Publisher)
    #[arg(short, long)]
    pub name: String,

    /// Create the owning module skeleton before scaffolding
    #[arg(long)]
    pub create_module: bool,

    /// Only generate the data model
    #[arg(long)]
    pub only_model: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(cli: &Cli, args: &ResourceArgs) -> Result<()> {
    let resource = ResourceSpec::new(&args.name, &args.module)?;
    let scaffolder = cli.scaffolder()?;

    let request = ScaffoldRequest::new(resource)
        .create_module(args.create_module)
        .model_only(args.only_model);

    let report = scaffolder.run(&request).with_context(|| {
        format!(
            "Failed to scaffold {} in module {}",
            args.name, args.module
        )
    })?;

    info!(
        "Scaffold of {} finished: {} artifact(s) created",
        report.resource,
        report.created_artifacts()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, scaffolder.project_root(), cli.quiet);
    }

    Ok(())
}

fn print_report(report: &ScaffoldReport, root: &Path, quiet: bool) {
    let display = |path: &Path| path.strip_prefix(root).unwrap_or(path).display().to_string();

    match report.module_outcome {
        Some(ModuleOutcome::Created) => println!("📁 Created module {}", report.module),
        Some(ModuleOutcome::AlreadyExists) => {
            println!(
                "⚠️  Module {} already exists; nothing was scaffolded.",
                report.module
            );
        }
        None => {}
    }

    if report.halted {
        return;
    }

    if !quiet {
        println!("📄 Artifacts:");
        for artifact in &report.artifacts {
            let marker = match artifact.outcome {
                WriteOutcome::Created => "✅ created",
                WriteOutcome::SkippedExisting => "⏭️  exists ",
            };
            println!("   {} {}", marker, display(&artifact.path));
        }

        println!("📚 Barrels:");
        for export in &report.exports {
            let marker = match export.outcome {
                MergeOutcome::CreatedFile => "✅ created ",
                MergeOutcome::AppendedLine => "✅ appended",
                MergeOutcome::AlreadyPresent => "⏭️  present ",
            };
            println!("   {} {} ({})", marker, export.line, display(&export.path));
        }

        if let Some(manifest) = &report.manifest {
            println!("🔌 Manifest {}:", display(&manifest.path));
            for fragment in &manifest.fragments {
                let marker = match fragment.outcome {
                    FragmentOutcome::Inserted => "✅ inserted",
                    FragmentOutcome::AlreadyPresent => "⏭️  present ",
                };
                println!(
                    "   {} [{}] {}",
                    marker,
                    fragment.section,
                    fragment.fragment.trim()
                );
            }
        }
        println!();
    }

    if report.is_noop() {
        println!("✅ {} is already up to date.", report.resource);
    } else {
        println!(
            "✅ Scaffolded {} in module {}.",
            report.resource, report.module
        );
    }
}

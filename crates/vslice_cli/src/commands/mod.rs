//! CLI command definitions.
//!
//! Each subcommand maps to one scaffolding operation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use vslice_core::Scaffolder;
use vslice_templates::ScaffoldConfig;

pub mod check;
pub mod module;
pub mod resource;

/// vslice - vertical-slice resource scaffolder
#[derive(Parser)]
#[command(name = "vslice")]
#[command(version, about = "vslice - vertical-slice resource scaffolder")]
#[command(long_about = r#"
vslice generates the model, DTOs, service, controller and routes of one
resource inside an owning module, keeps each directory's index.ts barrel up
to date and registers the resource in the composition-root manifest.

Every step is idempotent: re-running a command never duplicates content.

COMMANDS:
  resource  → Scaffold a resource (optionally creating its module first)
  module    → Create an empty module skeleton
  check     → Validate configuration and manifest anchors

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments or names
  3 - Manifest precondition failure
  4 - Configuration error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(long, global = true, env = "VSLICE_PROJECT_ROOT")]
    pub project_root: Option<PathBuf>,

    /// Configuration file (defaults to vslice.yaml in the project root)
    #[arg(long, global = true, env = "VSLICE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scaffold a resource inside an owning module
    Resource(resource::ResourceArgs),

    /// Create an owning module skeleton
    Module(module::ModuleArgs),

    /// Validate configuration and manifest anchors
    Check(check::CheckArgs),
}

impl Cli {
    pub fn project_root(&self) -> Result<PathBuf> {
        match &self.project_root {
            Some(root) => Ok(root.clone()),
            None => std::env::current_dir().context("Failed to resolve current directory"),
        }
    }

    /// Load the configuration named by `--config`, or discover it in the
    /// project root.
    pub fn load_config(&self) -> Result<ScaffoldConfig> {
        match &self.config {
            Some(path) => {
                debug!("Using configuration {:?}", path);
                ScaffoldConfig::load(path)
                    .with_context(|| format!("Failed to load configuration {:?}", path))
            }
            None => {
                let root = self.project_root()?;
                ScaffoldConfig::discover(&root)
                    .with_context(|| format!("Failed to load configuration in {:?}", root))
            }
        }
    }

    pub fn scaffolder(&self) -> Result<Scaffolder> {
        let config = self.load_config()?;
        Ok(Scaffolder::new(config, self.project_root()?))
    }
}

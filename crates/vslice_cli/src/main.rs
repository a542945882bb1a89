//! vslice CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments or names
//! - 3: Manifest precondition failure
//! - 4: Configuration error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vslice_core::CoreError;
use vslice_templates::TemplateError;

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const MANIFEST_PRECONDITION: u8 = 3;
    pub const CONFIG_ERROR: u8 = 4;
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = match &cli.command {
        Commands::Resource(args) => commands::resource::execute(&cli, args),
        Commands::Module(args) => commands::module::execute(&cli, args),
        Commands::Check(args) => commands::check::execute(&cli, args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Install the tracing subscriber. Logs go to stderr so `--json` output on
/// stdout stays machine-readable. `RUST_LOG` takes precedence over flags.
fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,vslice_cli={level},vslice_core={level},vslice_templates={level}"
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    let log_result = if cli.log_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if log_result.is_err() {
        // Logging already initialized, continue
    }
}

/// Map the first library error in the chain to an exit code.
fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if let Some(core) = cause.downcast_ref::<CoreError>() {
            if core.is_manifest_precondition() {
                return ExitCodes::MANIFEST_PRECONDITION;
            }
            if let CoreError::Template(template) = core {
                return categorize_template_error(template);
            }
            return ExitCodes::GENERAL_ERROR;
        }
        if let Some(template) = cause.downcast_ref::<TemplateError>() {
            return categorize_template_error(template);
        }
    }

    ExitCodes::GENERAL_ERROR
}

fn categorize_template_error(e: &TemplateError) -> u8 {
    match e {
        TemplateError::InvalidResourceName { .. } | TemplateError::InvalidModuleName { .. } => {
            ExitCodes::INVALID_ARGS
        }
        TemplateError::InvalidConfig { .. }
        | TemplateError::ConfigNotFound(_)
        | TemplateError::Yaml(_) => ExitCodes::CONFIG_ERROR,
        TemplateError::Io(_) => ExitCodes::GENERAL_ERROR,
    }
}

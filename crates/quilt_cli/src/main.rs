//! quilt CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Validation failure
//! - 4: Template error

use std::process::ExitCode;

use clap::Parser;
use quilt_preview::PreviewError;
use quilt_templates::TemplateError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const TEMPLATE_ERROR: u8 = 4;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        "quilt=debug"
    } else if cli.quiet {
        "quilt=error"
    } else {
        "quilt=info"
    };
    let mut filter = EnvFilter::from_default_env();
    for directive in [default_level, "warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }
    // Logging may already be initialized by an embedding harness
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let result = match cli.command {
        Commands::List(args) => commands::list::execute(&cli.global, args).await,
        Commands::Validate(args) => commands::validate::execute(&cli.global, args).await,
        Commands::Preview(args) => commands::preview::execute(&cli.global, args).await,
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

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(err) = e.downcast_ref::<PreviewError>() {
        return match err {
            PreviewError::NoTemplatesSelected
            | PreviewError::CategoryConflict { .. }
            | PreviewError::DependencyUnsatisfied { .. } => ExitCodes::VALIDATION_FAILURE,
            _ => ExitCodes::INVALID_ARGS,
        };
    }
    if e.downcast_ref::<TemplateError>().is_some() {
        return ExitCodes::TEMPLATE_ERROR;
    }

    let msg = e.to_string().to_lowercase();
    if msg.contains("conflict") {
        ExitCodes::VALIDATION_FAILURE
    } else if msg.contains("template") {
        ExitCodes::TEMPLATE_ERROR
    } else if msg.contains("argument") || msg.contains("option") || msg.contains("not found") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}

//! Validate command - Check a template selection.

use anyhow::Result;
use clap::Args;
use quilt_preview::SelectionValidator;
use tracing::info;

use super::{resolve_selections, GlobalArgs};

#[derive(Args)]
pub struct ValidateArgs {
    /// Templates to combine, in order
    #[arg(short, long = "template", required = true)]
    templates: Vec<String>,
}

pub async fn execute(global: &GlobalArgs, args: ValidateArgs) -> Result<()> {
    info!("Validating selection: {}", args.templates.join(", "));

    let registry = global.load_registry()?;
    let selections = resolve_selections(&registry, &args.templates, &[])?;

    SelectionValidator::validate(&selections)?;

    println!("✅ Selection is valid ({} template(s))", selections.len());
    Ok(())
}

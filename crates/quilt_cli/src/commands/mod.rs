//! CLI command definitions.
//!
//! Each subcommand reads the template catalog from `--templates-dir` and
//! hands the user's selection to the preview engine.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use quilt_preview::Selection;
use quilt_templates::{TemplateLoader, TemplateRegistry};

pub mod list;
pub mod preview;
pub mod validate;

/// quilt - preview projects assembled from several templates
#[derive(Parser)]
#[command(name = "quilt")]
#[command(version, about = "quilt - preview projects assembled from several templates")]
#[command(long_about = r#"
quilt combines independently authored templates (frontend, backend, mobile,
infrastructure, ...) into one project and shows the result before any file
is written.

COMMANDS:
  list      → List templates in the catalog, grouped by category
  validate  → Check a selection for category and dependency problems
  preview   → Show the merged tree, conflicts and warnings

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure (or blocking conflicts with --strict)
  4 - Template error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Clone)]
pub struct GlobalArgs {
    /// Templates directory
    #[arg(long, global = true, env = "QUILT_TEMPLATES_DIR", default_value = "templates")]
    pub templates_dir: PathBuf,
}

impl GlobalArgs {
    pub fn load_registry(&self) -> Result<TemplateRegistry> {
        if !self.templates_dir.exists() {
            bail!("Templates directory not found: {:?}", self.templates_dir);
        }
        TemplateLoader::new(&self.templates_dir)
            .load_all()
            .context("Failed to load templates")
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available templates
    List(list::ListArgs),

    /// Validate a template selection
    Validate(validate::ValidateArgs),

    /// Preview the project a template selection would generate
    Preview(preview::PreviewArgs),
}

/// Resolve template names against the catalog, keeping the given order.
///
/// `options` entries have the form `template:key=value` and become that
/// template's per-selection options.
pub fn resolve_selections(
    registry: &TemplateRegistry,
    names: &[String],
    options: &[String],
) -> Result<Vec<Selection>> {
    let mut per_template: HashMap<String, Vec<(String, String)>> = HashMap::new();
    for raw in options {
        let (template, key, value) = parse_option(raw)?;
        per_template
            .entry(template)
            .or_default()
            .push((key, value));
    }

    for template in per_template.keys() {
        if !names.contains(template) {
            bail!("Option given for template '{}', which is not selected", template);
        }
    }

    names
        .iter()
        .map(|name| {
            let manifest = registry
                .get(name)
                .with_context(|| format!("Template not found in catalog: {}", name))?;
            let mut selection = Selection::new(manifest.template.clone());
            for (key, value) in per_template.get(name).into_iter().flatten() {
                selection = selection.with_option(key, value);
            }
            Ok(selection)
        })
        .collect()
}

fn parse_option(raw: &str) -> Result<(String, String, String)> {
    let (template, assignment) = raw
        .split_once(':')
        .with_context(|| format!("Invalid option '{}', expected template:key=value", raw))?;
    let (key, value) = assignment
        .split_once('=')
        .with_context(|| format!("Invalid option '{}', expected template:key=value", raw))?;
    if template.is_empty() || key.is_empty() {
        bail!("Invalid option '{}', expected template:key=value", raw);
    }
    Ok((template.to_string(), key.to_string(), value.to_string()))
}

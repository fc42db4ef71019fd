//! Preview command - Show what a template selection would generate.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use quilt_preview::{
    format_size, CombinedPreview, ConflictSeverity, DirectoryConflicts, PreviewConfig,
    PreviewManager,
};
use quilt_templates::RegistryProvider;
use tracing::info;

use super::{resolve_selections, GlobalArgs};

#[derive(Args)]
pub struct PreviewArgs {
    /// Templates to combine, in order
    #[arg(short, long = "template", required = true)]
    templates: Vec<String>,

    /// Project name (overrides the config file)
    #[arg(short, long)]
    name: Option<String>,

    /// Preview config file (YAML or TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Per-template option, as template:key=value
    #[arg(short, long = "option")]
    options: Vec<String>,

    /// Do not report directories shared between templates
    #[arg(long)]
    exclude_directories: bool,

    /// Skip category and dependency validation
    #[arg(long)]
    skip_validation: bool,

    /// Fail when any conflict needs manual resolution
    #[arg(long)]
    strict: bool,

    /// Print the preview as JSON
    #[arg(long)]
    json: bool,
}

pub async fn execute(global: &GlobalArgs, args: PreviewArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => PreviewConfig::load(path)?,
        None => PreviewConfig::default(),
    };
    if let Some(name) = &args.name {
        config.project_name = name.clone();
    }
    if args.exclude_directories {
        config.directory_conflicts = DirectoryConflicts::Exclude;
    }
    config.validate()?;

    let registry = global.load_registry()?;
    let selections = resolve_selections(&registry, &args.templates, &args.options)?;

    let manager = PreviewManager::new(Arc::new(RegistryProvider::new(registry)), config);
    if !args.skip_validation {
        manager.validate_selections(&selections)?;
    }

    info!("Previewing {} template(s)", selections.len());
    let preview = manager.combine_selections(&selections).await?;

    if args.json {
        let json = serde_json::to_string_pretty(&preview).context("Failed to serialize preview")?;
        println!("{}", json);
    } else {
        print_preview(&preview);
    }

    if args.strict && preview.has_blocking_conflicts() {
        bail!(
            "{} conflict(s) need manual resolution",
            preview.error_conflicts().count()
        );
    }

    Ok(())
}

fn print_preview(preview: &CombinedPreview) {
    println!("🌳 Project structure");
    for line in preview.structure.render_lines() {
        println!("   {}", line);
    }
    println!();

    println!("📊 Summary");
    println!("   Templates:      {}", preview.template_count());
    println!("   Total files:    {}", preview.total_files);
    println!("   Estimated size: {}", format_size(preview.estimated_size));
    if preview.templated_files > 0 {
        println!("   Templated:      {}", preview.templated_files);
    }
    if preview.executable_files > 0 {
        println!("   Executable:     {}", preview.executable_files);
    }
    println!();

    for skipped in &preview.skipped {
        println!("⚠️  Skipped {}: {}", skipped.template, skipped.reason);
    }

    if !preview.conflicts.is_empty() {
        println!("⚔️  Conflicts");
        for (severity, conflicts) in preview.conflicts_by_severity() {
            let icon = match severity {
                ConflictSeverity::Error => "❌",
                ConflictSeverity::Warning => "⚠️ ",
                ConflictSeverity::Info => "ℹ️ ",
            };
            for conflict in conflicts {
                println!(
                    "   {} {} ({}) - {}",
                    icon,
                    conflict.path,
                    conflict.templates.join(", "),
                    conflict.message
                );
            }
        }
        println!();
    }

    for warning in &preview.warnings {
        println!("⚠️  {}", warning);
    }
}

//! List command - Show the template catalog.

use anyhow::Result;
use clap::Args;
use quilt_templates::TemplateCategory;
use tracing::info;

use super::GlobalArgs;

#[derive(Args)]
pub struct ListArgs {
    /// Only show templates in this category
    #[arg(short, long)]
    category: Option<String>,
}

pub async fn execute(global: &GlobalArgs, args: ListArgs) -> Result<()> {
    let registry = global.load_registry()?;
    info!("Listing {} template(s)", registry.len());

    let categories: Vec<TemplateCategory> = match &args.category {
        Some(name) => {
            let category = TemplateCategory::all()
                .into_iter()
                .find(|c| c.as_str().eq_ignore_ascii_case(name))
                .ok_or_else(|| anyhow::anyhow!("Unknown category option: {}", name))?;
            vec![category]
        }
        None => TemplateCategory::all(),
    };

    if registry.is_empty() {
        println!("⚠️  No templates found in {:?}", global.templates_dir);
        return Ok(());
    }

    for category in categories {
        let templates = registry.by_category(category);
        if templates.is_empty() {
            continue;
        }

        let exclusive = if category.is_exclusive() { " (pick one)" } else { "" };
        println!("📦 {}{}", category, exclusive);
        for manifest in templates {
            let template = &manifest.template;
            print!("   - {} v{}", template.name, template.version);
            if !template.technology.is_empty() {
                print!(" [{}]", template.technology);
            }
            if let Some(description) = &template.description {
                print!(" - {}", description);
            }
            println!();
            if !template.dependencies.is_empty() {
                println!("     requires: {}", template.dependencies.join(", "));
            }
        }
        println!();
    }

    Ok(())
}

//! Manifest acquisition.
//!
//! The combination engine never reads template files itself. It asks a
//! [`ManifestProvider`] for the entries one template would produce for a
//! given project configuration, and treats every failure as a per-template
//! skip.

use std::collections::HashMap;

use async_trait::async_trait;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TemplateError, TemplateResult};
use crate::manifest::{ManifestEntry, TemplateRegistry};

const PLACEHOLDER_PATTERN: &str = r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}";

/// Project-level settings a template is previewed against.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name, exposed to templates as `project_name`
    pub name: String,
    /// Additional variables for path placeholders
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

impl ProjectConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: HashMap::new(),
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// All variables visible to path placeholders, including derived ones.
    pub fn variable_map(&self) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert("project_name".to_string(), self.name.clone());
        vars.insert("project_name_snake".to_string(), to_snake_case(&self.name));
        vars.insert("project_name_kebab".to_string(), to_kebab_case(&self.name));
        vars.extend(self.variables.clone());
        vars
    }
}

/// Aggregate totals for one template's manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSummary {
    pub total_files: usize,
    pub total_directories: usize,
    /// Sum of file sizes in bytes
    pub total_size: u64,
    pub templated_files: usize,
    pub executable_files: usize,
}

impl PreviewSummary {
    pub fn from_entries(entries: &[ManifestEntry]) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            if entry.is_dir() {
                summary.total_directories = summary.total_directories.saturating_add(1);
                continue;
            }
            summary.total_files = summary.total_files.saturating_add(1);
            summary.total_size = summary.total_size.saturating_add(entry.size);
            if entry.templated {
                summary.templated_files = summary.templated_files.saturating_add(1);
            }
            if entry.executable {
                summary.executable_files = summary.executable_files.saturating_add(1);
            }
        }
        summary
    }
}

/// What a single template would produce.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplatePreview {
    pub entries: Vec<ManifestEntry>,
    pub summary: PreviewSummary,
}

impl TemplatePreview {
    /// Build a preview whose summary is computed from the entries.
    pub fn from_entries(entries: Vec<ManifestEntry>) -> Self {
        let summary = PreviewSummary::from_entries(&entries);
        Self { entries, summary }
    }
}

/// Source of per-template manifests.
#[async_trait]
pub trait ManifestProvider: Send + Sync {
    /// Compute the entries `template` would produce for `config`.
    async fn preview_template(
        &self,
        template: &str,
        config: &ProjectConfig,
    ) -> TemplateResult<TemplatePreview>;
}

/// Provider backed by an in-memory template registry.
pub struct RegistryProvider {
    registry: TemplateRegistry,
}

impl RegistryProvider {
    pub fn new(registry: TemplateRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    fn render_path(
        placeholder: &Regex,
        template: &str,
        path: &str,
        vars: &HashMap<String, String>,
    ) -> TemplateResult<String> {
        let mut missing = None;
        let rendered = placeholder.replace_all(path, |caps: &Captures| {
            let name = &caps[1];
            match vars.get(name) {
                Some(value) => value.clone(),
                None => {
                    if missing.is_none() {
                        missing = Some(name.to_string());
                    }
                    String::new()
                }
            }
        });

        match missing {
            Some(variable) => Err(TemplateError::MissingVariable {
                template: template.to_string(),
                variable,
            }),
            None => Ok(rendered.into_owned()),
        }
    }
}

#[async_trait]
impl ManifestProvider for RegistryProvider {
    async fn preview_template(
        &self,
        template: &str,
        config: &ProjectConfig,
    ) -> TemplateResult<TemplatePreview> {
        let manifest = self
            .registry
            .get(template)
            .ok_or_else(|| TemplateError::NotFound(template.to_string()))?;

        let placeholder = Regex::new(PLACEHOLDER_PATTERN)?;
        let vars = config.variable_map();

        let entries = manifest
            .entries
            .iter()
            .map(|entry| {
                let path = Self::render_path(&placeholder, template, &entry.path, &vars)?;
                Ok(ManifestEntry {
                    path,
                    ..entry.clone()
                })
            })
            .collect::<TemplateResult<Vec<_>>>()?;

        debug!("Previewed template '{}': {} entries", template, entries.len());
        Ok(TemplatePreview::from_entries(entries))
    }
}

/// Split a name into words on `-`, `_`, spaces and lower-to-upper case changes.
fn words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in s.chars() {
        if c == '-' || c == '_' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn to_snake_case(s: &str) -> String {
    words(s).join("_")
}

fn to_kebab_case(s: &str) -> String {
    words(s).join("-")
}

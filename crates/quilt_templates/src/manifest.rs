//! Template manifest definitions.
//!
//! A template is described by a single `template.yaml`: its metadata
//! (category, technology, dependencies) followed by the flat list of
//! files and directories it would produce.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Template category.
///
/// Frontend and backend are mutually exclusive within one selection; the
/// remaining categories may be combined freely.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    Frontend,
    Backend,
    Mobile,
    Infrastructure,
    Base,
    #[default]
    #[serde(other)]
    Other,
}

impl TemplateCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateCategory::Frontend => "frontend",
            TemplateCategory::Backend => "backend",
            TemplateCategory::Mobile => "mobile",
            TemplateCategory::Infrastructure => "infrastructure",
            TemplateCategory::Base => "base",
            TemplateCategory::Other => "other",
        }
    }

    /// Whether at most one template of this category may be selected.
    pub fn is_exclusive(&self) -> bool {
        matches!(self, TemplateCategory::Frontend | TemplateCategory::Backend)
    }

    pub fn all() -> Vec<Self> {
        vec![
            TemplateCategory::Frontend,
            TemplateCategory::Backend,
            TemplateCategory::Mobile,
            TemplateCategory::Infrastructure,
            TemplateCategory::Base,
            TemplateCategory::Other,
        ]
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Template metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Template {
    /// Unique template name
    pub name: String,
    /// Template category
    #[serde(default)]
    pub category: TemplateCategory,
    /// Primary technology (e.g., "go", "nextjs", "terraform")
    #[serde(default)]
    pub technology: String,
    /// Template version
    #[serde(default = "default_version")]
    pub version: String,
    /// Short description
    #[serde(default)]
    pub description: Option<String>,
    /// Names of templates this one expects to be selected alongside it
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Tags for filtering
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

impl Template {
    pub fn new(name: impl Into<String>, category: TemplateCategory) -> Self {
        Self {
            name: name.into(),
            category,
            technology: String::new(),
            version: default_version(),
            description: None,
            dependencies: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_technology(mut self, technology: impl Into<String>) -> Self {
        self.technology = technology.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn depends_on(mut self, dependency: impl Into<String>) -> Self {
        self.dependencies.push(dependency.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Kind of a manifest entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    #[default]
    File,
    Directory,
}

/// A single file or directory a template produces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Path relative to the project root, not yet normalized
    pub path: String,
    #[serde(rename = "type", default)]
    pub kind: EntryKind,
    /// Size in bytes (zero for directories)
    #[serde(default)]
    pub size: u64,
    /// Whether the file content goes through variable substitution
    #[serde(default)]
    pub templated: bool,
    #[serde(default)]
    pub executable: bool,
}

impl ManifestEntry {
    pub fn file(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            size,
            templated: false,
            executable: false,
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
            size: 0,
            templated: false,
            executable: false,
        }
    }

    pub fn templated(mut self) -> Self {
        self.templated = true;
        self
    }

    pub fn executable(mut self) -> Self {
        self.executable = true;
        self
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// A template's `template.yaml`: metadata plus the entries it produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    #[serde(flatten)]
    pub template: Template,
    #[serde(default)]
    pub entries: Vec<ManifestEntry>,
}

impl TemplateManifest {
    pub fn new(template: Template) -> Self {
        Self {
            template,
            entries: Vec::new(),
        }
    }

    pub fn with_entry(mut self, entry: ManifestEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn name(&self) -> &str {
        &self.template.name
    }

    /// Check the manifest for problems that make it unusable.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.template.name.trim().is_empty() {
            issues.push("Template name cannot be empty".to_string());
        }

        for entry in &self.entries {
            if entry.path.trim().is_empty() {
                issues.push("Entry with empty path".to_string());
            }
            if entry.is_dir() && entry.size > 0 {
                issues.push(format!("Directory '{}' declares a size", entry.path));
            }
        }

        if self.template.dependencies.contains(&self.template.name) {
            issues.push("Template cannot depend on itself".to_string());
        }

        issues
    }
}

/// Registry of available templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, TemplateManifest>,
    templates_path: PathBuf,
}

impl TemplateRegistry {
    pub fn new(templates_path: PathBuf) -> Self {
        Self {
            templates: HashMap::new(),
            templates_path,
        }
    }

    /// Register a template, replacing any previous one with the same name.
    pub fn register(&mut self, manifest: TemplateManifest) {
        self.templates.insert(manifest.template.name.clone(), manifest);
    }

    pub fn get(&self, name: &str) -> Option<&TemplateManifest> {
        self.templates.get(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// List all registered templates, sorted by name.
    pub fn list(&self) -> Vec<&TemplateManifest> {
        let mut all: Vec<_> = self.templates.values().collect();
        all.sort_by(|a, b| a.template.name.cmp(&b.template.name));
        all
    }

    /// Get templates by category, sorted by name.
    pub fn by_category(&self, category: TemplateCategory) -> Vec<&TemplateManifest> {
        self.list()
            .into_iter()
            .filter(|t| t.template.category == category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Get the path to a template directory.
    pub fn template_path(&self, name: &str) -> PathBuf {
        self.templates_path.join(name)
    }
}

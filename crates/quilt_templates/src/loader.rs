//! Template catalog loading.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{TemplateError, TemplateResult};
use crate::manifest::{TemplateManifest, TemplateRegistry};

const MANIFEST_NAMES: [&str; 2] = ["template.yaml", "template.yml"];

/// Loads a directory of templates, one subdirectory per template.
pub struct TemplateLoader {
    templates_path: PathBuf,
}

impl TemplateLoader {
    pub fn new(templates_path: impl Into<PathBuf>) -> Self {
        Self {
            templates_path: templates_path.into(),
        }
    }

    /// Load all templates from the catalog directory.
    ///
    /// Templates whose manifest cannot be read or parsed are skipped with a
    /// warning; one broken template never hides the rest of the catalog.
    pub fn load_all(&self) -> TemplateResult<TemplateRegistry> {
        let mut registry = TemplateRegistry::new(self.templates_path.clone());

        if !self.templates_path.exists() {
            warn!("Templates directory does not exist: {:?}", self.templates_path);
            return Ok(registry);
        }
        if !self.templates_path.is_dir() {
            return Err(TemplateError::CatalogUnavailable(self.templates_path.clone()));
        }

        for entry in WalkDir::new(&self.templates_path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            match self.load_template(path) {
                Ok(manifest) => {
                    if registry.exists(manifest.name()) {
                        warn!(
                            "Duplicate template name '{}' in {:?}, replacing earlier definition",
                            manifest.name(),
                            path
                        );
                    }
                    info!(
                        "Loaded template: {} ({}, {} entries)",
                        manifest.name(),
                        manifest.template.category,
                        manifest.entries.len()
                    );
                    registry.register(manifest);
                }
                Err(e) => {
                    warn!("Failed to load template from {:?}: {}", path, e);
                }
            }
        }

        Ok(registry)
    }

    /// Load a single template from a directory.
    pub fn load_template(&self, path: &Path) -> TemplateResult<TemplateManifest> {
        let manifest_path = MANIFEST_NAMES
            .iter()
            .map(|name| path.join(name))
            .find(|candidate| candidate.exists())
            .ok_or_else(|| {
                TemplateError::NotFound(format!("No template.yaml found in {:?}", path))
            })?;

        let manifest = self.load_manifest(&manifest_path)?;

        let issues = manifest.validate();
        if !issues.is_empty() {
            return Err(TemplateError::InvalidManifest {
                template: manifest.template.name.clone(),
                message: issues.join("; "),
            });
        }

        Ok(manifest)
    }

    fn load_manifest(&self, path: &Path) -> TemplateResult<TemplateManifest> {
        debug!("Loading manifest from {:?}", path);
        let content = fs::read_to_string(path)?;
        let manifest: TemplateManifest = serde_yaml::from_str(&content)?;
        Ok(manifest)
    }
}

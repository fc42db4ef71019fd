//! Combined preview of several templates.
//!
//! [`PreviewManager`] is the entry point used by the presentation layer:
//! it fetches each selected template's manifest, merges them, detects
//! conflicts and derives warnings, returning one immutable
//! [`CombinedPreview`].

use std::collections::BTreeMap;
use std::sync::Arc;

use quilt_templates::{ManifestProvider, ProjectConfig};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::PreviewConfig;
use crate::conflict::{detect_conflicts, ConflictSeverity, FileConflict};
use crate::error::{PreviewError, PreviewResult};
use crate::merger::{collect_dependencies, ManifestMerger};
use crate::selection::{self, Selection};
use crate::structure::ProjectStructure;
use crate::validator::SelectionValidator;
use crate::warnings::synthesize_warnings;

/// A template whose manifest could not be fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedTemplate {
    pub template: String,
    pub reason: String,
}

/// The merged view of every selected template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedPreview {
    pub project_name: String,
    pub selections: Vec<Selection>,
    pub structure: ProjectStructure,
    /// Most severe first, then by path
    pub conflicts: Vec<FileConflict>,
    /// Declared dependencies of all selected templates, first-seen order
    pub dependencies: Vec<String>,
    /// Sum of per-template sizes; shared paths count once per template
    pub estimated_size: u64,
    /// Sum of per-template file counts; shared paths count once per template
    pub total_files: usize,
    pub total_directories: usize,
    pub templated_files: usize,
    pub executable_files: usize,
    pub skipped: Vec<SkippedTemplate>,
    pub warnings: Vec<String>,
}

impl CombinedPreview {
    #[cfg(test)]
    pub(crate) fn empty(project_name: &str, selections: Vec<Selection>) -> Self {
        Self {
            project_name: project_name.to_string(),
            selections,
            structure: ProjectStructure::new(project_name),
            conflicts: Vec::new(),
            dependencies: Vec::new(),
            estimated_size: 0,
            total_files: 0,
            total_directories: 0,
            templated_files: 0,
            executable_files: 0,
            skipped: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    /// Number of templates that took part in the selection.
    pub fn template_count(&self) -> usize {
        selection::active(&self.selections).len()
    }

    /// Conflicts that must be resolved by hand before generation.
    pub fn error_conflicts(&self) -> impl Iterator<Item = &FileConflict> {
        self.conflicts
            .iter()
            .filter(|c| c.severity == ConflictSeverity::Error)
    }

    pub fn has_blocking_conflicts(&self) -> bool {
        self.error_conflicts().next().is_some()
    }

    /// Conflicts grouped by severity, most severe first.
    pub fn conflicts_by_severity(&self) -> BTreeMap<ConflictSeverity, Vec<&FileConflict>> {
        let mut grouped: BTreeMap<ConflictSeverity, Vec<&FileConflict>> = BTreeMap::new();
        for conflict in &self.conflicts {
            grouped.entry(conflict.severity).or_default().push(conflict);
        }
        grouped
    }
}

/// Combines template selections into previews.
pub struct PreviewManager {
    provider: Arc<dyn ManifestProvider>,
    config: PreviewConfig,
}

impl PreviewManager {
    pub fn new(provider: Arc<dyn ManifestProvider>, config: PreviewConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    /// Check category exclusivity and dependency closure.
    pub fn validate_selections(&self, selections: &[Selection]) -> PreviewResult<()> {
        SelectionValidator::validate(selections)
    }

    /// Build the combined preview for `selections`.
    ///
    /// Manifests are fetched one template at a time in selection order. A
    /// template whose fetch fails is logged, recorded in
    /// [`CombinedPreview::skipped`] and left out of the merge. The only
    /// error is an empty selection.
    pub async fn combine_selections(&self, selections: &[Selection]) -> PreviewResult<CombinedPreview> {
        let active = selection::active(selections);
        if active.is_empty() {
            return Err(PreviewError::NoTemplatesSelected);
        }

        info!(
            "Combining {} template(s) into '{}'",
            active.len(),
            self.config.project_name
        );

        let mut merger = ManifestMerger::new(self.config.project_name.clone());
        let mut skipped = Vec::new();

        for selection in &active {
            let project = ProjectConfig {
                name: self.config.project_name.clone(),
                variables: selection.options.clone(),
            };
            match self.provider.preview_template(selection.name(), &project).await {
                Ok(preview) => {
                    merger = merger.add_template(selection.name(), &preview);
                }
                Err(e) => {
                    warn!("Skipping template '{}': {}", selection.name(), e);
                    skipped.push(SkippedTemplate {
                        template: selection.name().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let dependencies = collect_dependencies(
            active
                .iter()
                .map(|s| s.template.dependencies.as_slice()),
        );

        let outcome = merger.finish();
        let conflicts = detect_conflicts(&outcome.ledger, self.config.directory_conflicts);

        let preview = CombinedPreview {
            project_name: self.config.project_name.clone(),
            selections: selections.to_vec(),
            structure: outcome.structure,
            conflicts,
            dependencies,
            estimated_size: outcome.totals.estimated_size,
            total_files: outcome.totals.total_files,
            total_directories: outcome.totals.total_directories,
            templated_files: outcome.totals.templated_files,
            executable_files: outcome.totals.executable_files,
            skipped,
            warnings: Vec::new(),
        };

        let warnings = synthesize_warnings(&preview, &self.config);
        let preview = preview.with_warnings(warnings);

        info!(
            "Preview ready: {} files, {} conflict(s), {} warning(s)",
            preview.structure.files.len(),
            preview.conflicts.len(),
            preview.warnings.len()
        );
        Ok(preview)
    }
}

//! Selection validation: category exclusivity and dependency closure.

use std::collections::BTreeMap;

use quilt_templates::TemplateCategory;
use tracing::debug;

use crate::error::{PreviewError, PreviewResult};
use crate::selection::{self, Selection};

/// Validates a selection list as a whole. Pure; does not need manifests.
pub struct SelectionValidator;

impl SelectionValidator {
    /// Return the first violation found, checking in order:
    /// non-empty selection, category exclusivity, dependency closure.
    pub fn validate(selections: &[Selection]) -> PreviewResult<()> {
        let active = selection::active(selections);
        if active.is_empty() {
            return Err(PreviewError::NoTemplatesSelected);
        }

        Self::check_categories(&active)?;
        Self::check_dependencies(&active)?;

        debug!("Validated {} template selection(s)", active.len());
        Ok(())
    }

    fn check_categories(active: &[&Selection]) -> PreviewResult<()> {
        let mut by_category: BTreeMap<TemplateCategory, Vec<String>> = BTreeMap::new();
        for selection in active {
            by_category
                .entry(selection.category())
                .or_default()
                .push(selection.name().to_string());
        }

        // BTreeMap order follows the enum: frontend is reported before backend.
        for (category, templates) in by_category {
            if category.is_exclusive() && templates.len() > 1 {
                return Err(PreviewError::CategoryConflict { category, templates });
            }
        }
        Ok(())
    }

    fn check_dependencies(active: &[&Selection]) -> PreviewResult<()> {
        for selection in active {
            for dependency in &selection.template.dependencies {
                let satisfied = active
                    .iter()
                    .any(|other| other.name() != selection.name() && other.name() == dependency);
                if !satisfied {
                    return Err(PreviewError::DependencyUnsatisfied {
                        template: selection.name().to_string(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

//! Conflict detection and classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::DirectoryConflicts;
use crate::merger::ContributionLedger;

const CODE_EXTENSIONS: [&str; 3] = [".go", ".js", ".ts"];
const DOC_EXTENSIONS: [&str; 2] = [".md", ".txt"];

/// How serious a conflict is. Ordered most severe first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ConflictSeverity {
    /// Needs manual resolution before generation
    Error,
    Warning,
    Info,
}

impl ConflictSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictSeverity::Error => "error",
            ConflictSeverity::Warning => "warning",
            ConflictSeverity::Info => "info",
        }
    }
}

impl fmt::Display for ConflictSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A path claimed by more than one selected template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileConflict {
    pub path: String,
    /// Every contributor, in selection order
    pub templates: Vec<String>,
    pub severity: ConflictSeverity,
    pub message: String,
    pub resolvable: bool,
}

impl FileConflict {
    /// Classify a shared path by its suffix.
    pub fn classify(path: &str, templates: Vec<String>) -> Self {
        let (severity, message, resolvable) = if has_suffix(path, &CODE_EXTENSIONS) {
            (
                ConflictSeverity::Error,
                "Code file conflict - manual resolution required".to_string(),
                false,
            )
        } else if has_suffix(path, &DOC_EXTENSIONS) {
            (
                ConflictSeverity::Info,
                "Documentation file will be merged".to_string(),
                true,
            )
        } else {
            (
                ConflictSeverity::Warning,
                format!("File created by multiple templates: {}", templates.join(", ")),
                true,
            )
        };

        Self {
            path: path.to_string(),
            templates,
            severity,
            message,
            resolvable,
        }
    }
}

fn has_suffix(path: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| path.ends_with(suffix))
}

/// Emit one conflict per shared ledger path, most severe first.
///
/// Within a severity, conflicts are ordered by ascending path.
pub fn detect_conflicts(ledger: &ContributionLedger, directories: DirectoryConflicts) -> Vec<FileConflict> {
    let mut conflicts: Vec<FileConflict> = ledger
        .shared()
        .filter(|(_, c)| directories == DirectoryConflicts::Include || c.has_file)
        .map(|(path, c)| FileConflict::classify(path, c.templates.clone()))
        .collect();

    // The ledger yields paths in ascending order; a stable sort keeps that within a severity.
    conflicts.sort_by_key(|c| c.severity);
    conflicts
}

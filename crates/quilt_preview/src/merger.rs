//! Manifest merging.
//!
//! [`ManifestMerger`] folds template previews, in selection order, into a
//! single [`ProjectStructure`] plus a contribution ledger recording every
//! template that claimed each path.

use std::collections::{BTreeMap, HashSet};

use quilt_templates::{EntryKind, TemplatePreview};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::structure::{DirectoryNode, FileNode, ProjectStructure};

/// Normalize a template-relative path so equivalent spellings collide.
///
/// Backslashes become `/`, empty and `.` segments are dropped, `..` pops
/// the previous segment (never above the project root), and leading or
/// trailing separators are removed. The root itself normalizes to `""`.
pub fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split(|c: char| c == '/' || c == '\\') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Contributors recorded for one path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// Template names in selection order, each at most once
    pub templates: Vec<String>,
    /// Whether any contributor declared this path as a file
    pub has_file: bool,
}

/// Path → contributing templates, used only for conflict detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionLedger {
    entries: BTreeMap<String, Contribution>,
}

impl ContributionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `template` produces `path`.
    pub fn record(&mut self, path: &str, template: &str, kind: EntryKind) {
        let contribution = self.entries.entry(path.to_string()).or_default();
        if !contribution.templates.iter().any(|t| t == template) {
            contribution.templates.push(template.to_string());
        }
        if kind == EntryKind::File {
            contribution.has_file = true;
        }
    }

    pub fn get(&self, path: &str) -> Option<&Contribution> {
        self.entries.get(path)
    }

    /// Entries in ascending path order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Contribution)> {
        self.entries.iter()
    }

    /// Paths claimed by more than one template, in ascending path order.
    pub fn shared(&self) -> impl Iterator<Item = (&String, &Contribution)> {
        self.entries.iter().filter(|(_, c)| c.templates.len() > 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Aggregate totals across merged templates.
///
/// Totals are sums of each template's own summary, so a path shared by two
/// templates is counted twice. This is an intentional approximation: the
/// estimate errs on the high side instead of recounting merged entries.
/// Sums saturate at the integer maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeTotals {
    pub estimated_size: u64,
    pub total_files: usize,
    pub total_directories: usize,
    pub templated_files: usize,
    pub executable_files: usize,
}

/// Everything the merge stage produces.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub structure: ProjectStructure,
    pub ledger: ContributionLedger,
    pub totals: MergeTotals,
}

/// Builder that merges template previews one at a time.
#[derive(Debug, Clone)]
pub struct ManifestMerger {
    structure: ProjectStructure,
    ledger: ContributionLedger,
    totals: MergeTotals,
    merged: Vec<String>,
}

impl ManifestMerger {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            structure: ProjectStructure::new(project_name),
            ledger: ContributionLedger::new(),
            totals: MergeTotals::default(),
            merged: Vec::new(),
        }
    }

    /// Merge one template's preview.
    ///
    /// A path already present keeps the node (and source) of the first
    /// template that created it; later templates only add themselves to
    /// the ledger.
    pub fn add_template(mut self, template: &str, preview: &TemplatePreview) -> Self {
        let mut added = 0usize;

        for entry in &preview.entries {
            let path = normalize_path(&entry.path);
            if path.is_empty() {
                debug!(
                    "Template '{}' lists the project root ({:?}), ignoring",
                    template, entry.path
                );
                continue;
            }

            self.ledger.record(&path, template, entry.kind);

            match entry.kind {
                EntryKind::Directory => {
                    if !self.structure.directories.contains_key(&path) {
                        let node = DirectoryNode::new(path.clone(), template);
                        self.structure.directories.insert(path, node);
                        added += 1;
                    }
                }
                EntryKind::File => {
                    if !self.structure.files.contains_key(&path) {
                        let node = FileNode {
                            size: entry.size,
                            templated: entry.templated,
                            executable: entry.executable,
                            ..FileNode::new(path.clone(), template)
                        };
                        self.structure.files.insert(path, node);
                        added += 1;
                    }
                }
            }
        }

        let summary = &preview.summary;
        self.totals.estimated_size = self.totals.estimated_size.saturating_add(summary.total_size);
        self.totals.total_files = self.totals.total_files.saturating_add(summary.total_files);
        self.totals.total_directories = self.totals.total_directories.saturating_add(summary.total_directories);
        self.totals.templated_files = self.totals.templated_files.saturating_add(summary.templated_files);
        self.totals.executable_files = self.totals.executable_files.saturating_add(summary.executable_files);
        self.merged.push(template.to_string());

        debug!(
            "Merged template '{}': {} of {} entries new",
            template,
            added,
            preview.entries.len()
        );
        self
    }

    /// Names of the templates merged so far, in merge order.
    pub fn merged_templates(&self) -> &[String] {
        &self.merged
    }

    /// Finish merging and build the directory tree.
    pub fn finish(mut self) -> MergeOutcome {
        self.structure.build_tree();
        MergeOutcome {
            structure: self.structure,
            ledger: self.ledger,
            totals: self.totals,
        }
    }
}

/// Union of declared dependencies, de-duplicated in first-seen order.
pub fn collect_dependencies<'a, I>(dependency_lists: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut seen = HashSet::new();
    let mut dependencies = Vec::new();
    for list in dependency_lists {
        for dep in list {
            if seen.insert(dep.as_str()) {
                dependencies.push(dep.clone());
            }
        }
    }
    dependencies
}

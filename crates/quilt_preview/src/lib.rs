//! # quilt_preview
//!
//! Template combination engine for quilt.
//!
//! Given an ordered list of template selections, this crate previews the
//! project they would generate together, before anything touches disk:
//!
//! - **Merger**: folds per-template manifests into one path-keyed structure
//! - **Conflicts**: classifies paths claimed by several templates
//! - **Validator**: category exclusivity and dependency closure
//! - **Structure**: sorted directory tree over the merged paths
//! - **Warnings**: size, file count, dependency and conflict advisories
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use quilt_preview::{PreviewConfig, PreviewManager, Selection};
//! use quilt_templates::{RegistryProvider, TemplateLoader};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let registry = TemplateLoader::new("templates").load_all()?;
//! let selections: Vec<Selection> = registry
//!     .list()
//!     .into_iter()
//!     .map(|m| Selection::new(m.template.clone()))
//!     .collect();
//!
//! let manager = PreviewManager::new(
//!     Arc::new(RegistryProvider::new(registry)),
//!     PreviewConfig::new("my-app"),
//! );
//! manager.validate_selections(&selections)?;
//! let preview = manager.combine_selections(&selections).await?;
//!
//! for line in preview.structure.render_lines() {
//!     println!("{}", line);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod conflict;
pub mod error;
pub mod merger;
pub mod preview;
pub mod selection;
pub mod structure;
pub mod validator;
pub mod warnings;

pub use config::{DirectoryConflicts, PreviewConfig};
pub use conflict::{detect_conflicts, ConflictSeverity, FileConflict};
pub use error::{PreviewError, PreviewResult};
pub use merger::{normalize_path, ContributionLedger, ManifestMerger, MergeOutcome, MergeTotals};
pub use preview::{CombinedPreview, PreviewManager, SkippedTemplate};
pub use selection::Selection;
pub use structure::{DirectoryNode, FileNode, ProjectStructure};
pub use validator::SelectionValidator;
pub use warnings::{format_size, synthesize_warnings};

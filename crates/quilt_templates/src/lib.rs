//! # quilt_templates
//!
//! Template catalog for quilt.
//!
//! This crate owns everything the combination engine consumes but never
//! computes itself:
//!
//! - Template metadata (name, category, dependencies, tags)
//! - The on-disk catalog of `template.yaml` manifests
//! - The [`ManifestProvider`] boundary that turns a template name and a
//!   project configuration into a concrete list of manifest entries
//!
//! ## Example
//!
//! ```rust,no_run
//! use quilt_templates::{ManifestProvider, ProjectConfig, RegistryProvider, TemplateLoader};
//!
//! # async fn run() -> quilt_templates::TemplateResult<()> {
//! let registry = TemplateLoader::new("templates").load_all()?;
//! let provider = RegistryProvider::new(registry);
//!
//! let config = ProjectConfig::new("my-app");
//! let preview = provider.preview_template("go-backend", &config).await?;
//! println!("{} files", preview.summary.total_files);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;
pub mod manifest;
pub mod provider;

pub use error::{TemplateError, TemplateResult};
pub use loader::TemplateLoader;
pub use manifest::{
    EntryKind, ManifestEntry, Template, TemplateCategory, TemplateManifest, TemplateRegistry,
};
pub use provider::{
    ManifestProvider, PreviewSummary, ProjectConfig, RegistryProvider, TemplatePreview,
};

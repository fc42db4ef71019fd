//! Error types for selection validation and preview combination.

use std::path::PathBuf;

use quilt_templates::TemplateCategory;
use thiserror::Error;

/// Result type alias for preview operations.
pub type PreviewResult<T> = Result<T, PreviewError>;

/// Errors that stop a combination request.
///
/// File conflicts are not errors: they are reported as data on the
/// successful preview.
#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("no templates selected")]
    NoTemplatesSelected,

    #[error("only one {category} template can be selected, got: {}", .templates.join(", "))]
    CategoryConflict {
        category: TemplateCategory,
        templates: Vec<String>,
    },

    #[error("template '{template}' requires '{dependency}', which is not selected")]
    DependencyUnsatisfied { template: String, dependency: String },

    #[error("Failed to read preview config {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid preview config: {0}")]
    InvalidConfig(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

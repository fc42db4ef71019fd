//! Error types for templates.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur while loading or previewing templates.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Invalid manifest in template {template}: {message}")]
    InvalidManifest { template: String, message: String },

    #[error("Template catalog directory not readable: {0:?}")]
    CatalogUnavailable(PathBuf),

    #[error("Variable not provided for template {template}: {variable}")]
    MissingVariable { template: String, variable: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid placeholder pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

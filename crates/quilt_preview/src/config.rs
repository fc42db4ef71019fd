//! Preview configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PreviewError, PreviewResult};

/// 100 MiB.
pub const DEFAULT_SIZE_WARNING_BYTES: u64 = 100 * 1024 * 1024;
pub const DEFAULT_FILE_WARNING_COUNT: usize = 1000;

/// Whether paths only ever created as directories take part in conflict detection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryConflicts {
    /// Shared directories are reported like any other shared path.
    #[default]
    Include,
    /// Only paths at least one template creates as a file are reported.
    Exclude,
}

/// Settings for a combination request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviewConfig {
    /// Name of the generated project, used for the tree root
    #[serde(default = "default_project_name")]
    pub project_name: String,
    /// Estimated size above which a warning is emitted
    #[serde(default = "default_size_warning_bytes")]
    pub size_warning_bytes: u64,
    /// File count above which a warning is emitted
    #[serde(default = "default_file_warning_count")]
    pub file_warning_count: usize,
    #[serde(default)]
    pub directory_conflicts: DirectoryConflicts,
}

fn default_project_name() -> String {
    "project".to_string()
}

fn default_size_warning_bytes() -> u64 {
    DEFAULT_SIZE_WARNING_BYTES
}

fn default_file_warning_count() -> usize {
    DEFAULT_FILE_WARNING_COUNT
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            project_name: default_project_name(),
            size_warning_bytes: DEFAULT_SIZE_WARNING_BYTES,
            file_warning_count: DEFAULT_FILE_WARNING_COUNT,
            directory_conflicts: DirectoryConflicts::default(),
        }
    }
}

impl PreviewConfig {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ..Self::default()
        }
    }

    /// Load a config file; `.toml` files are read as TOML, anything else as YAML.
    pub fn load(path: &Path) -> PreviewResult<Self> {
        debug!("Loading preview config from {:?}", path);
        let content = fs::read_to_string(path).map_err(|source| PreviewError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PreviewResult<()> {
        if self.project_name.trim().is_empty() {
            return Err(PreviewError::InvalidConfig(
                "project_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn size_warning_bytes(mut self, bytes: u64) -> Self {
        self.size_warning_bytes = bytes;
        self
    }

    pub fn file_warning_count(mut self, count: usize) -> Self {
        self.file_warning_count = count;
        self
    }

    pub fn directory_conflicts(mut self, policy: DirectoryConflicts) -> Self {
        self.directory_conflicts = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = PreviewConfig::default();
        assert_eq!(config.size_warning_bytes, 104_857_600);
        assert_eq!(config.file_warning_count, 1000);
        assert_eq!(config.directory_conflicts, DirectoryConflicts::Include);
    }

    #[test]
    fn test_load_yaml_with_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("preview.yaml");
        fs::write(&path, "project_name: shop\ndirectory_conflicts: exclude\n").unwrap();

        let config = PreviewConfig::load(&path).unwrap();
        assert_eq!(config.project_name, "shop");
        assert_eq!(config.directory_conflicts, DirectoryConflicts::Exclude);
        assert_eq!(config.file_warning_count, DEFAULT_FILE_WARNING_COUNT);
    }

    #[test]
    fn test_load_toml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("preview.toml");
        fs::write(&path, "project_name = \"shop\"\nfile_warning_count = 50\n").unwrap();

        let config = PreviewConfig::load(&path).unwrap();
        assert_eq!(config.file_warning_count, 50);
        assert_eq!(config.size_warning_bytes, DEFAULT_SIZE_WARNING_BYTES);
    }

    #[test]
    fn test_load_rejects_empty_name() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("preview.yaml");
        fs::write(&path, "project_name: \"  \"\n").unwrap();

        assert!(matches!(
            PreviewConfig::load(&path),
            Err(PreviewError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = tempdir().unwrap();
        assert!(matches!(
            PreviewConfig::load(&temp.path().join("absent.yaml")),
            Err(PreviewError::ConfigIo { .. })
        ));
    }
}

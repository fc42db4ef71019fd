//! Human-readable advisories derived from a combined preview.

use std::collections::HashSet;

use crate::config::PreviewConfig;
use crate::conflict::ConflictSeverity;
use crate::preview::CombinedPreview;

/// Format a byte count with binary (1024-based) units.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Derive warnings from merge and conflict results. Every rule fires
/// independently.
pub fn synthesize_warnings(preview: &CombinedPreview, config: &PreviewConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    let selected: HashSet<&str> = preview
        .selections
        .iter()
        .filter(|s| s.selected)
        .map(|s| s.name())
        .collect();
    for dependency in &preview.dependencies {
        if !selected.contains(dependency.as_str()) {
            warnings.push(format!(
                "Dependency '{}' is required but not selected",
                dependency
            ));
        }
    }

    if preview.estimated_size > config.size_warning_bytes {
        let size = format_size(preview.estimated_size);
        let limit = format_size(config.size_warning_bytes);
        // Rounding can make both sides read the same; fall back to exact byte counts.
        let warning = if size == limit {
            format!(
                "Large project size: {} ({} bytes) exceeds {} ({} bytes)",
                size, preview.estimated_size, limit, config.size_warning_bytes
            )
        } else {
            format!("Large project size: {} exceeds {}", size, limit)
        };
        warnings.push(warning);
    }

    if preview.total_files > config.file_warning_count {
        warnings.push(format!(
            "Large number of files: {} exceeds {}",
            preview.total_files, config.file_warning_count
        ));
    }

    let blocking = preview
        .conflicts
        .iter()
        .filter(|c| c.severity == ConflictSeverity::Error)
        .count();
    if blocking > 0 {
        warnings.push(format!(
            "{} file conflict(s) requiring manual resolution",
            blocking
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::FileConflict;
    use crate::selection::Selection;
    use quilt_templates::{Template, TemplateCategory};

    fn preview_with(selections: Vec<Selection>) -> CombinedPreview {
        CombinedPreview::empty("p", selections)
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(120 * 1024 * 1024), "120.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn test_no_warnings_for_small_clean_preview() {
        let preview = preview_with(vec![Selection::new(Template::new("a", TemplateCategory::Base))]);
        assert!(synthesize_warnings(&preview, &PreviewConfig::default()).is_empty());
    }

    #[test]
    fn test_unselected_dependency() {
        let mut preview = preview_with(vec![
            Selection::new(Template::new("api", TemplateCategory::Backend)),
            Selection::new(Template::new("proto", TemplateCategory::Base)).deselected(),
        ]);
        preview.dependencies = vec!["proto".to_string(), "api".to_string()];

        let warnings = synthesize_warnings(&preview, &PreviewConfig::default());
        assert_eq!(warnings, vec!["Dependency 'proto' is required but not selected"]);
    }

    #[test]
    fn test_size_and_count_thresholds_are_exclusive() {
        let mut preview = preview_with(Vec::new());
        preview.estimated_size = 100 * 1024 * 1024;
        preview.total_files = 1000;
        assert!(synthesize_warnings(&preview, &PreviewConfig::default()).is_empty());

        preview.estimated_size += 1;
        preview.total_files += 1;
        let warnings = synthesize_warnings(&preview, &PreviewConfig::default());
        assert_eq!(warnings.len(), 2);
        assert_eq!(
            warnings[0],
            "Large project size: 100.0 MB (104857601 bytes) exceeds 100.0 MB (104857600 bytes)"
        );
        assert!(warnings[1].contains("1001"));
    }

    #[test]
    fn test_error_conflicts_counted_once() {
        let mut preview = preview_with(Vec::new());
        let pair = || vec!["a".to_string(), "b".to_string()];
        preview.conflicts = vec![
            FileConflict::classify("main.go", pair()),
            FileConflict::classify("app.ts", pair()),
            FileConflict::classify("README.md", pair()),
        ];

        let warnings = synthesize_warnings(&preview, &PreviewConfig::default());
        assert_eq!(warnings, vec!["2 file conflict(s) requiring manual resolution"]);
    }
}

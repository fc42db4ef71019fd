//! User template selections.

use std::collections::HashMap;

use quilt_templates::{Template, TemplateCategory};
use serde::{Deserialize, Serialize};

/// A template the user picked, with its per-template options.
///
/// Selection order is significant and is never re-sorted: it decides the
/// order of contributors in conflict reports and which template a shared
/// path is attributed to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Selection {
    pub template: Template,
    #[serde(default = "default_selected")]
    pub selected: bool,
    #[serde(default)]
    pub options: HashMap<String, String>,
}

fn default_selected() -> bool {
    true
}

impl Selection {
    pub fn new(template: Template) -> Self {
        Self {
            template,
            selected: true,
            options: HashMap::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn deselected(mut self) -> Self {
        self.selected = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.template.name
    }

    pub fn category(&self) -> TemplateCategory {
        self.template.category
    }
}

/// The selections that are actually chosen, in their original order.
pub fn active(selections: &[Selection]) -> Vec<&Selection> {
    selections.iter().filter(|s| s.selected).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_preserves_order() {
        let selections = vec![
            Selection::new(Template::new("web", TemplateCategory::Frontend)),
            Selection::new(Template::new("api", TemplateCategory::Backend)).deselected(),
            Selection::new(Template::new("infra", TemplateCategory::Infrastructure)),
        ];

        let names: Vec<_> = active(&selections).iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["web", "infra"]);
    }

    #[test]
    fn test_selected_defaults_to_true() {
        let selection: Selection =
            serde_yaml::from_str("template:\n  name: api\n  category: backend\n").unwrap();
        assert!(selection.selected);
        assert_eq!(selection.category(), TemplateCategory::Backend);
    }
}

//! Integration tests for template combination.

use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

use async_trait::async_trait;
use quilt_preview::{
    ConflictSeverity, DirectoryConflicts, PreviewConfig, PreviewError, PreviewManager, Selection,
};
use quilt_templates::{
    ManifestEntry, ManifestProvider, PreviewSummary, ProjectConfig, RegistryProvider, Template,
    TemplateCategory, TemplateError, TemplateLoader, TemplatePreview, TemplateResult,
};
use tempfile::tempdir;

/// Provider serving fixed previews by template name.
#[derive(Default)]
struct StaticProvider {
    previews: HashMap<String, TemplatePreview>,
}

impl StaticProvider {
    fn with(mut self, name: &str, entries: Vec<ManifestEntry>) -> Self {
        self.previews
            .insert(name.to_string(), TemplatePreview::from_entries(entries));
        self
    }

    fn with_summary(mut self, name: &str, summary: PreviewSummary) -> Self {
        self.previews.insert(
            name.to_string(),
            TemplatePreview {
                entries: Vec::new(),
                summary,
            },
        );
        self
    }
}

#[async_trait]
impl ManifestProvider for StaticProvider {
    async fn preview_template(
        &self,
        template: &str,
        _config: &ProjectConfig,
    ) -> TemplateResult<TemplatePreview> {
        self.previews
            .get(template)
            .cloned()
            .ok_or_else(|| TemplateError::NotFound(template.to_string()))
    }
}

fn select(name: &str, category: TemplateCategory) -> Selection {
    Selection::new(Template::new(name, category))
}

fn manager(provider: StaticProvider) -> PreviewManager {
    PreviewManager::new(Arc::new(provider), PreviewConfig::new("demo"))
}

#[tokio::test]
async fn test_backend_and_frontend_share_readme() {
    let provider = StaticProvider::default()
        .with(
            "go-backend",
            vec![ManifestEntry::file("main.go", 200), ManifestEntry::file("README.md", 50)],
        )
        .with(
            "nextjs-frontend",
            vec![ManifestEntry::file("README.md", 80), ManifestEntry::file("index.html", 120)],
        );

    let preview = manager(provider)
        .combine_selections(&[
            select("go-backend", TemplateCategory::Backend),
            select("nextjs-frontend", TemplateCategory::Frontend),
        ])
        .await
        .unwrap();

    let files = &preview.structure.files;
    assert_eq!(files["main.go"].source, "go-backend");
    assert_eq!(files["index.html"].source, "nextjs-frontend");
    assert_eq!(files["README.md"].source, "go-backend");

    assert_eq!(preview.conflicts.len(), 1);
    let conflict = &preview.conflicts[0];
    assert_eq!(conflict.path, "README.md");
    assert_eq!(conflict.severity, ConflictSeverity::Info);
    assert_eq!(conflict.templates, vec!["go-backend", "nextjs-frontend"]);
    assert!(preview.warnings.is_empty());
}

#[tokio::test]
async fn test_shared_code_file_is_blocking() {
    let provider = StaticProvider::default()
        .with("a", vec![ManifestEntry::file("cmd/main.go", 10)])
        .with("b", vec![ManifestEntry::file("cmd//main.go", 10)]);

    let preview = manager(provider)
        .combine_selections(&[
            select("a", TemplateCategory::Backend),
            select("b", TemplateCategory::Other),
        ])
        .await
        .unwrap();

    assert_eq!(preview.conflicts.len(), 1);
    assert_eq!(preview.conflicts[0].path, "cmd/main.go");
    assert_eq!(preview.conflicts[0].severity, ConflictSeverity::Error);
    assert!(!preview.conflicts[0].resolvable);
    assert!(preview.has_blocking_conflicts());
    assert_eq!(
        preview.warnings,
        vec!["1 file conflict(s) requiring manual resolution"]
    );
}

#[tokio::test]
async fn test_contributors_keep_selection_order() {
    let provider = StaticProvider::default()
        .with("zeta", vec![ManifestEntry::file("Makefile", 1)])
        .with("alpha", vec![ManifestEntry::file("Makefile", 1)])
        .with("mid", vec![ManifestEntry::file("./Makefile", 1)]);

    let preview = manager(provider)
        .combine_selections(&[
            select("zeta", TemplateCategory::Base),
            select("alpha", TemplateCategory::Base),
            select("mid", TemplateCategory::Base),
        ])
        .await
        .unwrap();

    assert_eq!(preview.conflicts.len(), 1);
    assert_eq!(preview.conflicts[0].templates, vec!["zeta", "alpha", "mid"]);
    assert_eq!(preview.conflicts[0].severity, ConflictSeverity::Warning);
    assert_eq!(
        preview.conflicts[0].message,
        "File created by multiple templates: zeta, alpha, mid"
    );
}

#[tokio::test]
async fn test_conflicts_sorted_by_severity() {
    let shared = vec![
        ManifestEntry::file("docs/guide.md", 1),
        ManifestEntry::file("docker-compose.yml", 1),
        ManifestEntry::file("src/index.ts", 1),
        ManifestEntry::file("NOTES.txt", 1),
        ManifestEntry::file("main.go", 1),
    ];
    let provider = StaticProvider::default()
        .with("a", shared.clone())
        .with("b", shared);

    let preview = manager(provider)
        .combine_selections(&[
            select("a", TemplateCategory::Frontend),
            select("b", TemplateCategory::Backend),
        ])
        .await
        .unwrap();

    let order: Vec<_> = preview
        .conflicts
        .iter()
        .map(|c| (c.severity, c.path.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            (ConflictSeverity::Error, "main.go"),
            (ConflictSeverity::Error, "src/index.ts"),
            (ConflictSeverity::Warning, "docker-compose.yml"),
            (ConflictSeverity::Info, "NOTES.txt"),
            (ConflictSeverity::Info, "docs/guide.md"),
        ]
    );
}

#[tokio::test]
async fn test_unselected_dependency_warns() {
    let provider = StaticProvider::default().with("api", vec![ManifestEntry::file("main.go", 1)]);
    let selections = vec![Selection::new(
        Template::new("api", TemplateCategory::Backend).depends_on("shared-proto"),
    )];
    let manager = manager(provider);

    let err = manager.validate_selections(&selections).unwrap_err();
    assert!(matches!(err, PreviewError::DependencyUnsatisfied { .. }));
    assert!(err.to_string().contains("api"));
    assert!(err.to_string().contains("shared-proto"));

    let preview = manager.combine_selections(&selections).await.unwrap();
    assert_eq!(preview.dependencies, vec!["shared-proto"]);
    assert_eq!(
        preview.warnings,
        vec!["Dependency 'shared-proto' is required but not selected"]
    );
}

#[tokio::test]
async fn test_two_backends_fail_validation() {
    let manager = manager(StaticProvider::default());
    let err = manager
        .validate_selections(&[
            select("backend-gin", TemplateCategory::Backend),
            select("backend-echo", TemplateCategory::Backend),
        ])
        .unwrap_err();
    assert!(err.to_string().contains("backend"));
}

#[tokio::test]
async fn test_large_template_warns_about_size() {
    let provider = StaticProvider::default().with_summary(
        "assets",
        PreviewSummary {
            total_files: 10,
            total_size: 120 * 1024 * 1024,
            ..PreviewSummary::default()
        },
    );

    let preview = manager(provider)
        .combine_selections(&[select("assets", TemplateCategory::Other)])
        .await
        .unwrap();

    assert_eq!(preview.estimated_size, 120 * 1024 * 1024);
    assert_eq!(preview.warnings.len(), 1);
    assert!(preview.warnings[0].contains("120.0 MB"));
    assert!(preview.warnings[0].contains("100.0 MB"));
}

#[tokio::test]
async fn test_directory_conflicts_policy() {
    let provider = || {
        StaticProvider::default()
            .with("a", vec![ManifestEntry::directory("docs")])
            .with("b", vec![ManifestEntry::directory("docs")])
    };
    let selections = [
        select("a", TemplateCategory::Base),
        select("b", TemplateCategory::Base),
    ];

    let included = manager(provider())
        .combine_selections(&selections)
        .await
        .unwrap();
    assert_eq!(included.conflicts.len(), 1);
    assert_eq!(included.conflicts[0].severity, ConflictSeverity::Warning);

    let excluded = PreviewManager::new(
        Arc::new(provider()),
        PreviewConfig::new("demo").directory_conflicts(DirectoryConflicts::Exclude),
    )
    .combine_selections(&selections)
    .await
    .unwrap();
    assert!(excluded.conflicts.is_empty());
}

#[tokio::test]
async fn test_tree_independent_of_selection_order() {
    let provider = || {
        StaticProvider::default()
            .with(
                "a",
                vec![
                    ManifestEntry::directory("src"),
                    ManifestEntry::file("src/z.rs", 1),
                    ManifestEntry::file("Cargo.toml", 1),
                ],
            )
            .with(
                "b",
                vec![
                    ManifestEntry::directory("src"),
                    ManifestEntry::file("src/a.rs", 1),
                    ManifestEntry::directory("assets"),
                ],
            )
    };

    let forward = manager(provider())
        .combine_selections(&[select("a", TemplateCategory::Base), select("b", TemplateCategory::Base)])
        .await
        .unwrap();
    let reverse = manager(provider())
        .combine_selections(&[select("b", TemplateCategory::Base), select("a", TemplateCategory::Base)])
        .await
        .unwrap();

    assert_eq!(forward.structure.render_lines(), reverse.structure.render_lines());
    assert_eq!(forward.structure.root.children, vec!["assets", "src"]);
    assert_eq!(forward.structure.directories["src"].files, vec!["src/a.rs", "src/z.rs"]);
    assert_eq!(forward.structure.directories["src"].source, "a");
    assert_eq!(reverse.structure.directories["src"].source, "b");
}

#[tokio::test]
async fn test_catalog_end_to_end() {
    let temp = tempdir().unwrap();
    let write = |dir: &str, yaml: &str| {
        let path = temp.path().join(dir);
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("template.yaml"), yaml).unwrap();
    };
    write(
        "go-backend",
        r#"
name: go-backend
category: backend
technology: go
dependencies: [shared-proto]
entries:
  - path: cmd/{{project_name}}
    type: directory
  - path: cmd/{{project_name}}/main.go
    size: 2048
    templated: true
  - path: README.md
    size: 100
"#,
    );
    write(
        "shared-proto",
        r#"
name: shared-proto
category: base
entries:
  - path: proto
    type: directory
  - path: proto/api.proto
    size: 300
  - path: README.md
    size: 40
"#,
    );

    let registry = TemplateLoader::new(temp.path()).load_all().unwrap();
    let selections: Vec<Selection> = ["go-backend", "shared-proto"]
        .iter()
        .map(|name| Selection::new(registry.get(name).unwrap().template.clone()))
        .collect();

    let manager = PreviewManager::new(
        Arc::new(RegistryProvider::new(registry)),
        PreviewConfig::new("shop"),
    );
    manager.validate_selections(&selections).unwrap();
    let preview = manager.combine_selections(&selections).await.unwrap();

    assert!(preview.structure.files.contains_key("cmd/shop/main.go"));
    assert_eq!(preview.total_files, 4);
    assert_eq!(preview.templated_files, 1);
    assert_eq!(preview.estimated_size, 2488);
    assert_eq!(preview.conflicts.len(), 1);
    assert_eq!(preview.conflicts[0].path, "README.md");
    assert!(preview.warnings.is_empty());
    assert_eq!(
        preview.structure.render_lines(),
        vec![
            "shop/",
            "|-- proto/",
            "|   `-- api.proto",
            "|-- cmd/shop/",
            "|   `-- main.go",
            "`-- README.md",
        ]
    );

    let json = serde_json::to_value(&preview).unwrap();
    assert_eq!(json["conflicts"][0]["severity"], "info");
}

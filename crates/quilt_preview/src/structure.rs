//! Merged project structure and its directory tree.
//!
//! The structure keeps every node in two flat, normalized-path-keyed maps.
//! The tree rooted at [`ProjectStructure::root`] is a view over those maps:
//! directory nodes list their children by path key, so a node value lives
//! in exactly one place.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A directory in the merged project.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectoryNode {
    pub name: String,
    /// Normalized path; empty for the root
    pub path: String,
    /// First template observed to create this directory
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Paths of child directories, sorted by name once the tree is built
    #[serde(default)]
    pub children: Vec<String>,
    /// Paths of files directly inside this directory, sorted by name
    #[serde(default)]
    pub files: Vec<String>,
}

impl DirectoryNode {
    pub fn new(path: impl Into<String>, source: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: node_name(&path).to_string(),
            path,
            source: source.into(),
            description: None,
            children: Vec::new(),
            files: Vec::new(),
        }
    }
}

/// A file in the merged project.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileNode {
    pub name: String,
    pub path: String,
    /// First template observed to create this file
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub size: u64,
    pub templated: bool,
    pub executable: bool,
}

impl FileNode {
    pub fn new(path: impl Into<String>, source: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: node_name(&path).to_string(),
            path,
            source: source.into(),
            ..Self::default()
        }
    }
}

/// Result of merging every selected template.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectStructure {
    pub root: DirectoryNode,
    pub directories: BTreeMap<String, DirectoryNode>,
    pub files: BTreeMap<String, FileNode>,
}

impl ProjectStructure {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            root: DirectoryNode {
                name: project_name.into(),
                ..DirectoryNode::default()
            },
            directories: BTreeMap::new(),
            files: BTreeMap::new(),
        }
    }

    /// Recompute the tree from the flat maps.
    ///
    /// A node whose parent directory was never registered is attached to
    /// the root. Child lists are sorted by name at every level, so the tree
    /// does not depend on merge order and rebuilding is idempotent.
    pub fn build_tree(&mut self) {
        self.root.children.clear();
        self.root.files.clear();
        for dir in self.directories.values_mut() {
            dir.children.clear();
            dir.files.clear();
        }

        let dir_paths: Vec<String> = self.directories.keys().cloned().collect();
        for path in dir_paths {
            let parent = parent_path(&path).to_string();
            match self.directories.get_mut(&parent) {
                Some(parent_node) if !parent.is_empty() => parent_node.children.push(path),
                _ => self.root.children.push(path),
            }
        }

        let file_paths: Vec<String> = self.files.keys().cloned().collect();
        for path in file_paths {
            let parent = parent_path(&path).to_string();
            match self.directories.get_mut(&parent) {
                Some(parent_node) if !parent.is_empty() => parent_node.files.push(path),
                _ => self.root.files.push(path),
            }
        }

        let directories = &self.directories;
        let files = &self.files;
        let by_dir_name = |a: &String, b: &String| {
            let name_a = directories.get(a).map_or(a.as_str(), |d| d.name.as_str());
            let name_b = directories.get(b).map_or(b.as_str(), |d| d.name.as_str());
            name_a.cmp(name_b).then_with(|| a.cmp(b))
        };
        let by_file_name = |a: &String, b: &String| {
            let name_a = files.get(a).map_or(a.as_str(), |f| f.name.as_str());
            let name_b = files.get(b).map_or(b.as_str(), |f| f.name.as_str());
            name_a.cmp(name_b).then_with(|| a.cmp(b))
        };

        let mut sorted_dirs = BTreeMap::new();
        for (path, dir) in directories {
            let mut children = dir.children.clone();
            let mut dir_files = dir.files.clone();
            children.sort_by(by_dir_name);
            dir_files.sort_by(by_file_name);
            sorted_dirs.insert(path.clone(), (children, dir_files));
        }
        let mut root_children = self.root.children.clone();
        let mut root_files = self.root.files.clone();
        root_children.sort_by(by_dir_name);
        root_files.sort_by(by_file_name);

        for (path, (children, dir_files)) in sorted_dirs {
            if let Some(dir) = self.directories.get_mut(&path) {
                dir.children = children;
                dir.files = dir_files;
            }
        }
        self.root.children = root_children;
        self.root.files = root_files;
    }

    /// Child directories of `dir`, in tree order.
    pub fn children_of<'a>(&'a self, dir: &'a DirectoryNode) -> impl Iterator<Item = &'a DirectoryNode> + 'a {
        dir.children.iter().filter_map(|path| self.directories.get(path))
    }

    /// Files directly inside `dir`, in tree order.
    pub fn files_of<'a>(&'a self, dir: &'a DirectoryNode) -> impl Iterator<Item = &'a FileNode> + 'a {
        dir.files.iter().filter_map(|path| self.files.get(path))
    }

    /// Render the tree as indented lines, directories before files.
    ///
    /// Root-level entries are labelled with their full path, so an orphan
    /// such as `cmd/app` keeps its missing parent visible.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("{}/", self.root.name)];
        self.render_dir(&self.root, "", &mut lines);
        lines
    }

    fn render_dir(&self, dir: &DirectoryNode, prefix: &str, lines: &mut Vec<String>) {
        let children: Vec<_> = self.children_of(dir).collect();
        let files: Vec<_> = self.files_of(dir).collect();
        let total = children.len() + files.len();
        let at_root = dir.path.is_empty();

        for (i, child) in children.iter().enumerate() {
            let last = i + 1 == total;
            let label = if at_root { &child.path } else { &child.name };
            lines.push(format!("{}{}{}/", prefix, branch(last), label));
            let nested = format!("{}{}", prefix, if last { "    " } else { "|   " });
            self.render_dir(child, &nested, lines);
        }
        for (i, file) in files.iter().enumerate() {
            let last = children.len() + i + 1 == total;
            let label = if at_root { &file.path } else { &file.name };
            lines.push(format!("{}{}{}", prefix, branch(last), label));
        }
    }
}

fn branch(last: bool) -> &'static str {
    if last {
        "`-- "
    } else {
        "|-- "
    }
}

/// Parent of a normalized path; empty for root-level entries.
pub fn parent_path(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(parent, _)| parent)
}

/// Final segment of a normalized path.
pub fn node_name(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}

//! Namespace node
//!
//! Files and directories share one record. Relations to other nodes
//! (parent, children, links) are stored as absolute path strings that key
//! into the [`NodeTable`](super::NodeTable).

use std::collections::BTreeSet;

use super::Extent;

/// Directory entry name referring to the directory itself
pub const CURRENT_DIR: &str = ".";

/// Directory entry name referring to the parent directory
pub const PARENT_DIR: &str = "..";

/// Path of the root directory
pub const ROOT_PATH: &str = "";

/// Kind of link a node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Does not count as a reference to its target
    Symbolic,
    /// Holds a reference on its target's content
    Hard,
}

/// Link stored on an alias node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Absolute path of the node this link points at
    pub target: String,

    pub kind: LinkKind,
}

/// A single directory entry: key and the path it refers to
#[derive(Debug, Clone, PartialEq, Eq)]
struct DirEntry {
    name: String,
    path: String,
}

/// A file or directory in the namespace
#[derive(Debug, Clone)]
pub struct Node {
    /// Absolute path, also the table key
    pub path: String,

    /// Whether this node is a directory
    pub is_directory: bool,

    /// Absolute path of the containing directory
    pub parent: String,

    /// Directory entries in insertion order, led by `.` and `..`
    children: Vec<DirEntry>,

    /// Set on symbolic and hard link nodes
    pub link: Option<Link>,

    /// Paths of hard links pointing at this node
    pub hard_link_paths: BTreeSet<String>,

    /// Number of names holding this node's content alive
    pub reference_count: u32,

    /// Disk ranges holding the content, one per write
    pub data_extents: Vec<Extent>,
}

impl Node {
    /// Create a plain file
    pub fn file(path: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::new(path.into(), parent.into(), false)
    }

    /// Create a directory seeded with `.` and `..`
    pub fn directory(path: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::new(path.into(), parent.into(), true)
    }

    /// Create the root directory
    pub fn root() -> Self {
        Self::directory(ROOT_PATH, ROOT_PATH)
    }

    fn new(path: String, parent: String, is_directory: bool) -> Self {
        let children = if is_directory {
            vec![
                DirEntry {
                    name: CURRENT_DIR.to_string(),
                    path: path.clone(),
                },
                DirEntry {
                    name: PARENT_DIR.to_string(),
                    path: parent.clone(),
                },
            ]
        } else {
            Vec::new()
        };

        Self {
            path,
            is_directory,
            parent,
            children,
            link: None,
            hard_link_paths: BTreeSet::new(),
            reference_count: 1,
            data_extents: Vec::new(),
        }
    }

    /// Attach a link to this node
    pub fn with_link(mut self, target: impl Into<String>, kind: LinkKind) -> Self {
        self.link = Some(Link {
            target: target.into(),
            kind,
        });
        self
    }

    /// Target path when this node is a link
    pub fn link_target(&self) -> Option<&str> {
        self.link.as_ref().map(|link| link.target.as_str())
    }

    pub fn is_hard_link(&self) -> bool {
        matches!(&self.link, Some(Link { kind: LinkKind::Hard, .. }))
    }

    /// Final path segment
    pub fn name(&self) -> &str {
        base_name(&self.path)
    }

    /// Absolute paths of the real children, skipping `.` and `..`
    pub fn child_paths(&self) -> impl Iterator<Item = &str> {
        self.children
            .iter()
            .filter(|entry| !is_sentinel(&entry.name))
            .map(|entry| entry.path.as_str())
    }

    /// Number of directory entries, sentinels included
    pub fn entry_count(&self) -> usize {
        self.children.len()
    }

    pub fn has_child(&self, path: &str) -> bool {
        self.child_paths().any(|child| child == path)
    }

    /// Register a child by absolute path
    pub fn add_child(&mut self, path: impl Into<String>) {
        let path = path.into();
        self.children.push(DirEntry {
            name: path.clone(),
            path,
        });
    }

    /// Detach a child; returns whether it was present
    pub fn remove_child(&mut self, path: &str) -> bool {
        let before = self.children.len();
        self.children
            .retain(|entry| is_sentinel(&entry.name) || entry.path != path);
        self.children.len() != before
    }

    /// A directory holding nothing but `.` and `..`
    pub fn is_empty_directory(&self) -> bool {
        self.is_directory && self.children.len() == 2
    }
}

/// Final `/`-separated segment of a path
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Join a directory path and a child name
pub fn join(parent: &str, name: &str) -> String {
    format!("{}/{}", parent, name)
}

fn is_sentinel(name: &str) -> bool {
    name == CURRENT_DIR || name == PARENT_DIR
}

//! Node table
//!
//! The single owner of every node, keyed by absolute path.

use std::collections::HashMap;

use tracing::debug;

use super::node::{Node, ROOT_PATH};

/// Mapping from absolute path to node
#[derive(Debug)]
pub struct NodeTable {
    nodes: HashMap<String, Node>,
}

impl NodeTable {
    /// Create a table holding only the root directory
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(ROOT_PATH.to_string(), Node::root());
        Self { nodes }
    }

    /// Get a node by path
    pub fn get(&self, path: &str) -> Option<&Node> {
        self.nodes.get(path)
    }

    /// Get a mutable node by path
    pub fn get_mut(&mut self, path: &str) -> Option<&mut Node> {
        self.nodes.get_mut(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.nodes.contains_key(path)
    }

    /// Insert a node under its own path, replacing any previous entry
    pub fn insert(&mut self, node: Node) -> Option<Node> {
        debug!("Inserting node {:?}", node.path);
        self.nodes.insert(node.path.clone(), node)
    }

    /// Remove a node. The root is never removed.
    pub fn remove(&mut self, path: &str) -> Option<Node> {
        if path == ROOT_PATH {
            return None;
        }
        debug!("Removing node {:?}", path);
        self.nodes.remove(path)
    }

    /// Iterate over all nodes
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Node)> {
        self.nodes.iter()
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// The table always holds the root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for NodeTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_has_root() {
        let table = NodeTable::new();
        assert_eq!(table.len(), 1);
        let root = table.get(ROOT_PATH).unwrap();
        assert!(root.is_directory);
        assert_eq!(root.parent, ROOT_PATH);
    }

    #[test]
    fn test_root_cannot_be_removed() {
        let mut table = NodeTable::new();
        assert!(table.remove(ROOT_PATH).is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_insert_keys_by_path() {
        let mut table = NodeTable::new();
        table.insert(Node::file("/a", ROOT_PATH));

        assert!(table.contains("/a"));
        assert!(table.iter().all(|(key, node)| *key == node.path));
        assert!(table.remove("/a").is_some());
        assert!(!table.contains("/a"));
    }
}

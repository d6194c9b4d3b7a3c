//! Path resolution
//!
//! Paths are `/`-separated. A leading `/` starts at the root, anything else
//! starts at the current location. `.` and empty segments stay put, `..`
//! moves to the parent, and any other segment must name a child attached to
//! the directory reached so far.

use crate::error::{Error, Result};
use crate::storage::node::{join, Node, CURRENT_DIR, PARENT_DIR, ROOT_PATH};
use crate::storage::NodeTable;

use super::FileSystem;

/// Resolve `path` against `from`.
///
/// With `want_parent` the final segment is left unconsumed and the node that
/// would contain it is returned. Misses report the path as requested.
pub fn resolve<'a>(
    table: &'a NodeTable,
    path: &str,
    from: &str,
    want_parent: bool,
) -> Result<&'a Node> {
    let not_found = || Error::PathNotFound(path.to_string());

    let mut segments = path.split('/');
    let mut all: Vec<&str> = Vec::new();
    let start = match segments.next() {
        Some("") => ROOT_PATH,
        Some(first) => {
            all.push(first);
            from
        }
        None => from,
    };
    all.extend(segments);

    let walk = if want_parent {
        all.len().saturating_sub(1)
    } else {
        all.len()
    };

    let mut node = table.get(start).ok_or_else(not_found)?;
    for segment in &all[..walk] {
        node = match *segment {
            "" | CURRENT_DIR => node,
            PARENT_DIR => table.get(&node.parent).ok_or_else(not_found)?,
            name => {
                let child = join(&node.path, name);
                if !node.has_child(&child) {
                    return Err(not_found());
                }
                table.get(&child).ok_or_else(not_found)?
            }
        };
    }

    Ok(node)
}

impl FileSystem {
    /// Resolve a path from the current location
    pub fn resolve(&self, path: &str, want_parent: bool) -> Result<&Node> {
        resolve(&self.table, path, &self.current_location, want_parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> NodeTable {
        // /a/b (dir), /a/f (file)
        let mut table = NodeTable::new();
        let mut a = Node::directory("/a", "");
        a.add_child("/a/b");
        a.add_child("/a/f");
        table.insert(a);
        table.insert(Node::directory("/a/b", "/a"));
        table.insert(Node::file("/a/f", "/a"));
        table.get_mut("").unwrap().add_child("/a");
        table
    }

    #[test]
    fn test_absolute_and_relative() {
        let table = sample_table();
        assert_eq!(resolve(&table, "/a/b", "/a/b", false).unwrap().path, "/a/b");
        assert_eq!(resolve(&table, "b", "/a", false).unwrap().path, "/a/b");
        assert_eq!(resolve(&table, "a/f", "", false).unwrap().path, "/a/f");
    }

    #[test]
    fn test_dot_segments() {
        let table = sample_table();
        assert_eq!(resolve(&table, ".", "/a", false).unwrap().path, "/a");
        assert_eq!(resolve(&table, "..", "/a/b", false).unwrap().path, "/a");
        assert_eq!(resolve(&table, "../..", "/a/b", false).unwrap().path, "");
        assert_eq!(resolve(&table, "./b/../f", "/a", false).unwrap().path, "/a/f");
        // The root is its own parent
        assert_eq!(resolve(&table, "../../..", "", false).unwrap().path, "");
    }

    #[test]
    fn test_empty_segments() {
        let table = sample_table();
        assert_eq!(resolve(&table, "/", "/a", false).unwrap().path, "");
        assert_eq!(resolve(&table, "a//b/", "", false).unwrap().path, "/a/b");
    }

    #[test]
    fn test_want_parent() {
        let table = sample_table();
        assert_eq!(resolve(&table, "a/new", "", true).unwrap().path, "/a");
        assert_eq!(resolve(&table, "new", "/a/b", true).unwrap().path, "/a/b");
        assert_eq!(resolve(&table, "/new", "/a/b", true).unwrap().path, "");
        // The parent must exist, the leaf need not
        assert!(resolve(&table, "missing/new", "", true).is_err());
    }

    #[test]
    fn test_miss_reports_requested_path() {
        let table = sample_table();
        let err = resolve(&table, "a/nope/deeper", "", false).unwrap_err();
        assert_eq!(err.to_string(), "Path a/nope/deeper does not exist.");

        // Files have no children to walk into
        assert!(resolve(&table, "a/f/x", "", false).is_err());
    }

    #[test]
    fn test_detached_nodes_are_invisible() {
        let mut table = sample_table();
        table.get_mut("/a").unwrap().remove_child("/a/f");
        assert!(table.contains("/a/f"));
        assert!(resolve(&table, "/a/f", "", false).is_err());
    }
}

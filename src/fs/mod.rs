//! Namespace engine
//!
//! [`FileSystem`] owns the node table, the virtual disk and the current
//! location. Operations are split by concern:
//!
//! - `resolve`: path resolution
//! - `mutate`: create, remove, copy, move, link
//! - `content`: write and read
//! - `listing`: ls, find, cd, pwd
//!
//! Every operation takes its arguments as a slice of strings, the way the
//! command dispatcher hands them over, and either returns its console output
//! or a typed [`Error`](crate::Error).

mod content;
mod listing;
mod mutate;
mod resolve;

pub use resolve::resolve;

use tracing::info;

use crate::config::{MemFsConfig, DEFAULT_CAPACITY};
use crate::error::{Error, Result};
use crate::storage::node::ROOT_PATH;
use crate::storage::{Node, NodeTable, VirtualDisk};

/// In-memory filesystem
#[derive(Debug)]
pub struct FileSystem {
    /// All nodes, keyed by absolute path
    table: NodeTable,

    /// Backing store for file content
    disk: VirtualDisk,

    /// Absolute path of the working directory
    current_location: String,

    /// Whether cp/mv carry file content to the destination
    copy_contents: bool,

    /// Sequence for the keys of nodes kept alive only by hard links
    detached: u64,
}

impl FileSystem {
    /// Create an empty filesystem with a disk of `capacity` bytes
    pub fn new(capacity: usize) -> Self {
        info!("Creating filesystem with {} byte virtual disk", capacity);
        Self {
            table: NodeTable::new(),
            disk: VirtualDisk::new(capacity),
            current_location: ROOT_PATH.to_string(),
            copy_contents: false,
            detached: 0,
        }
    }

    /// Create an empty filesystem from configuration
    pub fn from_config(config: &MemFsConfig) -> Self {
        let mut fs = Self::new(config.disk.capacity);
        fs.copy_contents = config.namespace.copy_contents;
        fs
    }

    /// Carry file content across cp/mv
    pub fn with_copy_contents(mut self, enabled: bool) -> Self {
        self.copy_contents = enabled;
        self
    }

    /// Absolute path of the working directory (`""` is the root)
    pub fn current_location(&self) -> &str {
        &self.current_location
    }

    /// Look up a node by absolute path
    pub fn node(&self, path: &str) -> Option<&Node> {
        self.table.get(path)
    }

    pub fn disk(&self) -> &VirtualDisk {
        &self.disk
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// True when only the root exists
    pub fn is_empty(&self) -> bool {
        self.table.len() == 1
    }
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Fail unless `node` is a directory
fn require_directory(node: &Node, requested: &str) -> Result<()> {
    if node.is_directory {
        Ok(())
    } else {
        Err(Error::usage(format!("Path {} is not a directory.", requested)))
    }
}

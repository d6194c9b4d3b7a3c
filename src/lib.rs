//! memfs - In-Memory Filesystem Simulator
//!
//! A single-process simulation of a hierarchical filesystem namespace. Files
//! and directories live in a path-keyed node table; file content lives on a
//! fixed-capacity virtual disk that is only ever appended to.
//!
//! # Architecture
//!
//! - [`storage`]: nodes, the node table, the virtual disk and the payload codec
//! - [`fs`]: the namespace engine (path resolution and every operation)
//! - [`shell`]: command dispatch plus batch and interactive drivers
//!
//! # Features
//!
//! - Absolute and relative paths with `.` and `..`
//! - Files, directories, symbolic and hard links
//! - Reference-counted removal with hard-link survival
//! - Atomic out-of-space checks on write
//!
//! ```
//! use memfs::FileSystem;
//!
//! let mut fs = FileSystem::default();
//! fs.mkdir(&["docs"]).unwrap();
//! fs.touch(&["docs/notes"]).unwrap();
//! fs.write(&["docs/notes", "hello"]).unwrap();
//! assert_eq!(fs.read(&["docs/notes"]).unwrap(), "hello\n");
//! ```

pub mod config;
pub mod error;
pub mod fs;
pub mod shell;
pub mod storage;

pub use config::MemFsConfig;
pub use error::{Error, Result};
pub use fs::FileSystem;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::MemFsConfig;
    pub use crate::error::{Error, Result};
    pub use crate::fs::FileSystem;
    pub use crate::shell::{Outcome, Shell, Verb};
    pub use crate::storage::{Extent, LinkKind, Node};
}

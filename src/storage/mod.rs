//! Storage module for nodes, the node table and the virtual disk

pub mod codec;
pub mod disk;
pub mod node;
pub mod table;

pub use disk::{Extent, VirtualDisk};
pub use node::{Link, LinkKind, Node};
pub use table::NodeTable;

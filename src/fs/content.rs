//! File content: write and read
//!
//! Each write appends one encoded payload to the virtual disk and records
//! its extent on the file. Links are followed exactly one hop.

use tracing::debug;

use crate::error::{Error, Result};
use crate::storage::codec;

use super::FileSystem;

impl FileSystem {
    /// Append a payload to a file: `write <file> <payload>`
    pub fn write<S: AsRef<str>>(&mut self, inputs: &[S]) -> Result<()> {
        let [path, payload] = inputs else {
            return Err(Error::usage("Usage: write <file> '<a_string>'"));
        };

        let target = self.content_target(path.as_ref(), "Writing only supported on files")?;
        let bytes = codec::encode(payload.as_ref())?;

        let node = self
            .table
            .get_mut(&target)
            .ok_or_else(|| Error::PathNotFound(target.clone()))?;
        // Fails before any slot is touched when the payload does not fit
        let extent = self.disk.append(&bytes)?;
        node.data_extents.push(extent);

        debug!("Wrote {} bytes to {} at {}..{}", bytes.len(), target, extent.start, extent.end);
        Ok(())
    }

    /// Print a file's content: `read <file>`
    pub fn read<S: AsRef<str>>(&self, inputs: &[S]) -> Result<String> {
        let [path] = inputs else {
            return Err(Error::usage("Usage: read <file>"));
        };

        let mut content = self.contents(path.as_ref())?;
        content.push('\n');
        Ok(content)
    }

    /// Decoded content of a file, in write order
    pub fn contents(&self, path: &str) -> Result<String> {
        let target = self.content_target(path, "Reading only supported on files")?;
        let node = self
            .table
            .get(&target)
            .ok_or_else(|| Error::PathNotFound(target.clone()))?;

        let mut content = String::new();
        for extent in &node.data_extents {
            let bytes = self.disk.read(*extent)?;
            content.push_str(&codec::decode(&bytes)?);
        }
        Ok(content)
    }

    /// Path of the file whose content `path` refers to
    fn content_target(&self, path: &str, directory_message: &str) -> Result<String> {
        let mut node = self.resolve(path, false)?;
        if let Some(target) = node.link_target() {
            node = self
                .table
                .get(target)
                .ok_or_else(|| Error::PathNotFound(target.to_string()))?;
        }

        if node.is_directory {
            return Err(Error::usage(directory_message));
        }
        Ok(node.path.clone())
    }
}

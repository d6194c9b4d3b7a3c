//! Navigation: ls, find, cd and pwd

use tracing::debug;

use crate::error::{Error, Result};
use crate::storage::node::CURRENT_DIR;
use crate::storage::Node;

use super::{require_directory, FileSystem};

impl FileSystem {
    /// List directories, the current one when no path is given
    pub fn ls<S: AsRef<str>>(&self, paths: &[S]) -> Result<String> {
        if paths.is_empty() {
            return self.list(CURRENT_DIR, "");
        }

        let mut output = String::new();
        for path in paths {
            output.push_str(&self.list(path.as_ref(), "")?);
        }
        Ok(output)
    }

    /// List the entries of `path` whose name equals `pattern` (all when empty)
    pub fn list(&self, path: &str, pattern: &str) -> Result<String> {
        let node = self.resolve(path, false)?;
        Ok(self.render_entries(node, pattern))
    }

    /// Look up names in the current directory
    pub fn find<S: AsRef<str>>(&self, names: &[S]) -> Result<String> {
        if names.is_empty() {
            return Err(Error::usage("Usage: find target"));
        }

        let here = self
            .table
            .get(&self.current_location)
            .ok_or_else(|| Error::PathNotFound(self.current_location.clone()))?;

        Ok(names
            .iter()
            .map(|name| self.render_entries(here, name.as_ref()))
            .collect())
    }

    /// Change the current location: `cd target`
    pub fn cd<S: AsRef<str>>(&mut self, inputs: &[S]) -> Result<()> {
        let [path] = inputs else {
            return Err(Error::usage("Usage: cd target"));
        };
        let path = path.as_ref();

        let node = self.resolve(path, false)?;
        require_directory(node, path)?;
        self.current_location = node.path.clone();

        debug!("Current location is now {:?}", self.current_location);
        Ok(())
    }

    /// Print the current location with a trailing slash
    pub fn pwd<S: AsRef<str>>(&self, inputs: &[S]) -> Result<String> {
        if !inputs.is_empty() {
            return Err(Error::usage("pwd: too many arguments"));
        }
        Ok(format!("{}/\n", self.current_location))
    }

    /// One line per live entry: `/name` for directories, `name` for files
    fn render_entries(&self, dir: &Node, pattern: &str) -> String {
        let mut output = String::new();
        for child in dir.child_paths().filter_map(|path| self.table.get(path)) {
            let name = child.name();
            if !pattern.is_empty() && name != pattern {
                continue;
            }
            if child.is_directory {
                output.push('/');
            }
            output.push_str(name);
            output.push('\n');
        }
        output
    }
}

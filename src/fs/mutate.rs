//! Directory mutations: create, remove, copy, move and link

use tracing::debug;

use crate::error::{Error, Result};
use crate::storage::node::{base_name, join, CURRENT_DIR, PARENT_DIR, ROOT_PATH};
use crate::storage::{Extent, Link, LinkKind, Node};

use super::{require_directory, FileSystem};

/// Key prefix for nodes that only hard links keep alive. Namespace paths
/// always start with `/`, so these keys never collide with them.
const DETACHED_PREFIX: &str = "#detached/";

impl FileSystem {
    /// Create files
    pub fn touch<S: AsRef<str>>(&mut self, inputs: &[S]) -> Result<()> {
        if inputs.is_empty() {
            return Err(Error::usage("Usage: touch target ..."));
        }
        self.create_nodes(inputs, false)
    }

    /// Create directories
    pub fn mkdir<S: AsRef<str>>(&mut self, inputs: &[S]) -> Result<()> {
        if inputs.is_empty() {
            return Err(Error::usage("Usage: mkdir target ..."));
        }
        self.create_nodes(inputs, true)
    }

    fn create_nodes<S: AsRef<str>>(&mut self, inputs: &[S], is_directory: bool) -> Result<()> {
        for item in inputs {
            let item = item.as_ref();
            let name = checked_name(item)?;
            let parent = self.resolve(item, true)?;
            require_directory(parent, item)?;

            let path = join(&parent.path, name);
            let parent_path = parent.path.clone();
            let node = if is_directory {
                Node::directory(path, parent_path)
            } else {
                Node::file(path, parent_path)
            };
            self.attach(node)?;
        }
        Ok(())
    }

    /// Insert a new node and register it with its parent directory
    fn attach(&mut self, node: Node) -> Result<()> {
        let parent = self
            .table
            .get_mut(&node.parent)
            .ok_or_else(|| Error::PathNotFound(node.parent.clone()))?;
        if parent.has_child(&node.path) {
            return Err(Error::NodeAlreadyExists(node.path));
        }
        parent.add_child(node.path.clone());

        debug!("Created {} {}", if node.is_directory { "directory" } else { "file" }, node.path);
        self.table.insert(node);
        Ok(())
    }

    /// Remove files and empty directories
    pub fn rm<S: AsRef<str>>(&mut self, paths: &[S]) -> Result<()> {
        if paths.is_empty() {
            return Err(Error::usage("Must provide arguments."));
        }
        for path in paths {
            self.remove_one(path.as_ref())?;
        }
        Ok(())
    }

    fn remove_one(&mut self, path: &str) -> Result<()> {
        let parent = self.resolve(path, true)?;
        let target = match base_name(path) {
            "" | CURRENT_DIR => parent.path.clone(),
            PARENT_DIR => parent.parent.clone(),
            name => join(&parent.path, name),
        };

        if target == ROOT_PATH {
            return Err(Error::usage("Cannot remove the root directory."));
        }
        if is_within(&self.current_location, &target) {
            return Err(Error::usage(
                "Cannot remove the current directory or one of its parents.",
            ));
        }

        let node = self
            .table
            .get(&target)
            .ok_or_else(|| Error::PathNotFound(path.to_string()))?;
        let attached = self
            .table
            .get(&node.parent)
            .is_some_and(|parent| parent.has_child(&target));
        if !attached {
            return Err(Error::PathNotFound(path.to_string()));
        }
        if node.is_directory && !node.is_empty_directory() {
            return Err(Error::DirectoryNonEmpty(target));
        }

        let parent_path = node.parent.clone();
        let link = node.link.clone();

        if let Some(parent) = self.table.get_mut(&parent_path) {
            parent.remove_child(&target);
        }
        self.release(&target);

        if let Some(Link { target: linked, kind: LinkKind::Hard }) = link {
            if let Some(linked_node) = self.table.get_mut(&linked) {
                linked_node.hard_link_paths.remove(&target);
            }
            self.release(&linked);
        }

        // Still referenced by hard links: free the name, keep the content
        if self.table.contains(&target) {
            self.detach(&target);
        }

        debug!("Removed {}", target);
        Ok(())
    }

    /// Move a node out of the namespace under a private key and point its
    /// hard links at that key
    fn detach(&mut self, path: &str) {
        let Some(mut node) = self.table.remove(path) else {
            return;
        };

        self.detached += 1;
        let key = format!("{}{}", DETACHED_PREFIX, self.detached);
        for link_path in &node.hard_link_paths {
            if let Some(link) = self.table.get_mut(link_path).and_then(|n| n.link.as_mut()) {
                link.target = key.clone();
            }
        }

        node.path = key.clone();
        node.parent = ROOT_PATH.to_string();
        debug!("Detached {} as {}", path, key);
        self.table.insert(node);
    }

    /// Drop one reference; reclaim the node and its extents at zero
    fn release(&mut self, path: &str) {
        let remaining = match self.table.get_mut(path) {
            Some(node) => {
                node.reference_count = node.reference_count.saturating_sub(1);
                node.reference_count
            }
            None => return,
        };

        if remaining > 0 {
            debug!("{} still has {} reference(s), keeping content", path, remaining);
            return;
        }

        if let Some(node) = self.table.remove(path) {
            for extent in &node.data_extents {
                self.disk.clear(*extent);
            }
        }
    }

    /// Copy files into a directory. The last input is the destination.
    ///
    /// Sources that do not resolve are reported in the output and skipped.
    pub fn cp<S: AsRef<str>>(&mut self, inputs: &[S]) -> Result<String> {
        self.copy(inputs, false)
    }

    /// Move files into a directory. The last input is the destination.
    pub fn mv<S: AsRef<str>>(&mut self, inputs: &[S]) -> Result<String> {
        self.copy(inputs, true)
    }

    fn copy<S: AsRef<str>>(&mut self, inputs: &[S], move_source: bool) -> Result<String> {
        let action = if move_source { "mv" } else { "cp" };
        let (target, sources) = match inputs.split_last() {
            Some((target, sources)) if !sources.is_empty() => (target.as_ref(), sources),
            _ => return Err(Error::usage(format!("Usage: {} source ... target", action))),
        };

        let target_node = self.resolve(target, false)?;
        if !target_node.is_directory {
            return Err(Error::usage("Cannot move items to a file."));
        }
        let target_path = target_node.path.clone();

        let mut output = String::new();
        for source in sources {
            match self.copy_one(source.as_ref(), &target_path, move_source) {
                Ok(()) => {}
                Err(e @ Error::PathNotFound(_)) => {
                    debug!("{}: skipping source: {}", action, e);
                    output.push_str(&e.to_string());
                    output.push('\n');
                }
                Err(e) => return Err(e),
            }
        }
        Ok(output)
    }

    fn copy_one(&mut self, source: &str, target_dir: &str, move_source: bool) -> Result<()> {
        let source_node = self.resolve(source, false)?.clone();
        if source_node.is_directory {
            return Err(Error::usage("Operation unsupported on directories."));
        }

        let new_path = join(target_dir, source_node.name());
        if self.table.get(target_dir).is_some_and(|dir| dir.has_child(&new_path)) {
            return Err(Error::NodeAlreadyExists(new_path));
        }

        let data_extents = match (self.copy_contents, move_source) {
            (false, _) => Vec::new(),
            (true, true) => source_node.data_extents.clone(),
            (true, false) => self.duplicate_extents(&source_node.data_extents)?,
        };

        let mut copied = Node::file(new_path.clone(), target_dir);
        copied.link = source_node.link.clone();
        copied.data_extents = data_extents;
        copied.hard_link_paths = source_node.hard_link_paths.clone();
        copied.reference_count = source_node.reference_count;
        self.attach(copied)?;

        // Hard links follow the new node
        for link_path in &source_node.hard_link_paths {
            if let Some(link) = self.table.get_mut(link_path).and_then(|n| n.link.as_mut()) {
                link.target = new_path.clone();
            }
        }

        // A copied hard link is a new name for the same target
        if let Some(Link { target: linked, kind: LinkKind::Hard }) = &source_node.link {
            if let Some(linked_node) = self.table.get_mut(linked) {
                if move_source {
                    linked_node.hard_link_paths.remove(&source_node.path);
                } else {
                    linked_node.reference_count += 1;
                }
                linked_node.hard_link_paths.insert(new_path.clone());
            }
        }

        if move_source {
            if let Some(parent) = self.table.get_mut(&source_node.parent) {
                parent.remove_child(&source_node.path);
            }
            if let Some(removed) = self.table.remove(&source_node.path) {
                if !self.copy_contents {
                    for extent in &removed.data_extents {
                        self.disk.clear(*extent);
                    }
                }
            }
            debug!("Moved {} to {}", source_node.path, new_path);
        } else {
            if let Some(original) = self.table.get_mut(&source_node.path) {
                original.hard_link_paths.clear();
                original.reference_count = 1;
            }
            debug!("Copied {} to {}", source_node.path, new_path);
        }

        Ok(())
    }

    /// Write a second copy of the given extents, all or nothing
    fn duplicate_extents(&mut self, extents: &[Extent]) -> Result<Vec<Extent>> {
        let chunks = extents
            .iter()
            .map(|extent| self.disk.read(*extent))
            .collect::<Result<Vec<_>>>()?;

        let total: usize = chunks.iter().map(Vec::len).sum();
        if total > self.disk.remaining() {
            return Err(Error::OutOfDisk);
        }

        chunks.iter().map(|chunk| self.disk.append(chunk)).collect()
    }

    /// Create a symbolic link: `symlink source link_name`
    pub fn symlink<S: AsRef<str>>(&mut self, inputs: &[S]) -> Result<()> {
        self.link(inputs, LinkKind::Symbolic)
    }

    /// Create a hard link: `hardlink source link_name`
    pub fn hardlink<S: AsRef<str>>(&mut self, inputs: &[S]) -> Result<()> {
        self.link(inputs, LinkKind::Hard)
    }

    fn link<S: AsRef<str>>(&mut self, inputs: &[S], kind: LinkKind) -> Result<()> {
        let [source, link_name] = inputs else {
            return Err(Error::usage(match kind {
                LinkKind::Symbolic => "Usage: symlink [source_item] [link_name]",
                LinkKind::Hard => "Usage: hardlink [source_item] [link_name]",
            }));
        };
        let (source, link_name) = (source.as_ref(), link_name.as_ref());

        let source_node = self.resolve(source, false)?;
        if kind == LinkKind::Hard && source_node.is_directory {
            return Err(Error::usage("Hard links to directories are not supported."));
        }
        let source_path = source_node.path.clone();

        let name = checked_name(link_name)?;
        let parent = self.resolve(link_name, true)?;
        require_directory(parent, link_name)?;
        let link_path = join(&parent.path, name);
        let parent_path = parent.path.clone();

        self.attach(Node::file(link_path.clone(), parent_path).with_link(source_path.clone(), kind))?;

        if kind == LinkKind::Hard {
            if let Some(source_node) = self.table.get_mut(&source_path) {
                source_node.reference_count += 1;
                source_node.hard_link_paths.insert(link_path.clone());
            }
        }

        debug!("Linked {} -> {} ({:?})", link_path, source_path, kind);
        Ok(())
    }
}

/// Whether `location` is `dir` itself or lies somewhere below it
fn is_within(location: &str, dir: &str) -> bool {
    location
        .strip_prefix(dir)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Base name of a path that is about to be created
fn checked_name(path: &str) -> Result<&str> {
    match base_name(path) {
        "" | CURRENT_DIR | PARENT_DIR => {
            Err(Error::usage("Cannot create files with reserved names . or .."))
        }
        name => Ok(name),
    }
}

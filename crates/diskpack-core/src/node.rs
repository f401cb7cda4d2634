//! Entry types for the scanned size tree.

use std::path::PathBuf;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Classification of a file system object discovered during traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link whose target is a regular file.
    SymlinkToFile,
    /// Symbolic link whose target is a directory.
    SymlinkToDirectory,
    /// Object whose metadata or target could not be read.
    Inaccessible,
}

impl EntryKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Directory)
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, EntryKind::File)
    }

    /// Check if this is a symlink (to either target kind).
    pub fn is_symlink(&self) -> bool {
        matches!(self, EntryKind::SymlinkToFile | EntryKind::SymlinkToDirectory)
    }
}

/// A single node in the scan result tree.
///
/// For directories, `size` is the aggregate of all reachable descendant file
/// sizes under the filters active during the scan. The tree is built once and
/// never mutated after the scan completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// Base name (falls back to the full path string for roots like `/`).
    pub name: CompactString,

    /// Logical path, used as stable identifier and for display.
    pub path: PathBuf,

    /// Entry classification.
    pub kind: EntryKind,

    /// Size in bytes (aggregate for directories, 0 for unfollowed symlinks).
    pub size: u64,

    /// Distance from the scan root (root = 0).
    pub depth: u32,

    /// Children (directories only); empty when all contents were filtered
    /// out or inaccessible.
    pub children: Vec<Entry>,
}

impl Entry {
    /// Create a file entry.
    pub fn new_file(
        name: impl Into<CompactString>,
        path: impl Into<PathBuf>,
        size: u64,
        depth: u32,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: EntryKind::File,
            size,
            depth,
            children: Vec::new(),
        }
    }

    /// Create a directory entry with no children yet.
    pub fn new_directory(
        name: impl Into<CompactString>,
        path: impl Into<PathBuf>,
        depth: u32,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: EntryKind::Directory,
            size: 0,
            depth,
            children: Vec::new(),
        }
    }

    /// Create a zero-size leaf of the given kind (symlinks, inaccessible
    /// objects, cycle terminators).
    pub fn new_leaf(
        name: impl Into<CompactString>,
        path: impl Into<PathBuf>,
        kind: EntryKind,
        depth: u32,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
            size: 0,
            depth,
            children: Vec::new(),
        }
    }

    /// Check if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this entry is a regular file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Sort children by size in descending order, recursively.
    ///
    /// Sibling order carries no meaning for aggregation; this is purely for
    /// display (largest-first in the visualization).
    pub fn sort_children_by_size(&mut self) {
        self.children.sort_by(|a, b| b.size.cmp(&a.size));
        for child in &mut self.children {
            child.sort_children_by_size();
        }
    }

    /// Iterate over this entry and all descendants, depth-first.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let entry = stack.pop()?;
            stack.extend(entry.children.iter());
            Some(entry)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kind_discrimination() {
        assert!(EntryKind::Directory.is_dir());
        assert!(EntryKind::File.is_file());
        assert!(EntryKind::SymlinkToFile.is_symlink());
        assert!(EntryKind::SymlinkToDirectory.is_symlink());
        assert!(!EntryKind::Inaccessible.is_dir());
        assert!(!EntryKind::Inaccessible.is_file());
        assert!(!EntryKind::Inaccessible.is_symlink());
    }

    #[test]
    fn test_file_entry_creation() {
        let entry = Entry::new_file("test.txt", "/data/test.txt", 1024, 1);
        assert!(entry.is_file());
        assert!(!entry.is_dir());
        assert_eq!(entry.size, 1024);
        assert_eq!(entry.depth, 1);
        assert_eq!(entry.child_count(), 0);
    }

    #[test]
    fn test_directory_entry_creation() {
        let entry = Entry::new_directory("sub", "/data/sub", 1);
        assert!(entry.is_dir());
        assert_eq!(entry.size, 0);
        assert!(entry.children.is_empty());
    }

    #[test]
    fn test_sort_children_by_size() {
        let mut dir = Entry::new_directory("root", "/root", 0);
        dir.children.push(Entry::new_file("a", "/root/a", 10, 1));
        dir.children.push(Entry::new_file("b", "/root/b", 30, 1));
        dir.children.push(Entry::new_file("c", "/root/c", 20, 1));
        dir.sort_children_by_size();

        assert_eq!(dir.children[0].name.as_str(), "b");
        assert_eq!(dir.children[1].name.as_str(), "c");
        assert_eq!(dir.children[2].name.as_str(), "a");
    }

    #[test]
    fn test_iter_visits_all_descendants() {
        let mut sub = Entry::new_directory("sub", "/root/sub", 1);
        sub.children.push(Entry::new_file("b", "/root/sub/b", 5, 2));
        let mut root = Entry::new_directory("root", "/root", 0);
        root.children.push(Entry::new_file("a", "/root/a", 10, 1));
        root.children.push(sub);

        assert_eq!(root.iter().count(), 4);
    }
}

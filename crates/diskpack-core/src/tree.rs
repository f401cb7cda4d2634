//! Size tree container and statistics.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::config::ScanConfig;
use crate::error::ScanWarning;
use crate::node::{Entry, EntryKind};

/// Summary statistics for a scanned tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total size in bytes (equals the root entry's size).
    pub total_size: u64,
    /// Total number of files.
    pub total_files: u64,
    /// Total number of directories (including the root).
    pub total_dirs: u64,
    /// Total number of symbolic link leaves.
    pub total_symlinks: u64,
    /// Total number of inaccessible entries.
    pub total_inaccessible: u64,
    /// Deepest depth present in the tree.
    pub max_depth: u32,
}

impl TreeStats {
    /// Compute statistics from a finished tree.
    pub fn from_entry(root: &Entry) -> Self {
        let mut stats = Self {
            total_size: root.size,
            ..Self::default()
        };
        for entry in root.iter() {
            stats.max_depth = stats.max_depth.max(entry.depth);
            match entry.kind {
                EntryKind::File => stats.total_files += 1,
                EntryKind::Directory => stats.total_dirs += 1,
                EntryKind::SymlinkToFile | EntryKind::SymlinkToDirectory => {
                    stats.total_symlinks += 1
                }
                EntryKind::Inaccessible => stats.total_inaccessible += 1,
            }
        }
        stats
    }
}

/// Complete scan result: the tree plus its error log and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeTree {
    /// Root entry of the tree.
    pub root: Entry,

    /// Canonical root path that was scanned.
    pub root_path: PathBuf,

    /// When this scan was performed.
    pub scanned_at: SystemTime,

    /// Duration of the scan.
    pub scan_duration: Duration,

    /// Scan configuration used.
    pub config: ScanConfig,

    /// Summary statistics.
    pub stats: TreeStats,

    /// Soft errors encountered during the scan.
    pub warnings: Vec<ScanWarning>,
}

impl SizeTree {
    /// Create a new size tree, computing stats from the root entry.
    pub fn new(
        root: Entry,
        root_path: PathBuf,
        config: ScanConfig,
        scan_duration: Duration,
        warnings: Vec<ScanWarning>,
    ) -> Self {
        let stats = TreeStats::from_entry(&root);
        Self {
            root,
            root_path,
            scanned_at: SystemTime::now(),
            scan_duration,
            config,
            stats,
            warnings,
        }
    }

    /// Get the total size of the tree in bytes.
    pub fn total_size(&self) -> u64 {
        self.root.size
    }

    /// Check if there were any soft errors during scanning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Entry {
        let mut sub = Entry::new_directory("sub", "/data/sub", 1);
        sub.children.push(Entry::new_file("b.txt", "/data/sub/b.txt", 50, 2));
        sub.size = 50;

        let mut root = Entry::new_directory("data", "/data", 0);
        root.children.push(Entry::new_file("a.txt", "/data/a.txt", 100, 1));
        root.children.push(sub);
        root.children.push(Entry::new_leaf(
            "link",
            "/data/link",
            EntryKind::SymlinkToDirectory,
            1,
        ));
        root.size = 150;
        root
    }

    #[test]
    fn test_stats_from_entry() {
        let stats = TreeStats::from_entry(&sample_tree());
        assert_eq!(stats.total_size, 150);
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.total_dirs, 2);
        assert_eq!(stats.total_symlinks, 1);
        assert_eq!(stats.total_inaccessible, 0);
        assert_eq!(stats.max_depth, 2);
    }

    #[test]
    fn test_size_tree_accessors() {
        let tree = SizeTree::new(
            sample_tree(),
            PathBuf::from("/data"),
            ScanConfig::new("/data"),
            Duration::from_millis(5),
            Vec::new(),
        );
        assert_eq!(tree.total_size(), 150);
        assert!(!tree.has_warnings());
        assert_eq!(tree.stats.total_files, 2);
    }
}

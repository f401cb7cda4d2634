//! Parallel recursive directory scanner.
//!
//! Traversal recurses depth-first; sibling subdirectories are dispatched onto
//! a bounded rayon pool and joined before their parent's size is finalized,
//! so each directory's aggregate is sealed the instant its own recursion
//! unwinds. Filtering (hidden entries, depth limit) happens at discovery
//! time: excluded subtrees must never contribute to ancestor sizes.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use compact_str::CompactString;
use rayon::prelude::*;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use diskpack_core::{Entry, EntryKind, ScanConfig, ScanError, ScanWarning, SizeTree};

use crate::ancestors::AncestorChain;
use crate::progress::{ProgressCounters, ScanProgress};

/// How often (in files) a progress snapshot is broadcast.
const PROGRESS_INTERVAL: u64 = 1000;

/// Directory scanner with progress broadcasting and cancellation support.
pub struct Scanner {
    progress_tx: broadcast::Sender<ScanProgress>,
}

impl Scanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self { progress_tx }
    }

    /// Subscribe to scan progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// Scan the configured root to completion.
    pub fn scan(&self, config: &ScanConfig) -> Result<SizeTree, ScanError> {
        self.scan_with_cancel(config, CancellationToken::new())
    }

    /// Scan with caller-controlled cancellation.
    ///
    /// Cancellation is observed before every directory listing: in-flight
    /// filesystem calls finish, no new listing starts, and the scan fails
    /// with [`ScanError::Cancelled`].
    pub fn scan_with_cancel(
        &self,
        config: &ScanConfig,
        cancel: CancellationToken,
    ) -> Result<SizeTree, ScanError> {
        let start = Instant::now();

        let root_path = config
            .root
            .canonicalize()
            .map_err(|e| ScanError::io(&config.root, e))?;
        let root_metadata = fs::metadata(&root_path).map_err(|e| ScanError::io(&root_path, e))?;
        if !root_metadata.is_dir() {
            return Err(ScanError::NotADirectory { path: root_path });
        }
        // An unreadable root is fatal; unreadable subdirectories are soft
        // errors handled inside the walk.
        fs::read_dir(&root_path).map_err(|e| ScanError::io(&root_path, e))?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()
            .map_err(|e| ScanError::Other {
                message: format!("Failed to build scan pool: {e}"),
            })?;

        let ctx = ScanContext {
            config,
            cancel: &cancel,
            counters: ProgressCounters::new(),
            warnings: Mutex::new(Vec::new()),
            progress_tx: &self.progress_tx,
        };

        let root_name = root_display_name(&root_path);
        let mut root_entry = pool.install(|| {
            let chain = AncestorChain::root(&root_path);
            walk_directory(&ctx, &root_path, root_name, 0, &chain)
        });

        if cancel.is_cancelled() {
            return Err(ScanError::Cancelled);
        }

        root_entry.sort_children_by_size();

        let warnings = ctx
            .warnings
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        debug!(
            root = %root_path.display(),
            size = root_entry.size,
            warnings = warnings.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "scan complete"
        );

        Ok(SizeTree::new(
            root_entry,
            root_path,
            config.clone(),
            start.elapsed(),
            warnings,
        ))
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared state threaded through the parallel walk.
struct ScanContext<'a> {
    config: &'a ScanConfig,
    cancel: &'a CancellationToken,
    counters: ProgressCounters,
    warnings: Mutex<Vec<ScanWarning>>,
    progress_tx: &'a broadcast::Sender<ScanProgress>,
}

impl ScanContext<'_> {
    fn record_warning(&self, warning: ScanWarning) {
        self.counters.record_error();
        if let Ok(mut warnings) = self.warnings.lock() {
            warnings.push(warning);
        }
    }

    fn record_file(&self, size: u64, path: &Path) {
        let files = self.counters.record_file(size);
        if files % PROGRESS_INTERVAL == 0 {
            let _ = self.progress_tx.send(self.counters.snapshot(path.to_path_buf()));
        }
    }
}

/// A subdirectory discovered during listing, descended into after the
/// listing pass so siblings can run in parallel.
struct SubdirJob {
    name: CompactString,
    path: PathBuf,
    /// Canonical path, tracked only when following symlinks (it feeds the
    /// open-ancestor chain).
    real: Option<PathBuf>,
}

/// Scan one directory and everything beneath it, returning its sealed entry.
///
/// Listing failures here are soft: the node is kept with size 0 and no
/// children, and the failure lands in the warning log.
fn walk_directory(
    ctx: &ScanContext<'_>,
    path: &Path,
    name: CompactString,
    depth: u32,
    ancestors: &AncestorChain<'_>,
) -> Entry {
    let mut node = Entry::new_directory(name, path, depth);

    // No new listing once cancellation is observed.
    if ctx.cancel.is_cancelled() {
        return node;
    }
    ctx.counters.record_dir();

    let read_dir = match fs::read_dir(path) {
        Ok(rd) => rd,
        Err(err) => {
            ctx.record_warning(ScanWarning::read_dir(path, &err));
            return node;
        }
    };

    let child_depth = depth + 1;
    let mut subdir_jobs: Vec<SubdirJob> = Vec::new();

    for dir_entry in read_dir {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(err) => {
                ctx.record_warning(ScanWarning::read_dir(path, &err));
                continue;
            }
        };

        let child_path = dir_entry.path();
        let name: CompactString = dir_entry.file_name().to_string_lossy().into();

        if ctx.config.exclude_hidden && is_hidden(&name, &child_path) {
            continue;
        }
        if ctx.config.exceeds_depth(child_depth) {
            continue;
        }

        let file_type = match dir_entry.file_type() {
            Ok(ft) => ft,
            Err(err) => {
                ctx.record_warning(ScanWarning::metadata(&child_path, &err));
                node.children
                    .push(Entry::new_leaf(name, child_path, EntryKind::Inaccessible, child_depth));
                continue;
            }
        };

        if file_type.is_symlink() {
            visit_symlink(ctx, &mut node, &mut subdir_jobs, ancestors, name, child_path, child_depth);
        } else if file_type.is_dir() {
            if ctx.config.follow_symlinks {
                // The chain holds canonical paths, so plain directories need
                // theirs too once an ancestor may have been reached via link.
                match fs::canonicalize(&child_path) {
                    Ok(real) if ancestors.contains(&real) => {
                        debug!(path = %child_path.display(), "directory cycle, not descending");
                        node.children.push(Entry::new_leaf(
                            name,
                            child_path,
                            EntryKind::Directory,
                            child_depth,
                        ));
                    }
                    Ok(real) => subdir_jobs.push(SubdirJob {
                        name,
                        path: child_path,
                        real: Some(real),
                    }),
                    Err(err) => {
                        ctx.record_warning(ScanWarning::metadata(&child_path, &err));
                        node.children.push(Entry::new_leaf(
                            name,
                            child_path,
                            EntryKind::Inaccessible,
                            child_depth,
                        ));
                    }
                }
            } else {
                subdir_jobs.push(SubdirJob {
                    name,
                    path: child_path,
                    real: None,
                });
            }
        } else {
            // Regular files, plus the odd fifo/socket/device: sized by
            // metadata like the rest.
            match dir_entry.metadata() {
                Ok(metadata) => {
                    let size = metadata.len();
                    ctx.record_file(size, &child_path);
                    node.children
                        .push(Entry::new_file(name, child_path, size, child_depth));
                }
                Err(err) => {
                    ctx.record_warning(ScanWarning::metadata(&child_path, &err));
                    node.children.push(Entry::new_leaf(
                        name,
                        child_path,
                        EntryKind::Inaccessible,
                        child_depth,
                    ));
                }
            }
        }
    }

    // Sibling subtrees scan in parallel on the bounded pool; collect() is the
    // per-directory join, so every child is sealed before the parent sums.
    let scanned_subdirs: Vec<Entry> = subdir_jobs
        .into_par_iter()
        .map(|job| match job.real.as_deref() {
            Some(real) => {
                let link = ancestors.push(real);
                walk_directory(ctx, &job.path, job.name, child_depth, &link)
            }
            None => walk_directory(ctx, &job.path, job.name, child_depth, ancestors),
        })
        .collect();
    node.children.extend(scanned_subdirs);

    let mut total: u64 = 0;
    let mut overflowed = false;
    for child in &node.children {
        match total.checked_add(child.size) {
            Some(sum) => total = sum,
            None => {
                total = u64::MAX;
                overflowed = true;
            }
        }
    }
    if overflowed {
        ctx.record_warning(ScanWarning::size_overflow(path));
    }
    node.size = total;

    node
}

/// Classify and record a symlink entry according to the configured policy.
fn visit_symlink(
    ctx: &ScanContext<'_>,
    node: &mut Entry,
    subdir_jobs: &mut Vec<SubdirJob>,
    ancestors: &AncestorChain<'_>,
    name: CompactString,
    child_path: PathBuf,
    child_depth: u32,
) {
    if !ctx.config.follow_symlinks {
        // Unfollowed links become zero-size leaves, classified by target.
        match fs::metadata(&child_path) {
            Ok(metadata) if metadata.is_dir() => node.children.push(Entry::new_leaf(
                name,
                child_path,
                EntryKind::SymlinkToDirectory,
                child_depth,
            )),
            Ok(_) => node.children.push(Entry::new_leaf(
                name,
                child_path,
                EntryKind::SymlinkToFile,
                child_depth,
            )),
            Err(err) => {
                ctx.record_warning(ScanWarning::dangling_symlink(&child_path, &err));
                node.children.push(Entry::new_leaf(
                    name,
                    child_path,
                    EntryKind::Inaccessible,
                    child_depth,
                ));
            }
        }
        return;
    }

    let real = match fs::canonicalize(&child_path) {
        Ok(real) => real,
        Err(err) => {
            ctx.record_warning(ScanWarning::dangling_symlink(&child_path, &err));
            node.children.push(Entry::new_leaf(
                name,
                child_path,
                EntryKind::Inaccessible,
                child_depth,
            ));
            return;
        }
    };

    if ancestors.contains(&real) {
        // Expected traversal-termination condition, not an error.
        debug!(path = %child_path.display(), "symlink cycle, not descending");
        node.children.push(Entry::new_leaf(
            name,
            child_path,
            EntryKind::SymlinkToDirectory,
            child_depth,
        ));
        return;
    }

    match fs::metadata(&child_path) {
        Ok(metadata) if metadata.is_dir() => subdir_jobs.push(SubdirJob {
            name,
            path: child_path,
            real: Some(real),
        }),
        Ok(metadata) => {
            let size = metadata.len();
            ctx.record_file(size, &child_path);
            node.children
                .push(Entry::new_file(name, child_path, size, child_depth));
        }
        Err(err) => {
            ctx.record_warning(ScanWarning::metadata(&child_path, &err));
            node.children.push(Entry::new_leaf(
                name,
                child_path,
                EntryKind::Inaccessible,
                child_depth,
            ));
        }
    }
}

/// Derive a display name for a scanned path; roots like `/` or `C:\` have no
/// file name and fall back to the full path string.
fn root_display_name(path: &Path) -> CompactString {
    path.file_name()
        .map(|n| n.to_string_lossy().into())
        .unwrap_or_else(|| path.to_string_lossy().into())
}

/// Platform hidden-entry convention: dot-prefixed names everywhere, plus the
/// hidden/system file attributes on Windows.
#[cfg(not(windows))]
fn is_hidden(name: &str, _path: &Path) -> bool {
    name.starts_with('.')
}

#[cfg(windows)]
fn is_hidden(name: &str, path: &Path) -> bool {
    use std::os::windows::fs::MetadataExt;

    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x02;
    const FILE_ATTRIBUTE_SYSTEM: u32 = 0x04;

    if name.starts_with('.') {
        return true;
    }
    fs::symlink_metadata(path)
        .map(|m| m.file_attributes() & (FILE_ATTRIBUTE_HIDDEN | FILE_ATTRIBUTE_SYSTEM) != 0)
        .unwrap_or(false)
}

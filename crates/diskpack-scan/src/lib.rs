//! File system scanning engine for diskpack.
//!
//! This crate walks a directory tree, aggregates sizes bottom-up, and
//! produces the hierarchical size tree consumed by the rendering layer.
//!
//! # Overview
//!
//! - **Parallel traversal**: sibling subdirectories scan concurrently on a
//!   bounded rayon pool, with a per-directory join before aggregation.
//! - **Soft-error resilience**: unreadable subdirectories and unstattable
//!   entries degrade single nodes without aborting the scan.
//! - **Cycle safety**: a per-branch open-ancestor chain stops symlink loops.
//! - **Cancellation** via `tokio_util::sync::CancellationToken`.
//! - **Progress updates** via broadcast channels.
//!
//! # Example
//!
//! ```rust,no_run
//! use diskpack_scan::{ScanConfig, Scanner};
//!
//! let config = ScanConfig::new("/path/to/scan");
//! let scanner = Scanner::new();
//! let tree = scanner.scan(&config).unwrap();
//!
//! println!("Total size: {} bytes", tree.total_size());
//! println!("Soft errors: {}", tree.warnings.len());
//! ```
//!
//! # Progress monitoring
//!
//! ```rust,no_run
//! use diskpack_scan::{ScanConfig, Scanner};
//!
//! let scanner = Scanner::new();
//! let mut progress_rx = scanner.subscribe();
//!
//! tokio::spawn(async move {
//!     while let Ok(progress) = progress_rx.recv().await {
//!         println!("Scanned {} files", progress.files_scanned);
//!     }
//! });
//! ```

mod ancestors;
mod drives;
mod progress;
mod scanner;

pub use drives::drive_roots;
pub use progress::ScanProgress;
pub use scanner::Scanner;

// Re-export core types for convenience
pub use diskpack_core::{
    DriveList, Entry, EntryKind, ScanConfig, ScanError, ScanWarning, SizeTree, TreeStats,
    WarningKind,
};

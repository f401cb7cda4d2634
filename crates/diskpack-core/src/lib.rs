//! Core types for diskpack.
//!
//! This crate provides the fundamental data structures used throughout
//! diskpack: size-tree entries, scan configuration, errors, and the wire
//! format consumed by the rendering layer.

mod config;
mod error;
mod node;
mod tree;
pub mod wire;

pub use config::{ScanConfig, ScanConfigBuilder};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use node::{Entry, EntryKind};
pub use tree::{SizeTree, TreeStats};
pub use wire::{DriveList, ScanRequest, WireError, WireNode};

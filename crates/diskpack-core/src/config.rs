//! Scan configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Immutable configuration for a single scan invocation.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root path to scan. Must exist and be a directory; validated when the
    /// scan starts, not here.
    pub root: PathBuf,

    /// Maximum depth to descend (root = 0). Entries at `depth > max_depth`
    /// are excluded entirely and contribute nothing to ancestor sizes.
    #[builder(default = "50")]
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// Skip entries hidden by platform convention (dot-prefixed names, plus
    /// the hidden/system attributes on Windows).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub exclude_hidden: bool,

    /// Follow symbolic links, subject to cycle detection. When false,
    /// symlinks become zero-size leaves.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Number of worker threads for scanning (0 = auto-detect). Bounds the
    /// number of simultaneous directory listings.
    #[builder(default = "0")]
    #[serde(default)]
    pub threads: usize,
}

fn default_max_depth() -> u32 {
    50
}

fn default_true() -> bool {
    true
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a config with defaults for scanning a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_depth: 50,
            exclude_hidden: true,
            follow_symlinks: false,
            threads: 0,
        }
    }

    /// Check if an entry name is hidden by the dot-prefix convention.
    ///
    /// The Windows hidden-attribute check needs metadata and lives in the
    /// scanner; this covers the name-based convention on all platforms.
    pub fn should_skip_hidden(&self, name: &str) -> bool {
        self.exclude_hidden && name.starts_with('.')
    }

    /// Check whether a child at the given depth is beyond the depth limit.
    ///
    /// Applies uniformly to files and directories: with `max_depth = 0` even
    /// the root's immediate children are excluded.
    pub fn exceeds_depth(&self, depth: u32) -> bool {
        depth > self.max_depth
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

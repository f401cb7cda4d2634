//! Wire (JSON) representation exchanged with the transport and rendering
//! layers.
//!
//! The rendering layer consumes a recursive `{ name, path, size, children }`
//! shape and sums leaf sizes on the fly, so directory sizes must match the
//! aggregate exactly and every node must carry its path for breadcrumb and
//! tooltip display. The typed [`Entry`](crate::Entry) model is converted to
//! this shape only at the boundary.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ScanConfig, ScanConfigBuilder};
use crate::error::ScanError;
use crate::node::Entry;

/// Scan request as received from the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRequest {
    /// Path to scan.
    pub path: String,

    /// Maximum depth; negative values are rejected as invalid config.
    #[serde(default = "default_max_depth")]
    pub max_depth: i64,

    /// Skip hidden entries.
    #[serde(default = "default_true")]
    pub exclude_hidden: bool,

    /// Follow symbolic links.
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_max_depth() -> i64 {
    50
}

fn default_true() -> bool {
    true
}

impl ScanRequest {
    /// Validate the request and convert it into a [`ScanConfig`].
    pub fn into_config(self) -> Result<ScanConfig, ScanError> {
        if self.max_depth < 0 {
            return Err(ScanError::InvalidConfig {
                message: format!("max_depth must be non-negative, got {}", self.max_depth),
            });
        }
        let max_depth = u32::try_from(self.max_depth).map_err(|_| ScanError::InvalidConfig {
            message: format!("max_depth out of range: {}", self.max_depth),
        })?;

        ScanConfigBuilder::default()
            .root(self.path)
            .max_depth(max_depth)
            .exclude_hidden(self.exclude_hidden)
            .follow_symlinks(self.follow_symlinks)
            .build()
            .map_err(|e| ScanError::InvalidConfig {
                message: e.to_string(),
            })
    }
}

/// One node of the output tree in wire shape.
///
/// `children` is omitted from the JSON for leaves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireNode {
    /// Base name for display.
    pub name: String,
    /// Full path for breadcrumbs and tooltips.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Child nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<WireNode>,
}

impl From<&Entry> for WireNode {
    fn from(entry: &Entry) -> Self {
        Self {
            name: entry.name.to_string(),
            path: entry.path.clone(),
            size: entry.size,
            children: entry.children.iter().map(WireNode::from).collect(),
        }
    }
}

/// Error payload returned to the transport on fatal failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireError {
    /// Human-readable error message.
    pub error: String,
}

impl From<&ScanError> for WireError {
    fn from(err: &ScanError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Available filesystem roots, as returned by drive enumeration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveList {
    /// Drive root paths, e.g. `["C:\\", "D:\\"]` or `["/"]`.
    pub drives: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req: ScanRequest = serde_json::from_str(r#"{"path": "/data"}"#).unwrap();
        assert_eq!(req.max_depth, 50);
        assert!(req.exclude_hidden);
        assert!(!req.follow_symlinks);
    }

    #[test]
    fn test_request_rejects_negative_depth() {
        let req: ScanRequest =
            serde_json::from_str(r#"{"path": "/data", "max_depth": -1}"#).unwrap();
        assert!(matches!(
            req.into_config(),
            Err(ScanError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_request_into_config() {
        let req: ScanRequest = serde_json::from_str(
            r#"{"path": "/data", "max_depth": 3, "follow_symlinks": true}"#,
        )
        .unwrap();
        let config = req.into_config().unwrap();
        assert_eq!(config.root, PathBuf::from("/data"));
        assert_eq!(config.max_depth, 3);
        assert!(config.follow_symlinks);
    }

    #[test]
    fn test_wire_node_omits_empty_children() {
        let mut dir = Entry::new_directory("data", "/data", 0);
        dir.children.push(Entry::new_file("a.txt", "/data/a.txt", 100, 1));
        dir.size = 100;

        let wire = WireNode::from(&dir);
        let json = serde_json::to_value(&wire).unwrap();

        assert_eq!(json["size"], 100);
        assert_eq!(json["children"][0]["name"], "a.txt");
        // Leaf children carry no `children` key at all.
        assert!(json["children"][0].get("children").is_none());
        assert_eq!(json["children"][0]["path"], "/data/a.txt");
    }

    #[test]
    fn test_wire_error_message() {
        let err = ScanError::NotFound {
            path: PathBuf::from("/missing"),
        };
        let wire = WireError::from(&err);
        assert!(wire.error.contains("/missing"));
    }
}

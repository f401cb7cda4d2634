//! Enumeration of available filesystem roots.
//!
//! This is a plain OS query, separate from the scanning engine: the UI uses
//! it to offer starting points for a scan.

use diskpack_core::DriveList;

/// List the filesystem roots available for scanning.
///
/// On Windows this probes `A:\` through `Z:\`; elsewhere the filesystem has
/// a single root.
pub fn drive_roots() -> DriveList {
    DriveList {
        drives: platform_roots(),
    }
}

#[cfg(windows)]
fn platform_roots() -> Vec<String> {
    ('A'..='Z')
        .map(|letter| format!("{letter}:\\"))
        .filter(|root| std::path::Path::new(root).exists())
        .collect()
}

#[cfg(not(windows))]
fn platform_roots() -> Vec<String> {
    vec!["/".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_roots_nonempty() {
        let list = drive_roots();
        assert!(!list.drives.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_root() {
        assert_eq!(drive_roots().drives, vec!["/".to_string()]);
    }
}

use std::path::PathBuf;
use std::time::Duration;

use diskpack_core::{
    Entry, EntryKind, ScanConfig, ScanError, ScanRequest, SizeTree, TreeStats, WireNode,
};

fn build_sample_tree() -> Entry {
    // /data
    //   a.txt (100)
    //   sub/
    //     b.txt (50)
    //   link -> elsewhere (unfollowed)
    let mut sub = Entry::new_directory("sub", "/data/sub", 1);
    sub.children
        .push(Entry::new_file("b.txt", "/data/sub/b.txt", 50, 2));
    sub.size = 50;

    let mut root = Entry::new_directory("data", "/data", 0);
    root.children
        .push(Entry::new_file("a.txt", "/data/a.txt", 100, 1));
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
fn test_depth_invariant_holds_in_sample() {
    let root = build_sample_tree();
    fn check(entry: &Entry) {
        for child in &entry.children {
            assert_eq!(child.depth, entry.depth + 1);
            check(child);
        }
    }
    assert_eq!(root.depth, 0);
    check(&root);
}

#[test]
fn test_directory_size_equals_child_sum() {
    let root = build_sample_tree();
    for entry in root.iter() {
        if entry.is_dir() {
            let sum: u64 = entry.children.iter().map(|c| c.size).sum();
            assert_eq!(entry.size, sum);
        }
    }
}

#[test]
fn test_stats_roundup() {
    let tree = SizeTree::new(
        build_sample_tree(),
        PathBuf::from("/data"),
        ScanConfig::new("/data"),
        Duration::from_millis(1),
        Vec::new(),
    );
    let stats = TreeStats::from_entry(&tree.root);
    assert_eq!(stats.total_size, tree.total_size());
    assert_eq!(stats.total_files, 2);
    assert_eq!(stats.total_dirs, 2);
    assert_eq!(stats.total_symlinks, 1);
}

#[test]
fn test_wire_shape_matches_rendering_contract() {
    let root = build_sample_tree();
    let wire = WireNode::from(&root);
    let json = serde_json::to_value(&wire).unwrap();

    // Every node carries name, path, and size; children omitted on leaves.
    assert_eq!(json["name"], "data");
    assert_eq!(json["path"], "/data");
    assert_eq!(json["size"], 150);

    let children = json["children"].as_array().unwrap();
    assert_eq!(children.len(), 3);
    for child in children {
        assert!(child.get("name").is_some());
        assert!(child.get("path").is_some());
        assert!(child.get("size").is_some());
    }

    // The unfollowed symlink serializes as a zero-size leaf.
    let link = children.iter().find(|c| c["name"] == "link").unwrap();
    assert_eq!(link["size"], 0);
    assert!(link.get("children").is_none());
}

#[test]
fn test_wire_roundtrip() {
    let root = build_sample_tree();
    let wire = WireNode::from(&root);
    let json = serde_json::to_string(&wire).unwrap();
    let back: WireNode = serde_json::from_str(&json).unwrap();
    assert_eq!(back.size, wire.size);
    assert_eq!(back.children.len(), wire.children.len());
}

#[test]
fn test_scan_request_validation() {
    let ok: ScanRequest = serde_json::from_str(r#"{"path": "/tmp", "max_depth": 10}"#).unwrap();
    let config = ok.into_config().unwrap();
    assert_eq!(config.max_depth, 10);

    let bad: ScanRequest = serde_json::from_str(r#"{"path": "/tmp", "max_depth": -5}"#).unwrap();
    assert!(matches!(
        bad.into_config(),
        Err(ScanError::InvalidConfig { .. })
    ));

    let empty: ScanRequest = serde_json::from_str(r#"{"path": ""}"#).unwrap();
    assert!(matches!(
        empty.into_config(),
        Err(ScanError::InvalidConfig { .. })
    ));
}

#[test]
fn test_config_serde_defaults() {
    let config: ScanConfig = serde_json::from_str(r#"{"root": "/data"}"#).unwrap();
    assert_eq!(config.max_depth, 50);
    assert!(config.exclude_hidden);
    assert!(!config.follow_symlinks);
    assert_eq!(config.threads, 0);
}

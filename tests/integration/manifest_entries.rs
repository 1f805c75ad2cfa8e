//! Manifest building over real directory trees

use super::test_utils::sample_tree;
use fsmanifest::identify::identify_bytes;
use fsmanifest::manifest::{ErrorPolicy, WalkerConfig};
use fsmanifest::mode::encode;
use fsmanifest::{build_entry, ContentId, FileModeBits, FileType, ManifestBuilder};
use tempfile::TempDir;

#[test]
fn test_entries_for_sample_tree() {
    let temp_dir = TempDir::new().unwrap();
    sample_tree(temp_dir.path());

    let report = ManifestBuilder::new(temp_dir.path().to_path_buf())
        .build()
        .unwrap();
    assert!(report.is_complete());

    let paths: Vec<&str> = report.entries.iter().map(|e| e.path()).collect();
    assert_eq!(paths, vec!["a.txt", "docs", "docs/b.md", "empty"]);

    let a = &report.entries[0];
    assert_eq!(a.content_id(), identify_bytes(b"a"));
    assert_eq!(a.size(), 1);
    assert!(!a.is_folder());
    assert!(!a.is_link());

    let docs = &report.entries[1];
    assert!(docs.is_folder());
    assert_eq!(docs.content_id(), ContentId::NULL);
    assert_eq!(docs.size(), 0);
    assert_eq!(docs.mode().file_type(), FileType::Directory);

    // An empty file hashes to the null identifier as well.
    let empty = &report.entries[3];
    assert_eq!(empty.content_id(), ContentId::NULL);
    assert_eq!(empty.size(), 0);
    assert!(empty.mode().is_regular());
}

#[test]
fn test_rebuild_is_deterministic() {
    let temp_dir = TempDir::new().unwrap();
    sample_tree(temp_dir.path());
    let builder = ManifestBuilder::new(temp_dir.path().to_path_buf()).with_parallelism(4);

    let first = builder.build().unwrap();
    let second = builder.build().unwrap();
    assert_eq!(first.entries, second.entries);
}

#[test]
fn test_ignore_and_depth() {
    let temp_dir = TempDir::new().unwrap();
    sample_tree(temp_dir.path());

    let config = WalkerConfig {
        ignore_patterns: vec!["docs".to_string()],
        ..WalkerConfig::default()
    };
    let report = ManifestBuilder::new(temp_dir.path().to_path_buf())
        .with_walker_config(config)
        .build()
        .unwrap();
    assert!(report.entries.iter().all(|e| !e.path().starts_with("docs")));

    let config = WalkerConfig {
        max_depth: Some(1),
        ..WalkerConfig::default()
    };
    let report = ManifestBuilder::new(temp_dir.path().to_path_buf())
        .with_walker_config(config)
        .with_error_policy(ErrorPolicy::Abort)
        .build()
        .unwrap();
    assert!(report.entries.iter().any(|e| e.path() == "docs"));
    assert!(report.entries.iter().all(|e| e.path() != "docs/b.md"));
}

#[test]
fn test_missing_root_fails() {
    let temp_dir = TempDir::new().unwrap();
    let result = ManifestBuilder::new(temp_dir.path().join("nope")).build();
    assert!(result.is_err());
}

#[test]
fn test_contentless_entries_ignore_content() {
    let id = identify_bytes(b"ignored");
    for file_type in FileType::ALL {
        let mode = FileModeBits::from_octal(file_type, 0o755);
        let entry = build_entry("x", mode, Some(id), 7);
        if matches!(file_type, FileType::Regular | FileType::Temporary) {
            assert_eq!(entry.content_id(), id);
            assert_eq!(entry.size(), 7);
        } else {
            assert_eq!(entry.content_id(), ContentId::NULL, "{}", file_type);
            assert_eq!(entry.size(), 0, "{}", file_type);
        }
        assert_eq!(entry.is_folder(), file_type == FileType::Directory);
        assert_eq!(entry.is_link(), file_type == FileType::SymbolicLink);
        assert_eq!(encode(&entry.mode()), encode(&mode));
    }
}

#[cfg(unix)]
#[test]
fn test_symlink_entry() {
    let temp_dir = TempDir::new().unwrap();
    sample_tree(temp_dir.path());
    std::os::unix::fs::symlink("a.txt", temp_dir.path().join("link")).unwrap();

    let report = ManifestBuilder::new(temp_dir.path().to_path_buf())
        .build()
        .unwrap();
    let link = report.entries.iter().find(|e| e.path() == "link").unwrap();
    assert!(link.is_link());
    assert!(!link.is_folder());
    assert_eq!(link.content_id(), ContentId::NULL);
    assert_eq!(link.size(), 0);
    assert!(encode(&link.mode()).starts_with('l'));
}

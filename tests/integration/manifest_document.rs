//! Manifest documents on disk and verification against a live tree

use super::test_utils::sample_tree;
use fsmanifest::manifest::{verify, ChangedField};
use fsmanifest::{Manifest, ManifestBuilder, ManifestError};
use std::fs;
use tempfile::TempDir;

fn build_manifest(root: &std::path::Path) -> Manifest {
    let report = ManifestBuilder::new(root.to_path_buf()).build().unwrap();
    Manifest::new(report.entries)
}

#[test]
fn test_write_and_read_back() {
    let temp_dir = TempDir::new().unwrap();
    let tree = temp_dir.path().join("tree");
    fs::create_dir(&tree).unwrap();
    sample_tree(&tree);

    let manifest = build_manifest(&tree);
    let path = temp_dir.path().join("manifest.json");
    manifest.write_to(&path).unwrap();

    let loaded = Manifest::read_from(&path).unwrap();
    assert_eq!(loaded.entries(), manifest.entries());
    assert_eq!(loaded.created().timestamp(), manifest.created().timestamp());
}

#[test]
fn test_document_shape() {
    let temp_dir = TempDir::new().unwrap();
    sample_tree(temp_dir.path());
    let json = build_manifest(temp_dir.path()).to_json().unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["version"], 1);
    let entries = value["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0]["path"], "a.txt");
    assert_eq!(entries[0]["bytes"], 1);
    assert_eq!(entries[1]["folder"], true);
    assert!(entries[1]["mode"].as_str().unwrap().starts_with('d'));
}

#[test]
fn test_bad_mode_names_the_entry() {
    let input = r#"{
        "version": 1,
        "entries": [
            {"path": "ok", "mode": "-rw-r--r--", "id": "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262", "bytes": 0},
            {"path": "bad", "mode": "-rw", "id": "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262", "bytes": 0}
        ]
    }"#;

    match Manifest::from_json(input) {
        Err(ManifestError::InvalidEntryMode { path, .. }) => assert_eq!(path, "bad"),
        other => panic!("unexpected result: {:?}", other),
    }

    let results = Manifest::parse_entries(input).unwrap();
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
}

#[test]
fn test_verify_reports_drift() {
    let temp_dir = TempDir::new().unwrap();
    sample_tree(temp_dir.path());
    let manifest = build_manifest(temp_dir.path());
    let builder = ManifestBuilder::new(temp_dir.path().to_path_buf());

    assert!(verify(&manifest, &builder).unwrap().is_clean());

    fs::write(temp_dir.path().join("a.txt"), "changed").unwrap();
    fs::remove_file(temp_dir.path().join("empty")).unwrap();
    fs::write(temp_dir.path().join("new"), "n").unwrap();

    let report = verify(&manifest, &builder).unwrap();
    assert_eq!(report.missing, vec!["empty".to_string()]);
    assert_eq!(report.added, vec!["new".to_string()]);
    assert_eq!(report.changed.len(), 1);
    assert_eq!(report.changed[0].path, "a.txt");
    assert_eq!(
        report.changed[0].fields,
        vec![ChangedField::ContentId, ChangedField::Size]
    );
    assert_eq!(report.drift(), 3);
}

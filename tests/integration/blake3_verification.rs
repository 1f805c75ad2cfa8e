//! Content identifier verification against the official BLAKE3 digest

use fsmanifest::identify::{identify, identify_bytes, identify_file, null_id};
use fsmanifest::ContentId;
use std::io::Cursor;
use tempfile::TempDir;

const EMPTY_INPUT_HASH: &str = "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262";

#[test]
fn test_null_identifier_is_official_empty_hash() {
    assert_eq!(null_id().to_string(), EMPTY_INPUT_HASH);
    assert_eq!(ContentId::NULL.to_string(), EMPTY_INPUT_HASH);
    assert_eq!(identify(Cursor::new(Vec::new())).unwrap(), null_id());
}

#[test]
fn test_identify_matches_blake3_crate() {
    for input in [&b"a"[..], b"abc", b"Hello, World!"] {
        let expected = blake3::hash(input);
        assert_eq!(identify_bytes(input).as_bytes(), expected.as_bytes());
        assert_eq!(identify_bytes(input).to_string(), expected.to_hex().to_string());
    }
}

#[test]
fn test_identify_file_matches_stream() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.bin");
    let content: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
    std::fs::write(&path, &content).unwrap();

    assert_eq!(identify_file(&path).unwrap(), identify_bytes(&content));
    assert_eq!(identify(Cursor::new(content.clone())).unwrap(), identify_bytes(&content));
}

//! Property-based tests for content identifiers

use fsmanifest::identify::{identify, identify_bytes};
use fsmanifest::ContentId;
use proptest::prelude::*;
use std::io::Cursor;

#[test]
fn test_identify_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&any::<Vec<u8>>(), |content| {
            let streamed = identify(Cursor::new(content.clone())).unwrap();
            prop_assert_eq!(streamed, identify_bytes(&content));
            prop_assert_eq!(streamed.is_null(), content.is_empty());
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_hex_roundtrip_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&any::<[u8; 32]>(), |bytes| {
            let id = ContentId::from_bytes(bytes);
            let hex = id.to_string();
            prop_assert_eq!(hex.len(), 64);
            prop_assert_eq!(hex.parse::<ContentId>().unwrap(), id);
            Ok(())
        })
        .unwrap();
}

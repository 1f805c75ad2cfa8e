//! Property-based tests for the mode codec

use fsmanifest::mode::{decode, encode, MODE_WIDTH};
use fsmanifest::{FileModeBits, FileType, SpecialFlags};
use proptest::prelude::*;

fn file_type() -> impl Strategy<Value = FileType> {
    (0..FileType::ALL.len()).prop_map(|i| FileType::ALL[i])
}

/// Flags that survive the round trip on a regular file.
fn lossless_flag() -> impl Strategy<Value = SpecialFlags> {
    prop_oneof![
        Just(SpecialFlags::empty()),
        Just(SpecialFlags::APPEND),
        Just(SpecialFlags::SETUID),
        Just(SpecialFlags::SETGID),
    ]
}

/// Any type with any permissions and no flags decodes back to itself.
#[test]
fn test_type_and_permissions_roundtrip() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(file_type(), 0u32..=0o777), |(file_type, octal)| {
            let mode = FileModeBits::from_octal(file_type, octal);
            let encoded = encode(&mode);
            prop_assert_eq!(encoded.chars().count(), MODE_WIDTH);
            prop_assert_eq!(decode(&encoded).unwrap(), mode);
            Ok(())
        })
        .unwrap();
}

/// Regular files carrying one lossless flag round trip too.
#[test]
fn test_regular_with_flag_roundtrip() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(lossless_flag(), 0u32..=0o777), |(flag, octal)| {
            let mode = FileModeBits::from_octal(FileType::Regular, octal).with_special(flag);
            prop_assert_eq!(decode(&encode(&mode)).unwrap(), mode);
            Ok(())
        })
        .unwrap();
}

/// Encoding never panics and is always ten characters, whatever the flags.
#[test]
fn test_encode_width_with_any_flags() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(file_type(), 0u32..=0o777, any::<u8>()),
            |(file_type, octal, bits)| {
                let mode = FileModeBits::from_octal(file_type, octal)
                    .with_special(SpecialFlags::from_bits_truncate(bits));
                prop_assert_eq!(encode(&mode).chars().count(), MODE_WIDTH);
                Ok(())
            },
        )
        .unwrap();
}

/// Any input of ten or more characters decodes; shorter input never does.
#[test]
fn test_decode_accepts_by_length() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&"\\PC{0,16}", |input| {
            let result = decode(&input);
            if input.chars().count() >= MODE_WIDTH {
                prop_assert!(result.is_ok());
            } else {
                prop_assert!(result.is_err());
            }
            Ok(())
        })
        .unwrap();
}

/// Decoding then encoding is stable: a second pass changes nothing.
#[test]
fn test_decode_encode_is_idempotent() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&"[-a-zA-Z]{10}", |input| {
            let once = encode(&decode(&input).unwrap());
            let twice = encode(&decode(&once).unwrap());
            prop_assert_eq!(once, twice);
            Ok(())
        })
        .unwrap();
}

/// Non-letter characters in permission positions read as unset bits.
#[test]
fn test_permissive_permission_characters() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(file_type(), "[0-9#*?. _+=]{9}"),
            |(file_type, noise)| {
                let lead = encode(&FileModeBits::from_octal(file_type, 0))
                    .chars()
                    .next()
                    .unwrap();
                let input = format!("{}{}", lead, noise);
                let mode = decode(&input).unwrap();
                prop_assert_eq!(mode.file_type(), file_type);
                prop_assert_eq!(mode.octal(), 0);
                Ok(())
            },
        )
        .unwrap();
}

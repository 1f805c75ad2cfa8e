//! Mode codec scenarios against the public API

use fsmanifest::mode::{decode, encode, MODE_WIDTH};
use fsmanifest::{FileModeBits, FileType, ModeError, SpecialFlags};

#[test]
fn test_concrete_scenarios() {
    let cases = [
        ("-rw-r--r--", FileType::Regular, 0o644),
        ("drwxr-xr-x", FileType::Directory, 0o755),
        ("trw-r--r--", FileType::Temporary, 0o644),
        ("lrw-r--r--", FileType::SymbolicLink, 0o644),
        ("srw-r--r--", FileType::Socket, 0o644),
    ];
    for (input, file_type, octal) in cases {
        let mode = decode(input).unwrap();
        assert_eq!(mode.file_type(), file_type, "{}", input);
        assert_eq!(mode.octal(), octal, "{}", input);
        assert_eq!(encode(&mode), input);
    }
}

#[test]
fn test_encoding_is_always_ten_characters() {
    for file_type in FileType::ALL {
        for octal in [0, 0o644, 0o755, 0o777] {
            let mode = FileModeBits::from_octal(file_type, octal)
                .with_special(SpecialFlags::all());
            assert_eq!(encode(&mode).chars().count(), MODE_WIDTH);
        }
    }
}

#[test]
fn test_ambiguous_d_resolves_to_directory() {
    // Lower and upper case both fold to `d`; Directory is first in priority.
    for input in ["drw-r--r--", "Drw-r--r--", "drwxr-xr-x", "Drwxr-xr-x"] {
        assert_eq!(decode(input).unwrap().file_type(), FileType::Directory, "{}", input);
    }
    // Block devices use their own letter and survive the round trip.
    let device = FileModeBits::from_octal(FileType::Device, 0o660);
    assert_eq!(decode(&encode(&device)).unwrap(), device);
}

#[test]
fn test_length_boundary() {
    assert_eq!(
        decode("-rw-r--r-"),
        Err(ModeError::MalformedInput {
            input: "-rw-r--r-".to_string()
        })
    );
    assert!(decode("-rw-r--r--").is_ok());
    assert_eq!(
        decode("-rw-r--r-- trailing").unwrap(),
        decode("-rw-r--r--").unwrap()
    );
}

#[test]
fn test_unknown_type_letter_is_tolerated() {
    // Boundary case: unknown letters decode as plain regular files.
    let mode = decode("Xrwxr-xr-x").unwrap();
    assert_eq!(mode.file_type(), FileType::Regular);
    assert!(mode.special().is_empty());
    assert_eq!(mode.octal(), 0o755);
}

#[test]
fn test_from_str_and_display() {
    let mode: FileModeBits = "crw-rw-rw-".parse().unwrap();
    assert_eq!(mode.file_type(), FileType::CharDevice);
    assert_eq!(mode.to_string(), "crw-rw-rw-");
}

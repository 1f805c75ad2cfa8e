//! Textual mode codec
//!
//! ```text
//! [type][owner r w x][group r w x][other r w x]
//! ```
//!
//! Encoding is total. Decoding only fails when the input is shorter than
//! [`MODE_WIDTH`]; unknown letters and stray permission characters are read
//! as "unset" so that manifests written by other platforms always load.
//!
//! Type Letter Table, decode direction. Input is case-folded first, and when
//! a letter is shared the first row listed for it wins:
//!
//! | letter | decodes to      | also used by (lost on decode) |
//! |--------|-----------------|-------------------------------|
//! | `d`    | Directory       | `D` device marker             |
//! | `l`    | SymbolicLink    | EXCLUSIVE flag                |
//! | `t`    | Temporary       | STICKY flag                   |
//! | `b`    | Device          |                               |
//! | `c`    | CharDevice      |                               |
//! | `p`    | NamedPipe       |                               |
//! | `s`    | Socket          |                               |
//! | `a`    | APPEND          |                               |
//! | `u`    | SETUID          |                               |
//! | `g`    | SETGID          |                               |
//! | `-`    | Regular         |                               |

use crate::error::ModeError;
use crate::mode::bits::{FileModeBits, FileType, Permissions, SpecialFlags};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Width of an encoded mode string.
pub const MODE_WIDTH: usize = 10;

/// Permission bit and its letter, in string order (positions 1..=9).
const PERMISSION_POSITIONS: [(Permissions, char); 9] = [
    (Permissions::OWNER_READ, 'r'),
    (Permissions::OWNER_WRITE, 'w'),
    (Permissions::OWNER_EXEC, 'x'),
    (Permissions::GROUP_READ, 'r'),
    (Permissions::GROUP_WRITE, 'w'),
    (Permissions::GROUP_EXEC, 'x'),
    (Permissions::OTHER_READ, 'r'),
    (Permissions::OTHER_WRITE, 'w'),
    (Permissions::OTHER_EXEC, 'x'),
];

/// Special flags in encode precedence order.
const SPECIAL_LETTERS: [(SpecialFlags, char); 5] = [
    (SpecialFlags::APPEND, 'a'),
    (SpecialFlags::EXCLUSIVE, 'l'),
    (SpecialFlags::SETUID, 'u'),
    (SpecialFlags::SETGID, 'g'),
    (SpecialFlags::STICKY, 't'),
];

fn type_letter(file_type: FileType) -> Option<char> {
    match file_type {
        FileType::Regular => None,
        FileType::Directory => Some('d'),
        FileType::SymbolicLink => Some('l'),
        FileType::Device => Some('b'),
        FileType::CharDevice => Some('c'),
        FileType::NamedPipe => Some('p'),
        FileType::Socket => Some('s'),
        FileType::Temporary => Some('t'),
    }
}

/// Encode a mode as its 10-character string.
///
/// Position 0 carries the type letter when the type is not `Regular`,
/// otherwise the first special flag set (APPEND, EXCLUSIVE, SETUID, SETGID,
/// STICKY), otherwise `-`. Only one of these fits, so the rest are dropped.
pub fn encode(mode: &FileModeBits) -> String {
    let lead = type_letter(mode.file_type())
        .or_else(|| {
            SPECIAL_LETTERS
                .iter()
                .find(|(flag, _)| mode.special().contains(*flag))
                .map(|(_, letter)| *letter)
        })
        .unwrap_or('-');

    let mut out = String::with_capacity(MODE_WIDTH);
    out.push(lead);
    for (bit, letter) in PERMISSION_POSITIONS {
        out.push(if mode.permissions().contains(bit) {
            letter
        } else {
            '-'
        });
    }
    out
}

/// Decode a mode string.
///
/// Only the first [`MODE_WIDTH`] characters are read; anything after them is
/// ignored.
pub fn decode(input: &str) -> Result<FileModeBits, ModeError> {
    let chars: Vec<char> = input
        .chars()
        .take(MODE_WIDTH)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if chars.len() < MODE_WIDTH {
        return Err(ModeError::MalformedInput {
            input: input.to_string(),
        });
    }

    let (file_type, special) = match chars[0] {
        'd' => (FileType::Directory, SpecialFlags::empty()),
        'l' => (FileType::SymbolicLink, SpecialFlags::empty()),
        't' => (FileType::Temporary, SpecialFlags::empty()),
        'b' => (FileType::Device, SpecialFlags::empty()),
        'c' => (FileType::CharDevice, SpecialFlags::empty()),
        'p' => (FileType::NamedPipe, SpecialFlags::empty()),
        's' => (FileType::Socket, SpecialFlags::empty()),
        'a' => (FileType::Regular, SpecialFlags::APPEND),
        'u' => (FileType::Regular, SpecialFlags::SETUID),
        'g' => (FileType::Regular, SpecialFlags::SETGID),
        _ => (FileType::Regular, SpecialFlags::empty()),
    };

    let mut permissions = Permissions::empty();
    for (c, (bit, letter)) in chars[1..].iter().zip(PERMISSION_POSITIONS) {
        if *c == letter {
            permissions |= bit;
        }
    }

    Ok(FileModeBits::new(file_type, permissions).with_special(special))
}

impl std::fmt::Display for FileModeBits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&encode(self))
    }
}

impl std::str::FromStr for FileModeBits {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

impl Serialize for FileModeBits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode(self))
    }
}

impl<'de> Deserialize<'de> for FileModeBits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        decode(&s).map_err(serde::de::Error::custom)
    }
}

//! Core identifier types

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Raw 32-byte digest
pub type Hash = [u8; 32];

/// Content identifier: the BLAKE3 digest of a byte stream.
///
/// Renders as 64 lowercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId(Hash);

impl ContentId {
    /// Identifier of the empty byte stream.
    pub const NULL: ContentId = ContentId([
        0xaf, 0x13, 0x49, 0xb9, 0xf5, 0xf9, 0xa1, 0xa6, 0xa0, 0x40, 0x4d, 0xea, 0x36, 0xdc,
        0xc9, 0x49, 0x9b, 0xcb, 0x25, 0xc9, 0xad, 0xc1, 0x12, 0xb7, 0xcc, 0x9a, 0x93, 0xca,
        0xe4, 0x1f, 0x32, 0x62,
    ]);

    pub fn from_bytes(bytes: Hash) -> Self {
        ContentId(bytes)
    }

    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }

    pub fn is_null(&self) -> bool {
        *self == ContentId::NULL
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Default for ContentId {
    fn default() -> Self {
        ContentId::NULL
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentId({})", self.to_hex())
    }
}

/// Parse failure for a textual content identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid content id {0:?}: expected 64 hex characters")]
pub struct ParseContentIdError(pub String);

impl FromStr for ContentId {
    type Err = ParseContentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| ParseContentIdError(s.to_string()))?;
        Ok(ContentId(bytes))
    }
}

impl Serialize for ContentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ContentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

//! Portable file modes
//!
//! A file mode is a type tag, a set of special flags, and nine permission bits.
//! Its textual form is a fixed 10-character string (`drwxr-xr-x`) that any
//! platform can read back, including modes the reading platform has no
//! native notion of.

pub mod bits;
pub mod classify;
pub mod codec;

pub use bits::{FileModeBits, FileType, Permissions, SpecialFlags};
pub use classify::{classify, classify_metadata};
pub use codec::{decode, encode, MODE_WIDTH};

//! Integration tests for the manifest builder

mod blake3_verification;
mod manifest_document;
mod manifest_entries;
mod mode_scenarios;
mod test_utils;

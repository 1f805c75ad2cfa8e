//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    format!("fsmanifest: {}", e)
}

/// Process exit code for an error.
pub fn exit_code(e: &ApiError) -> i32 {
    match e {
        ApiError::VerificationFailed { .. } => 2,
        _ => 1,
    }
}

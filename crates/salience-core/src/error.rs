//! Scorer errors

use thiserror::Error;

/// Errors from the scorer's I/O-touching operations.
///
/// The scoring algorithm itself is total (out-of-range input is clamped,
/// unknown keys are reported as absent); only header extraction, which
/// reads the file system, can fail.
#[derive(Error, Debug)]
pub enum ScorerError {
    #[error("content unavailable for '{path}': {source}")]
    ContentUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

//! Ledger errors

use thiserror::Error;

/// Errors from history recording and queries.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Turn numbers must be strictly increasing within a session. A
    /// violation is a programmer error in the host's sequencing and is
    /// surfaced immediately, not retried.
    #[error("turn {attempted} is not after last recorded turn {last}")]
    OutOfOrderTurn { last: u64, attempted: u64 },

    /// History persistence is best-effort telemetry: callers are expected
    /// to warn and carry on rather than abort the host turn.
    #[error("history persistence failed: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("history record encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

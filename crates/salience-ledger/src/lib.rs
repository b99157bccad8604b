//! Append-only attention history: session-scoped JSONL logs and
//! analytical queries over them

mod error;
mod io;
mod ledger;
mod paths;
mod types;

pub use error::LedgerError;
pub use io::{append_jsonl, atomic_write, read_jsonl, LockedLog};
pub use ledger::{
    CoactivationPair, FileUsage, HistoryLedger, KeywordEffectiveness, LedgerSummary,
    UnderutilizedFile, DEFAULT_HOT_RATIO_THRESHOLD, DEFAULT_MIN_APPEARANCES,
};
pub use paths::LedgerPaths;
pub use types::{truncate_preview, HistoryRecord, MAX_PREVIEW_CHARS};

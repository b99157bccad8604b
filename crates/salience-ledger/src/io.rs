//! Locked JSONL I/O and atomic file operations

use crate::error::LedgerError;
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::warn;

/// Exclusive advisory lock over a session log.
///
/// Independent processes logging into the same store serialize their
/// appends on this lock. Released on drop, so every exit path (including
/// a failed write) unlocks.
#[derive(Debug)]
pub struct LockedLog {
    file: File,
}

impl LockedLog {
    /// Open the log at `path` (creating it and its parents if needed) and
    /// take the exclusive lock, blocking until concurrent writers release.
    pub fn acquire(path: &Path) -> Result<Self, LedgerError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        fs2::FileExt::lock_exclusive(&file)?;
        Ok(Self { file })
    }

    /// Append one record as a JSON line.
    pub fn append<T: Serialize>(&mut self, record: &T) -> Result<(), LedgerError> {
        let json = serde_json::to_string(record)?;
        writeln!(self.file, "{}", json)?;
        Ok(())
    }
}

impl Drop for LockedLog {
    fn drop(&mut self) {
        if let Err(err) = FileExt::unlock(&self.file) {
            warn!(%err, "failed to release history log lock");
        }
    }
}

/// Append a single JSON record under the log's exclusive lock.
pub fn append_jsonl<T: Serialize>(path: &Path, record: &T) -> Result<(), LedgerError> {
    let mut log = LockedLog::acquire(path)?;
    log.append(record)
}

/// Read all records from a JSONL file. Malformed lines are skipped so one
/// corrupt write cannot poison the rest of the log.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LedgerError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(&line) {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!(%err, path = %path.display(), "skipping malformed history line");
            }
        }
    }

    Ok(records)
}

/// Write data atomically using temp file + rename.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, data)?;
    std::fs::rename(temp_path, path)?;
    Ok(())
}

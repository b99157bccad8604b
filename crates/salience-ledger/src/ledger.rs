//! Session-scoped history ledger and the analytical queries over it

use crate::error::LedgerError;
use crate::io::{atomic_write, read_jsonl, LockedLog};
use crate::paths::LedgerPaths;
use crate::types::{truncate_preview, HistoryRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;
use uuid::Uuid;

/// Default minimum appearance count before a file can be flagged as
/// underutilized; guards against flagging newly registered items.
pub const DEFAULT_MIN_APPEARANCES: usize = 5;
/// Default HOT-ratio below which a file counts as underutilized.
pub const DEFAULT_HOT_RATIO_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone)]
struct ActiveSession {
    id: String,
    last_turn: Option<u64>,
}

/// Append-only record of scoring decisions, one JSONL log per session.
///
/// The ledger never calls back into the scorer; the host feeds it each
/// turn's output and queries it for meta-analysis.
#[derive(Debug)]
pub struct HistoryLedger {
    paths: LedgerPaths,
    active: Option<ActiveSession>,
}

/// Per-file usage aggregated from history.
#[derive(Debug, Clone, Serialize)]
pub struct FileUsage {
    pub path: String,
    pub hot_count: usize,
    pub warm_count: usize,
    pub sessions: BTreeSet<String>,
    pub last_seen_turn: Option<u64>,
}

/// Unordered pair of files observed HOT in the same turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoactivationPair {
    pub first: String,
    pub second: String,
    pub count: usize,
}

/// How often a keyword fired, and which files it lit up.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordEffectiveness {
    pub keyword: String,
    pub turns_triggered: usize,
    pub files_activated: BTreeSet<String>,
}

/// Aggregate statistics over the whole store.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerSummary {
    pub total_turns: usize,
    pub total_sessions: usize,
    pub avg_hot_files: f64,
}

/// A tracked file that rarely reaches HOT relative to its lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct UnderutilizedFile {
    pub path: String,
    pub appearances: usize,
    pub hot_count: usize,
    pub hot_ratio: f64,
}

impl HistoryLedger {
    /// Ledger over the default store under the user's home directory.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self::with_paths(LedgerPaths::new()?))
    }

    pub fn with_paths(paths: LedgerPaths) -> Self {
        Self {
            paths,
            active: None,
        }
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// The session currently targeted by `record_turn`, if any.
    pub fn active_session(&self) -> Option<&str> {
        self.active.as_ref().map(|s| s.id.as_str())
    }

    /// Last turn number recorded into the active session, if any.
    pub fn last_recorded_turn(&self) -> Option<u64> {
        self.active.as_ref().and_then(|s| s.last_turn)
    }

    /// Generate a fresh opaque session id and make it the target of
    /// subsequent `record_turn` calls.
    pub fn start_new_session(&mut self) -> String {
        let id = Uuid::new_v4().to_string();
        self.active = Some(ActiveSession {
            id: id.clone(),
            last_turn: None,
        });
        debug!(session = %id, "started history session");
        id
    }

    /// Explicitly resume a session started by an earlier process,
    /// recovering the last recorded turn number from its log.
    pub fn resume_session(&mut self, session_id: &str) -> Result<(), LedgerError> {
        let records: Vec<HistoryRecord> = read_jsonl(&self.paths.session_log(session_id))?;
        let last_turn = records.iter().map(|r| r.turn_number).max();
        self.active = Some(ActiveSession {
            id: session_id.to_string(),
            last_turn,
        });
        debug!(session = session_id, ?last_turn, "resumed history session");
        Ok(())
    }

    /// Append one immutable record for the active session (starting a
    /// session lazily if none is active). Turn numbers must be strictly
    /// increasing per session. The append happens under the log's
    /// exclusive lock; the in-memory cursor advances only after the write
    /// lands, so a failed write leaves prior records and sequencing
    /// untouched.
    pub fn record_turn(
        &mut self,
        turn_number: u64,
        hot_files: Vec<String>,
        warm_files: Vec<String>,
        activated_keywords: BTreeSet<String>,
        message_preview: &str,
    ) -> Result<(), LedgerError> {
        if let Some(ActiveSession {
            last_turn: Some(last),
            ..
        }) = &self.active
        {
            if turn_number <= *last {
                return Err(LedgerError::OutOfOrderTurn {
                    last: *last,
                    attempted: turn_number,
                });
            }
        }

        let session_id = self
            .active
            .get_or_insert_with(|| ActiveSession {
                id: Uuid::new_v4().to_string(),
                last_turn: None,
            })
            .id
            .clone();

        let record = HistoryRecord {
            session_id: session_id.clone(),
            turn_number,
            hot_files,
            warm_files,
            activated_keywords,
            message_preview: truncate_preview(message_preview),
            timestamp: Utc::now(),
        };

        let mut log = LockedLog::acquire(&self.paths.session_log(&session_id))?;
        log.append(&record)?;
        drop(log);

        if let Some(session) = self.active.as_mut() {
            session.last_turn = Some(turn_number);
        }
        debug!(session = %session_id, turn = turn_number, "recorded turn");
        Ok(())
    }

    /// All records for one session in turn order; empty (not an error) for
    /// unknown sessions.
    pub fn query_session(&self, session_id: &str) -> Result<Vec<HistoryRecord>, LedgerError> {
        let mut records: Vec<HistoryRecord> =
            read_jsonl(&self.paths.session_log(session_id))?;
        records.sort_by_key(|r| r.turn_number);
        Ok(records)
    }

    /// Usage counts for one file, over all sessions or a caller-chosen
    /// subset. Recency across sessions is resolved by record timestamp,
    /// since turn numbers restart per session.
    pub fn query_file(
        &self,
        path: &str,
        sessions: Option<&[String]>,
    ) -> Result<FileUsage, LedgerError> {
        let records = match sessions {
            Some(ids) => self.records_for(ids)?,
            None => self.all_records()?,
        };

        let mut usage = FileUsage {
            path: path.to_string(),
            hot_count: 0,
            warm_count: 0,
            sessions: BTreeSet::new(),
            last_seen_turn: None,
        };

        for record in &records {
            let hot = record.hot_files.iter().any(|f| f == path);
            let warm = record.warm_files.iter().any(|f| f == path);
            if !hot && !warm {
                continue;
            }
            if hot {
                usage.hot_count += 1;
            }
            if warm {
                usage.warm_count += 1;
            }
            usage.sessions.insert(record.session_id.clone());
            // records are in timestamp order, so the last hit wins
            usage.last_seen_turn = Some(record.turn_number);
        }

        Ok(usage)
    }

    /// Empirical co-activation: counts per unordered pair of files that
    /// appeared HOT in the same record, independent of any configured
    /// partner relation. Sorted by descending count, then by pair key.
    pub fn query_coactivation(&self) -> Result<Vec<CoactivationPair>, LedgerError> {
        let mut counts: BTreeMap<(String, String), usize> = BTreeMap::new();

        for record in self.all_records()? {
            let mut hot: Vec<&String> = record.hot_files.iter().collect();
            hot.sort();
            hot.dedup();
            for i in 0..hot.len() {
                for j in (i + 1)..hot.len() {
                    *counts
                        .entry((hot[i].clone(), hot[j].clone()))
                        .or_default() += 1;
                }
            }
        }

        let mut pairs: Vec<CoactivationPair> = counts
            .into_iter()
            .map(|((first, second), count)| CoactivationPair {
                first,
                second,
                count,
            })
            .collect();
        pairs.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.first.cmp(&b.first))
                .then_with(|| a.second.cmp(&b.second))
        });
        Ok(pairs)
    }

    /// Per-keyword trigger counts plus the distinct files activated in the
    /// turns it fired (activation pins a file at 1.0, so those are the
    /// record's HOT files).
    pub fn query_keyword_effectiveness(
        &self,
    ) -> Result<Vec<KeywordEffectiveness>, LedgerError> {
        let mut stats: BTreeMap<String, (usize, BTreeSet<String>)> = BTreeMap::new();

        for record in self.all_records()? {
            for keyword in &record.activated_keywords {
                let entry = stats.entry(keyword.clone()).or_default();
                entry.0 += 1;
                entry.1.extend(record.hot_files.iter().cloned());
            }
        }

        let mut out: Vec<KeywordEffectiveness> = stats
            .into_iter()
            .map(
                |(keyword, (turns_triggered, files_activated))| KeywordEffectiveness {
                    keyword,
                    turns_triggered,
                    files_activated,
                },
            )
            .collect();
        out.sort_by(|a, b| {
            b.turns_triggered
                .cmp(&a.turns_triggered)
                .then_with(|| a.keyword.cmp(&b.keyword))
        });
        Ok(out)
    }

    pub fn get_summary(&self) -> Result<LedgerSummary, LedgerError> {
        let records = self.all_records()?;
        let total_turns = records.len();
        let avg_hot_files = if total_turns == 0 {
            0.0
        } else {
            records.iter().map(|r| r.hot_files.len()).sum::<usize>() as f64 / total_turns as f64
        };

        Ok(LedgerSummary {
            total_turns,
            total_sessions: self.paths.session_ids()?.len(),
            avg_hot_files,
        })
    }

    /// Files seen in at least `min_appearances` turns since they first
    /// appeared whose HOT ratio stays below `hot_ratio_threshold`.
    /// Appearances count every turn from the first sighting onward, so a
    /// file that went quiet still accumulates lifetime.
    pub fn find_underutilized(
        &self,
        min_appearances: usize,
        hot_ratio_threshold: f64,
    ) -> Result<Vec<UnderutilizedFile>, LedgerError> {
        let records = self.all_records()?;

        let mut first_seen: HashMap<String, usize> = HashMap::new();
        let mut hot_counts: HashMap<String, usize> = HashMap::new();
        for (index, record) in records.iter().enumerate() {
            for file in record.hot_files.iter().chain(record.warm_files.iter()) {
                first_seen.entry(file.clone()).or_insert(index);
            }
            for file in &record.hot_files {
                *hot_counts.entry(file.clone()).or_default() += 1;
            }
        }

        let mut out = Vec::new();
        for (path, first) in first_seen {
            let appearances = records.len() - first;
            if appearances < min_appearances {
                continue;
            }
            let hot_count = hot_counts.get(&path).copied().unwrap_or(0);
            let hot_ratio = hot_count as f64 / appearances as f64;
            if hot_ratio < hot_ratio_threshold {
                out.push(UnderutilizedFile {
                    path,
                    appearances,
                    hot_count,
                    hot_ratio,
                });
            }
        }

        out.sort_by(|a, b| {
            a.hot_ratio
                .partial_cmp(&b.hot_ratio)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.path.cmp(&b.path))
        });
        Ok(out)
    }

    /// Irreversibly delete history: everything, or only records older than
    /// `older_than`. Returns the number of records removed. Scorer state
    /// is untouched; the two components are independently lifecycled.
    pub fn clear_history(
        &mut self,
        older_than: Option<DateTime<Utc>>,
    ) -> Result<usize, LedgerError> {
        let mut removed = 0;

        for id in self.paths.session_ids()? {
            let log_path = self.paths.session_log(&id);
            let records: Vec<HistoryRecord> = read_jsonl(&log_path)?;

            match older_than {
                None => {
                    removed += records.len();
                    std::fs::remove_file(&log_path)?;
                }
                Some(cutoff) => {
                    let (old, kept): (Vec<_>, Vec<_>) =
                        records.into_iter().partition(|r| r.timestamp < cutoff);
                    if old.is_empty() {
                        continue;
                    }
                    removed += old.len();

                    // Hold the appenders' lock across the rewrite
                    let lock = LockedLog::acquire(&log_path)?;
                    if kept.is_empty() {
                        std::fs::remove_file(&log_path)?;
                    } else {
                        let mut buf = String::new();
                        for record in &kept {
                            buf.push_str(&serde_json::to_string(record)?);
                            buf.push('\n');
                        }
                        atomic_write(&log_path, buf.as_bytes())?;
                    }
                    drop(lock);
                }
            }
        }

        debug!(removed, "cleared history records");
        Ok(removed)
    }

    fn records_for(&self, sessions: &[String]) -> Result<Vec<HistoryRecord>, LedgerError> {
        let mut records = Vec::new();
        for id in sessions {
            records.extend(read_jsonl::<HistoryRecord>(&self.paths.session_log(id))?);
        }
        sort_by_time(&mut records);
        Ok(records)
    }

    fn all_records(&self) -> Result<Vec<HistoryRecord>, LedgerError> {
        let ids = self.paths.session_ids()?;
        self.records_for(&ids)
    }
}

fn sort_by_time(records: &mut [HistoryRecord]) {
    records.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.turn_number.cmp(&b.turn_number))
    });
}

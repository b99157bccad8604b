use salience_core::{Scorer, ScorerConfig};
use salience_ledger::{HistoryLedger, LedgerPaths};

pub fn sample_scorer() -> Scorer {
    let mut scorer = Scorer::new(ScorerConfig::new());
    scorer.register_file("notes/git.md", &["git", "commit"], &["notes/ci.md"], false);
    scorer.register_file("notes/ci.md", &["pipeline"], &[], false);
    scorer.register_file("notes/style.md", &[], &[], true);
    scorer
}

pub fn temp_ledger(temp: &tempfile::TempDir) -> HistoryLedger {
    HistoryLedger::with_paths(LedgerPaths::with_root(temp.path()))
}

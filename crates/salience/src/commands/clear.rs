use super::store;
use salience_ledger::HistoryLedger;

pub fn run(older_than_days: Option<i64>) -> anyhow::Result<()> {
    let paths = store::ledger_paths()?;
    let mut ledger = HistoryLedger::with_paths(paths);

    let cutoff = older_than_days.map(|days| chrono::Utc::now() - chrono::Duration::days(days));
    let removed = ledger.clear_history(cutoff)?;

    println!("Removed {} history records", removed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::BTreeSet;

    #[test]
    #[serial]
    fn test_clear_removes_all_records() {
        let temp = tempfile::TempDir::new().unwrap();
        std::env::set_var("SALIENCE_HOME", temp.path());

        let paths = store::ledger_paths().unwrap();
        let mut ledger = store::open_ledger(&paths).unwrap();
        ledger
            .record_turn(1, vec!["a.md".to_string()], vec![], BTreeSet::new(), "m")
            .unwrap();

        run(None).unwrap();

        assert!(paths.session_ids().unwrap().is_empty());

        std::env::remove_var("SALIENCE_HOME");
    }
}

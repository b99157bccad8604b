use super::store;
use salience_ledger::HistoryLedger;

pub fn run(min_appearances: usize, hot_ratio: f64) -> anyhow::Result<()> {
    let paths = store::ledger_paths()?;
    let ledger = HistoryLedger::with_paths(paths);

    let summary = ledger.get_summary()?;
    println!("Turns recorded: {}", summary.total_turns);
    println!("Sessions: {}", summary.total_sessions);
    println!("Avg HOT files/turn: {:.2}", summary.avg_hot_files);

    let pairs = ledger.query_coactivation()?;
    if !pairs.is_empty() {
        println!("\nObserved co-activation:");
        for pair in pairs.iter().take(10) {
            println!("  {} + {} ({}x)", pair.first, pair.second, pair.count);
        }
    }

    let keywords = ledger.query_keyword_effectiveness()?;
    if !keywords.is_empty() {
        println!("\nKeyword effectiveness:");
        for stat in keywords.iter().take(10) {
            println!(
                "  {} -> {} turns, {} files",
                stat.keyword,
                stat.turns_triggered,
                stat.files_activated.len()
            );
        }
    }

    let underutilized = ledger.find_underutilized(min_appearances, hot_ratio)?;
    if !underutilized.is_empty() {
        println!("\nUnderutilized:");
        for file in &underutilized {
            println!(
                "  {} ({} turns tracked, {} hot)",
                file.path, file.appearances, file.hot_count
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use salience_ledger::{DEFAULT_HOT_RATIO_THRESHOLD, DEFAULT_MIN_APPEARANCES};
    use serial_test::serial;
    use std::collections::BTreeSet;

    #[test]
    #[serial]
    fn test_report_runs_on_populated_store() {
        let temp = tempfile::TempDir::new().unwrap();
        std::env::set_var("SALIENCE_HOME", temp.path());

        let paths = store::ledger_paths().unwrap();
        let mut ledger = store::open_ledger(&paths).unwrap();
        for turn in 1..=6 {
            ledger
                .record_turn(
                    turn,
                    vec!["a.md".to_string(), "b.md".to_string()],
                    vec!["c.md".to_string()],
                    ["deploy".to_string()].into(),
                    "msg",
                )
                .unwrap();
        }

        assert!(run(DEFAULT_MIN_APPEARANCES, DEFAULT_HOT_RATIO_THRESHOLD).is_ok());

        std::env::remove_var("SALIENCE_HOME");
    }
}

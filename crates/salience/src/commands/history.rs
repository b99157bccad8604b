use super::store;
use salience_ledger::HistoryLedger;

pub fn run_sessions() -> anyhow::Result<()> {
    let paths = store::ledger_paths()?;
    let ids = paths.session_ids()?;

    if ids.is_empty() {
        println!("No recorded sessions");
        return Ok(());
    }
    for id in ids {
        println!("{}", id);
    }
    Ok(())
}

pub fn run(session: Option<&str>, limit: usize) -> anyhow::Result<()> {
    let paths = store::ledger_paths()?;
    let session = match session {
        Some(id) => id.to_string(),
        None => match store::load_session_state(&paths) {
            Some(state) => state.session_id,
            None => {
                println!("No session history");
                return Ok(());
            }
        },
    };

    let ledger = HistoryLedger::with_paths(paths);
    let records = ledger.query_session(&session)?;
    if records.is_empty() {
        println!("No records for session {}", session);
        return Ok(());
    }

    let start = records.len().saturating_sub(limit);
    println!("Session {} ({} turns)", session, records.len());
    for record in &records[start..] {
        println!(
            "  turn {:>4} | {} | hot:{} warm:{} | {}",
            record.turn_number,
            record.timestamp.format("%Y-%m-%d %H:%M"),
            record.hot_files.len(),
            record.warm_files.len(),
            record.message_preview,
        );
    }
    Ok(())
}

pub fn run_file(path: &str) -> anyhow::Result<()> {
    let paths = store::ledger_paths()?;
    let ledger = HistoryLedger::with_paths(paths);

    let usage = ledger.query_file(path, None)?;
    println!("{}", serde_json::to_string_pretty(&usage)?);
    Ok(())
}

//! Score one turn and emit the recommended context

use super::store;
use salience_core::Scorer;
use tracing::warn;

const CONTENT_PLACEHOLDER: &str = "[content unavailable]";

pub fn run(message: &str, number: Option<u64>) -> anyhow::Result<()> {
    let paths = store::ledger_paths()?;
    let mut scorer = store::load_scorer(&paths)?;
    let mut ledger = store::open_ledger(&paths)?;

    let turn_number =
        number.unwrap_or_else(|| ledger.last_recorded_turn().map_or(1, |last| last + 1));

    let report = scorer.process_turn(message, turn_number);
    store::save_scorer(&paths, &scorer)?;

    // History is best-effort telemetry: a failed append degrades to a
    // warning and must never abort the turn
    if let Err(err) = ledger.record_turn(
        turn_number,
        report.tiers.hot.clone(),
        report.tiers.warm.clone(),
        report.activated_keywords.clone(),
        message,
    ) {
        warn!(%err, turn = turn_number, "failed to record turn history");
    }

    let context = render_context(&scorer);
    if context.is_empty() {
        println!("(no context recommended)");
    } else {
        println!("{}", context);
    }
    Ok(())
}

/// HOT files in full, WARM files as extracted headers. Unreadable content
/// becomes a placeholder so a bad path cannot abort the turn.
fn render_context(scorer: &Scorer) -> String {
    let recommendation = scorer.get_context_recommendation();
    let mut parts = Vec::new();

    for path in &recommendation.include_full {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!(%err, path = %path, "failed to read full content");
                CONTENT_PLACEHOLDER.to_string()
            }
        };
        parts.push(format!("[HOT] {}\n{}", path, content));
    }

    for path in &recommendation.include_header {
        let header = match scorer.extract_header(path) {
            Ok(header) => header,
            Err(err) => {
                warn!(%err, "failed to extract header");
                CONTENT_PLACEHOLDER.to_string()
            }
        };
        parts.push(format!("[WARM] {} (header)\n{}", path, header));
    }

    parts.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use salience_core::ScorerConfig;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_render_context_marks_tiers() {
        let temp = tempfile::TempDir::new().unwrap();
        let hot_path = temp.path().join("hot.md");
        std::fs::write(&hot_path, "# Hot\nfull body").unwrap();
        let warm_path = temp.path().join("warm.md");
        let mut warm_file = std::fs::File::create(&warm_path).unwrap();
        for i in 0..60 {
            writeln!(warm_file, "warm line {}", i).unwrap();
        }

        let mut scorer = Scorer::new(ScorerConfig::new());
        scorer.register_file(hot_path.to_str().unwrap(), &[], &[], false);
        scorer.register_file(warm_path.to_str().unwrap(), &[], &[], false);
        scorer.set_score(hot_path.to_str().unwrap(), 0.9);
        scorer.set_score(warm_path.to_str().unwrap(), 0.5);

        let context = render_context(&scorer);
        assert!(context.contains("[HOT]"));
        assert!(context.contains("full body"));
        assert!(context.contains("[WARM]"));
        assert!(context.contains("warm line 0"));
        // Header is truncated to the configured line count
        assert!(!context.contains("warm line 40"));
    }

    #[test]
    fn test_render_context_substitutes_placeholder() {
        let mut scorer = Scorer::new(ScorerConfig::new());
        scorer.register_file("missing/file.md", &[], &[], false);
        scorer.set_score("missing/file.md", 0.9);

        let context = render_context(&scorer);
        assert!(context.contains(CONTENT_PLACEHOLDER));
    }

    #[test]
    #[serial]
    fn test_turn_records_history_and_persists_scores() {
        let temp = tempfile::TempDir::new().unwrap();
        std::env::set_var("SALIENCE_HOME", temp.path());

        super::super::track::run_track(
            "notes/git.md",
            &["git".to_string()],
            &[],
            false,
        )
        .unwrap();

        run("how do I use git here", None).unwrap();
        run("something unrelated", None).unwrap();

        let paths = store::ledger_paths().unwrap();
        let scorer = store::load_scorer(&paths).unwrap();
        // Activated to 1.0 on turn 1, decayed once on turn 2
        let score = scorer.get_score("notes/git.md").unwrap();
        assert!((score - 0.75).abs() < 1e-9);

        let session = store::load_session_state(&paths).unwrap().session_id;
        let ledger = store::open_ledger(&paths).unwrap();
        let records = ledger.query_session(&session).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].turn_number, 1);
        assert_eq!(records[0].hot_files, vec!["notes/git.md"]);
        assert!(records[0].activated_keywords.contains("git"));
        assert!(records[1].hot_files.is_empty());

        std::env::remove_var("SALIENCE_HOME");
    }
}

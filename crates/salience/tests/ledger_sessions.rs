mod common;

use common::temp_ledger;
use salience_ledger::LedgerError;
use std::collections::BTreeSet;

fn keywords(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn test_session_records_in_turn_order() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut ledger = temp_ledger(&temp);
    let session = ledger.start_new_session();

    for turn in 1..=8 {
        ledger
            .record_turn(
                turn,
                vec![format!("hot{}.md", turn)],
                vec![],
                keywords(&["kw"]),
                "message",
            )
            .unwrap();
    }

    let records = ledger.query_session(&session).unwrap();
    assert_eq!(records.len(), 8);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.turn_number, (i + 1) as u64);
        assert_eq!(record.session_id, session);
    }
}

#[test]
fn test_out_of_order_turn_is_programmer_error() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut ledger = temp_ledger(&temp);
    ledger.start_new_session();

    ledger
        .record_turn(3, vec![], vec![], BTreeSet::new(), "")
        .unwrap();

    let err = ledger
        .record_turn(2, vec![], vec![], BTreeSet::new(), "")
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::OutOfOrderTurn {
            last: 3,
            attempted: 2
        }
    ));
}

#[test]
fn test_coactivation_counts_match_joint_hot_records() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut ledger = temp_ledger(&temp);

    // Two sessions; (a, b) are jointly HOT in three records total
    ledger.start_new_session();
    ledger
        .record_turn(
            1,
            vec!["a.md".to_string(), "b.md".to_string()],
            vec![],
            BTreeSet::new(),
            "",
        )
        .unwrap();
    ledger
        .record_turn(
            2,
            vec!["b.md".to_string(), "a.md".to_string()],
            vec![],
            BTreeSet::new(),
            "",
        )
        .unwrap();

    ledger.start_new_session();
    ledger
        .record_turn(
            1,
            vec!["a.md".to_string(), "b.md".to_string(), "c.md".to_string()],
            vec![],
            BTreeSet::new(),
            "",
        )
        .unwrap();

    let pairs = ledger.query_coactivation().unwrap();
    assert_eq!(pairs[0].first, "a.md");
    assert_eq!(pairs[0].second, "b.md");
    assert_eq!(pairs[0].count, 3);
}

#[test]
fn test_clear_history_leaves_scorer_alone() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut ledger = temp_ledger(&temp);
    let mut scorer = common::sample_scorer();
    scorer.set_score("notes/git.md", 0.9);

    ledger.start_new_session();
    ledger
        .record_turn(1, vec!["notes/git.md".to_string()], vec![], BTreeSet::new(), "")
        .unwrap();

    let removed = ledger.clear_history(None).unwrap();
    assert_eq!(removed, 1);

    // The two components are independently lifecycled
    assert_eq!(scorer.get_score("notes/git.md"), Some(0.9));
    assert_eq!(scorer.get_status().tracked, 3);
}

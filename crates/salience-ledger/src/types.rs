//! History record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Maximum stored length of a message preview, in characters.
pub const MAX_PREVIEW_CHARS: usize = 200;

/// One scoring decision, appended per turn. Records are immutable once
/// written; the log is append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub session_id: String,
    pub turn_number: u64,
    #[serde(default)]
    pub hot_files: Vec<String>,
    #[serde(default)]
    pub warm_files: Vec<String>,
    #[serde(default)]
    pub activated_keywords: BTreeSet<String>,
    #[serde(default)]
    pub message_preview: String,
    pub timestamp: DateTime<Utc>,
}

/// Truncate a message to the stored preview length, on a char boundary.
pub fn truncate_preview(text: &str) -> String {
    text.chars().take(MAX_PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_roundtrip() {
        let record = HistoryRecord {
            session_id: "s1".to_string(),
            turn_number: 3,
            hot_files: vec!["a.md".to_string()],
            warm_files: vec!["b.md".to_string()],
            activated_keywords: ["git".to_string()].into(),
            message_preview: "how do I commit".to_string(),
            timestamp: Utc::now(),
        };

        let json = serde_json::to_string(&record).unwrap();
        let parsed: HistoryRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.session_id, "s1");
        assert_eq!(parsed.turn_number, 3);
        assert_eq!(parsed.hot_files, vec!["a.md"]);
        assert!(parsed.activated_keywords.contains("git"));
    }

    #[test]
    fn test_record_backwards_compatible() {
        let old_json = r#"{"session_id":"s1","turn_number":1,"timestamp":"2025-01-01T00:00:00Z"}"#;
        let parsed: HistoryRecord = serde_json::from_str(old_json).unwrap();
        assert!(parsed.hot_files.is_empty());
        assert!(parsed.warm_files.is_empty());
        assert!(parsed.activated_keywords.is_empty());
        assert!(parsed.message_preview.is_empty());
    }

    #[test]
    fn test_truncate_preview_short_text_untouched() {
        assert_eq!(truncate_preview("short"), "short");
    }

    #[test]
    fn test_truncate_preview_caps_length() {
        let long = "x".repeat(MAX_PREVIEW_CHARS * 2);
        assert_eq!(truncate_preview(&long).chars().count(), MAX_PREVIEW_CHARS);
    }

    #[test]
    fn test_truncate_preview_respects_char_boundaries() {
        let text = "é".repeat(MAX_PREVIEW_CHARS + 10);
        let preview = truncate_preview(&text);
        assert_eq!(preview.chars().count(), MAX_PREVIEW_CHARS);
        assert!(preview.chars().all(|c| c == 'é'));
    }
}

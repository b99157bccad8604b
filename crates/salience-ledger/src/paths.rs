//! Path resolution for history storage

use std::path::{Path, PathBuf};

/// Resolves on-disk locations for the ledger and host snapshots.
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    root: PathBuf,
}

impl LedgerPaths {
    /// Default root under the user's home directory.
    pub fn new() -> std::io::Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
        })?;
        Ok(Self {
            root: home.join(".salience"),
        })
    }

    /// Explicit root, used by tests and embedding hosts.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one append-only log per session.
    pub fn sessions_dir(&self) -> PathBuf {
        self.root.join("sessions")
    }

    /// The session's JSONL log.
    pub fn session_log(&self, session_id: &str) -> PathBuf {
        self.sessions_dir().join(format!("{}.jsonl", session_id))
    }

    /// Registry snapshot persisted by hosts between processes.
    pub fn registry_snapshot(&self) -> PathBuf {
        self.root.join("registry.json")
    }

    /// Host-side record of the session currently being appended to.
    pub fn session_state_path(&self) -> PathBuf {
        self.root.join("session_state.json")
    }

    /// All session ids with a log on disk, sorted for determinism.
    pub fn session_ids(&self) -> std::io::Result<Vec<String>> {
        let dir = self.sessions_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("jsonl") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_log_path() {
        let paths = LedgerPaths::with_root("/tmp/salience-test");
        let log = paths.session_log("abc123");
        assert!(log.ends_with("sessions/abc123.jsonl"));
    }

    #[test]
    fn test_default_root_under_home() {
        let paths = LedgerPaths::new().unwrap();
        assert!(paths.root().ends_with(".salience"));
    }

    #[test]
    fn test_session_ids_empty_when_missing() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = LedgerPaths::with_root(temp.path());
        assert!(paths.session_ids().unwrap().is_empty());
    }

    #[test]
    fn test_session_ids_sorted_and_filtered() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = LedgerPaths::with_root(temp.path());
        std::fs::create_dir_all(paths.sessions_dir()).unwrap();
        std::fs::write(paths.session_log("b"), "").unwrap();
        std::fs::write(paths.session_log("a"), "").unwrap();
        std::fs::write(paths.sessions_dir().join("notes.txt"), "").unwrap();

        assert_eq!(paths.session_ids().unwrap(), vec!["a", "b"]);
    }
}

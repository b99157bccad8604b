//! Shared state loading/saving for CLI commands

use anyhow::Context;
use salience_core::{Registry, Scorer, ScorerConfig};
use salience_ledger::{atomic_write, HistoryLedger, LedgerPaths};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Store root: `SALIENCE_HOME` override, else `~/.salience`.
pub fn ledger_paths() -> anyhow::Result<LedgerPaths> {
    match std::env::var_os("SALIENCE_HOME") {
        Some(root) => Ok(LedgerPaths::with_root(root)),
        None => Ok(LedgerPaths::new()?),
    }
}

/// Optional scorer overrides read from `config.json` under the store root.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub decay_factor: Option<f64>,
    #[serde(default)]
    pub coactivation_boost: Option<f64>,
    #[serde(default)]
    pub header_lines: Option<usize>,
    #[serde(default)]
    pub reset_clears_registry: Option<bool>,
}

pub fn load_config(root: &Path) -> ScorerConfig {
    let mut config = ScorerConfig::new();

    let content = match std::fs::read_to_string(root.join("config.json")) {
        Ok(content) => content,
        Err(_) => return config,
    };
    let file = match serde_json::from_str::<ConfigFile>(&content) {
        Ok(file) => file,
        Err(_) => return config,
    };

    if let Some(v) = file.decay_factor {
        config.decay_factor = v;
    }
    if let Some(v) = file.coactivation_boost {
        config.coactivation_boost = v;
    }
    if let Some(v) = file.header_lines {
        config.header_lines = v;
    }
    if let Some(v) = file.reset_clears_registry {
        config.reset_clears_registry = v;
    }
    config
}

pub fn load_registry(paths: &LedgerPaths) -> anyhow::Result<Registry> {
    let snapshot = paths.registry_snapshot();
    if !snapshot.exists() {
        return Ok(Registry::new());
    }

    let content = std::fs::read_to_string(&snapshot)
        .with_context(|| format!("reading {}", snapshot.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", snapshot.display()))
}

pub fn load_scorer(paths: &LedgerPaths) -> anyhow::Result<Scorer> {
    Ok(Scorer::with_registry(
        load_config(paths.root()),
        load_registry(paths)?,
    ))
}

pub fn save_scorer(paths: &LedgerPaths, scorer: &Scorer) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(scorer.registry())?;
    atomic_write(&paths.registry_snapshot(), json.as_bytes())?;
    Ok(())
}

/// The session the CLI appends to across invocations.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionState {
    pub session_id: String,
}

pub fn load_session_state(paths: &LedgerPaths) -> Option<SessionState> {
    let content = std::fs::read_to_string(paths.session_state_path()).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn save_session_state(paths: &LedgerPaths, state: &SessionState) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    atomic_write(&paths.session_state_path(), json.as_bytes())?;
    Ok(())
}

/// Ledger resumed onto the persisted session, or started fresh.
pub fn open_ledger(paths: &LedgerPaths) -> anyhow::Result<HistoryLedger> {
    let mut ledger = HistoryLedger::with_paths(paths.clone());
    match load_session_state(paths) {
        Some(state) => ledger.resume_session(&state.session_id)?,
        None => {
            let session_id = ledger.start_new_session();
            save_session_state(paths, &SessionState { session_id })?;
        }
    }
    Ok(ledger)
}

//! Two-phase attention scorer: decay, then keyword activation with
//! single-hop co-activation

use crate::config::ScorerConfig;
use crate::error::ScorerError;
use crate::registry::Registry;
use crate::types::{
    ContextRecommendation, StatusSnapshot, Tier, TierAssignments, TrackedItem, TurnReport,
    WARM_THRESHOLD,
};
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// Attention scorer. Owns the registry of tracked items; consumes one
/// message per turn and maintains every item's score.
#[derive(Debug)]
pub struct Scorer {
    config: ScorerConfig,
    registry: Registry,
    /// Case-folded keyword -> item keys; rebuilt on registration changes
    keyword_index: BTreeMap<String, BTreeSet<String>>,
    /// Declared co-activation partners as an undirected graph, so the
    /// relation is symmetric even when only one side declares it
    coactivation_graph: UnGraph<String, ()>,
    node_indices: HashMap<String, NodeIndex>,
    last_turn: Option<u64>,
}

impl Scorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self::with_registry(config, Registry::new())
    }

    /// Restore a scorer from a previously snapshotted registry.
    pub fn with_registry(config: ScorerConfig, registry: Registry) -> Self {
        let mut scorer = Self {
            config,
            registry,
            keyword_index: BTreeMap::new(),
            coactivation_graph: UnGraph::new_undirected(),
            node_indices: HashMap::new(),
            last_turn: None,
        };
        scorer.rebuild_lookup();
        scorer
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Borrow the registry, e.g. to snapshot it at a process boundary.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Upsert a tracked item. Re-registering an existing key replaces its
    /// keywords, partners, and pin flag but never resets the score; new
    /// items start at 0.0.
    pub fn register_file(
        &mut self,
        path: &str,
        keywords: &[&str],
        coactivate_with: &[&str],
        pinned: bool,
    ) {
        if path.is_empty() {
            warn!("ignoring registration with empty path");
            return;
        }

        let keywords: BTreeSet<String> = keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        let coactivate_with: BTreeSet<String> = coactivate_with
            .iter()
            .filter(|p| !p.is_empty() && **p != path)
            .map(|p| p.to_string())
            .collect();

        match self.registry.get_mut(path) {
            Some(item) => {
                item.keywords = keywords;
                item.coactivate_with = coactivate_with;
                item.pinned = pinned;
            }
            None => {
                self.registry.insert(
                    path.to_string(),
                    TrackedItem {
                        score: 0.0,
                        keywords,
                        coactivate_with,
                        pinned,
                    },
                );
            }
        }

        self.rebuild_lookup();
    }

    /// Remove a tracked item. Returns whether it was present; absence is
    /// not an error.
    pub fn unregister_file(&mut self, path: &str) -> bool {
        let removed = self.registry.remove(path).is_some();
        if removed {
            self.rebuild_lookup();
        }
        removed
    }

    /// Score one turn: decay every item (with the pin floor), then set
    /// every keyword-matched item to 1.0 and raise its partners to the
    /// co-activation floor. Co-activation is one hop from the snapshot of
    /// items directly activated this turn.
    pub fn process_turn(&mut self, message_text: &str, turn_number: u64) -> TurnReport {
        // Phase 1: decay
        for (_path, item) in self.registry.iter_mut() {
            item.score *= self.config.decay_factor;
            if item.pinned {
                item.score = item.score.max(WARM_THRESHOLD);
            }
        }

        // Phase 2: activation. One case-folded pass over the message;
        // a keyword matches anywhere as a substring, which subsumes
        // whole-word matches.
        let message = message_text.to_lowercase();
        let mut activated_keywords = BTreeSet::new();
        let mut activations: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (keyword, paths) in &self.keyword_index {
            if !message.contains(keyword.as_str()) {
                continue;
            }
            activated_keywords.insert(keyword.clone());
            for path in paths {
                activations
                    .entry(path.clone())
                    .or_default()
                    .push(keyword.clone());
            }
        }

        for path in activations.keys() {
            if let Some(item) = self.registry.get_mut(path) {
                item.score = 1.0;
            }
        }

        // Co-activation from this turn's snapshot only; raises are
        // max-based, so iteration order cannot matter.
        let mut boosted = 0usize;
        for path in activations.keys() {
            let Some(&idx) = self.node_indices.get(path) else {
                continue;
            };
            for neighbor in self.coactivation_graph.neighbors(idx) {
                let partner = &self.coactivation_graph[neighbor];
                if let Some(item) = self.registry.get_mut(partner) {
                    if item.score < self.config.coactivation_boost {
                        item.score = self.config.coactivation_boost;
                        boosted += 1;
                    }
                }
            }
        }

        self.last_turn = Some(turn_number);
        let tiers = self.get_tiers();
        debug!(
            turn = turn_number,
            activated = activations.len(),
            boosted,
            hot = tiers.hot.len(),
            warm = tiers.warm.len(),
            "turn scored"
        );

        TurnReport {
            turn_number,
            tiers,
            activated_keywords,
            activations,
        }
    }

    /// Partition all items by tier. Within each tier, keys are ordered by
    /// descending score, ties broken by ascending key.
    pub fn get_tiers(&self) -> TierAssignments {
        let mut hot = Vec::new();
        let mut warm = Vec::new();
        let mut cold = Vec::new();

        for (path, item) in self.registry.iter() {
            match Tier::from_score(item.score) {
                Tier::Hot => hot.push((path.clone(), item.score)),
                Tier::Warm => warm.push((path.clone(), item.score)),
                Tier::Cold => cold.push((path.clone(), item.score)),
            }
        }

        TierAssignments {
            hot: sort_tier(hot),
            warm: sort_tier(warm),
            cold: sort_tier(cold),
        }
    }

    /// `None` means "never registered", distinct from a score that has
    /// decayed to zero.
    pub fn get_score(&self, path: &str) -> Option<f64> {
        self.registry.get(path).map(|item| item.score)
    }

    /// Clamp `value` into [0, 1] and store it. Returns whether the path
    /// was tracked; clamping is the contract, not a failure.
    pub fn set_score(&mut self, path: &str, value: f64) -> bool {
        match self.registry.get_mut(path) {
            Some(item) => {
                item.score = value.clamp(0.0, 1.0);
                true
            }
            None => false,
        }
    }

    /// HOT items in full, WARM items as headers, COLD excluded. Purely
    /// derived from the tier partition.
    pub fn get_context_recommendation(&self) -> ContextRecommendation {
        let tiers = self.get_tiers();
        ContextRecommendation {
            include_full: tiers.hot,
            include_header: tiers.warm,
        }
    }

    /// First `header_lines` lines of the file at `path`.
    pub fn extract_header(&self, path: &str) -> Result<String, ScorerError> {
        self.extract_header_lines(path, self.config.header_lines)
    }

    /// First `n` lines of the file at `path`. Unreadable content is a
    /// [`ScorerError::ContentUnavailable`]; callers substitute a
    /// placeholder rather than aborting the turn.
    pub fn extract_header_lines(&self, path: &str, n: usize) -> Result<String, ScorerError> {
        let unavailable = |source: std::io::Error| ScorerError::ContentUnavailable {
            path: path.to_string(),
            source,
        };

        let file = File::open(Path::new(path)).map_err(unavailable)?;
        let reader = BufReader::new(file);

        let mut lines = Vec::with_capacity(n);
        for line in reader.lines().take(n) {
            lines.push(line.map_err(unavailable)?);
        }
        Ok(lines.join("\n"))
    }

    pub fn get_status(&self) -> StatusSnapshot {
        let mut pinned = 0;
        let mut hot = 0;
        let mut warm = 0;
        let mut cold = 0;

        for (_path, item) in self.registry.iter() {
            if item.pinned {
                pinned += 1;
            }
            match Tier::from_score(item.score) {
                Tier::Hot => hot += 1,
                Tier::Warm => warm += 1,
                Tier::Cold => cold += 1,
            }
        }

        StatusSnapshot {
            tracked: self.registry.len(),
            pinned,
            hot,
            warm,
            cold,
            last_turn: self.last_turn,
        }
    }

    /// Zero every score. Registrations (keywords, partners, pins) persist
    /// unless the config opts into a full registry wipe.
    pub fn reset_state(&mut self) {
        if self.config.reset_clears_registry {
            self.registry = Registry::new();
            self.rebuild_lookup();
        } else {
            for (_path, item) in self.registry.iter_mut() {
                item.score = 0.0;
            }
        }
        self.last_turn = None;
    }

    fn rebuild_lookup(&mut self) {
        self.keyword_index.clear();
        for (path, item) in self.registry.iter() {
            for keyword in &item.keywords {
                self.keyword_index
                    .entry(keyword.clone())
                    .or_default()
                    .insert(path.clone());
            }
        }

        let mut graph = UnGraph::new_undirected();
        let mut indices = HashMap::new();
        for (path, item) in self.registry.iter() {
            if item.coactivate_with.is_empty() {
                continue;
            }
            let from = node_for(&mut graph, &mut indices, path);
            for partner in &item.coactivate_with {
                let to = node_for(&mut graph, &mut indices, partner);
                graph.update_edge(from, to, ());
            }
        }

        self.coactivation_graph = graph;
        self.node_indices = indices;
    }
}

fn node_for(
    graph: &mut UnGraph<String, ()>,
    indices: &mut HashMap<String, NodeIndex>,
    key: &str,
) -> NodeIndex {
    if let Some(&idx) = indices.get(key) {
        return idx;
    }
    let idx = graph.add_node(key.to_string());
    indices.insert(key.to_string(), idx);
    idx
}

fn sort_tier(mut entries: Vec<(String, f64)>) -> Vec<String> {
    entries.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    entries.into_iter().map(|(path, _)| path).collect()
}

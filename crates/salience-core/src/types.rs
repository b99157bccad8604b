//! Core types for attention scoring

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Score at or above which an item is HOT.
pub const HOT_THRESHOLD: f64 = 0.8;
/// Score at or above which an item is WARM. Doubles as the pin floor.
pub const WARM_THRESHOLD: f64 = 0.25;

/// Attention tier classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    /// HOT (>=0.8): full content injection
    #[serde(rename = "HOT")]
    Hot,
    /// WARM (0.25-0.8): header injection
    #[serde(rename = "WARM")]
    Warm,
    /// COLD (<0.25): excluded
    #[serde(rename = "COLD")]
    Cold,
}

impl Tier {
    /// Tier is a pure function of score; nothing else feeds into it.
    pub fn from_score(score: f64) -> Self {
        if score >= HOT_THRESHOLD {
            Tier::Hot
        } else if score >= WARM_THRESHOLD {
            Tier::Warm
        } else {
            Tier::Cold
        }
    }
}

/// A tracked piece of long-lived context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedItem {
    /// Current attention score in [0, 1]
    pub score: f64,
    /// Case-folded trigger keywords
    #[serde(default)]
    pub keywords: BTreeSet<String>,
    /// Declared co-activation partners (treated as a symmetric relation)
    #[serde(default)]
    pub coactivate_with: BTreeSet<String>,
    /// Pinned items never drop below the WARM floor during scoring
    #[serde(default)]
    pub pinned: bool,
}

/// Tier partition; within each tier keys are ordered by descending score,
/// ties broken by ascending key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierAssignments {
    pub hot: Vec<String>,
    pub warm: Vec<String>,
    pub cold: Vec<String>,
}

/// Outcome of one scoring turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn_number: u64,
    pub tiers: TierAssignments,
    /// Keywords that matched somewhere in the message
    pub activated_keywords: BTreeSet<String>,
    /// Item key -> keywords that matched it this turn
    pub activations: BTreeMap<String, Vec<String>>,
}

/// What to load into the prompt window, derived purely from the tiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextRecommendation {
    /// HOT items: inject full content
    pub include_full: Vec<String>,
    /// WARM items: inject extracted headers only
    pub include_header: Vec<String>,
}

/// Read-only snapshot of scorer state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub tracked: usize,
    pub pinned: usize,
    pub hot: usize,
    pub warm: usize,
    pub cold: usize,
    pub last_turn: Option<u64>,
}

//! Attention scoring over tracked context items: registry, decay,
//! keyword activation, co-activation, tier classification

mod config;
mod error;
mod registry;
mod scorer;
mod types;

pub use config::ScorerConfig;
pub use error::ScorerError;
pub use registry::Registry;
pub use scorer::Scorer;
pub use types::{
    ContextRecommendation, StatusSnapshot, Tier, TierAssignments, TrackedItem, TurnReport,
    HOT_THRESHOLD, WARM_THRESHOLD,
};

//! Configuration for attention scoring

/// Scorer configuration
#[derive(Debug, Clone)]
pub struct ScorerConfig {
    /// Multiplicative shrinkage applied to every score once per turn
    pub decay_factor: f64,

    /// Score floor applied to partners of a directly activated item
    pub coactivation_boost: f64,

    /// Lines returned by header extraction
    pub header_lines: usize,

    /// When set, `reset_state` drops registrations entirely instead of
    /// zeroing scores while keeping keywords/partners/pins
    pub reset_clears_registry: bool,
}

impl ScorerConfig {
    pub fn new() -> Self {
        Self {
            decay_factor: 0.75,
            coactivation_boost: 0.5,
            header_lines: 30,
            reset_clears_registry: false,
        }
    }
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self::new()
    }
}

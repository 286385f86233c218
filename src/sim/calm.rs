//! Calm meter: a bounded focus gauge fed by tap outcomes

use serde::{Deserialize, Serialize};

/// Lowest meter value
pub const CALM_MIN: f64 = 0.0;
/// Highest meter value
pub const CALM_MAX: f64 = 100.0;
/// Value every session starts at
pub const CALM_START: f64 = 50.0;

const HIT_GAIN: f64 = 8.0;
const MISS_LOSS: f64 = 5.0;
const WRONG_TAP_LOSS: f64 = 12.0;

/// Discrete band of the calm meter, ordered from worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CalmTier {
    Frantic,
    Distracted,
    Steady,
    Calm,
    Zen,
}

impl CalmTier {
    /// Numeric tier, 0 (frantic) through 4 (zen)
    pub fn level(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            CalmTier::Frantic => "FRANTIC",
            CalmTier::Distracted => "DISTRACTED",
            CalmTier::Steady => "STEADY",
            CalmTier::Calm => "CALM",
            CalmTier::Zen => "ZEN FOCUS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalmMeter {
    value: f64,
}

impl Default for CalmMeter {
    fn default() -> Self {
        Self { value: CALM_START }
    }
}

impl CalmMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    fn adjust(&mut self, delta: f64) {
        self.value = (self.value + delta).clamp(CALM_MIN, CALM_MAX);
    }

    /// Correct target tap
    pub fn record_hit(&mut self) {
        self.adjust(HIT_GAIN);
    }

    /// Missed target. Not wired to any tap outcome; available to hosts.
    pub fn record_miss(&mut self) {
        self.adjust(-MISS_LOSS);
    }

    /// Decoy tap
    pub fn record_wrong_tap(&mut self) {
        self.adjust(-WRONG_TAP_LOSS);
    }

    pub fn tier(&self) -> CalmTier {
        match self.value {
            v if v >= 80.0 => CalmTier::Zen,
            v if v >= 60.0 => CalmTier::Calm,
            v if v >= 40.0 => CalmTier::Steady,
            v if v >= 20.0 => CalmTier::Distracted,
            _ => CalmTier::Frantic,
        }
    }
}

//! Difficulty tiers, session lengths and the ramp curves that drive spawning
//!
//! Every function here is pure. `progress` is `elapsed / total`.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Star thresholds for one (difficulty, duration) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarThresholds {
    pub one: u32,
    pub two: u32,
    pub three: u32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    /// Seconds between waves at the start of a session
    pub fn initial_spawn_interval(&self) -> f64 {
        match self {
            Difficulty::Easy => 1.8,
            Difficulty::Normal => 1.3,
            Difficulty::Hard => 0.9,
        }
    }

    pub fn spawn_ramp(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.6,
            Difficulty::Normal => 0.9,
            Difficulty::Hard => 0.5,
        }
    }

    pub fn min_spawn_interval(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.9,
            Difficulty::Normal => 0.5,
            Difficulty::Hard => 0.3,
        }
    }

    /// Seconds a shape stays tappable at the start of a session
    pub fn initial_lifespan(&self) -> f64 {
        match self {
            Difficulty::Easy => 3.2,
            Difficulty::Normal => 2.5,
            Difficulty::Hard => 1.8,
        }
    }

    pub fn lifespan_ramp(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Normal => 1.4,
            Difficulty::Hard => 0.6,
        }
    }

    pub fn min_lifespan(&self) -> f64 {
        match self {
            Difficulty::Easy => 2.0,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 0.8,
        }
    }

    /// Multipliers applied to the duration base for one/two/three stars
    fn star_factors(&self) -> (u32, u32, u32) {
        match self {
            Difficulty::Easy => (1, 2, 4),
            Difficulty::Normal => (2, 4, 7),
            Difficulty::Hard => (3, 6, 10),
        }
    }

    /// Seconds between waves. Progress is not clamped; the floor bounds it.
    pub fn spawn_interval(&self, elapsed: f64, total: f64) -> f64 {
        let progress = elapsed / total;
        self.min_spawn_interval()
            .max(self.initial_spawn_interval() - progress * self.spawn_ramp())
    }

    /// Lifetime of shapes spawned now. Progress is clamped to 1.
    pub fn lifespan(&self, elapsed: f64, total: f64) -> f64 {
        let progress = (elapsed / total).min(1.0);
        self.min_lifespan()
            .max(self.initial_lifespan() - progress * self.lifespan_ramp())
    }

    /// How many decoys accompany the target in a wave
    pub fn decoy_count(&self, elapsed: f64, total: f64) -> usize {
        let progress = elapsed / total;
        match self {
            Difficulty::Easy => {
                if progress < 0.5 {
                    1
                } else {
                    2
                }
            }
            Difficulty::Normal => {
                if progress < 0.33 {
                    1
                } else if progress < 0.66 {
                    2
                } else {
                    3
                }
            }
            Difficulty::Hard => {
                if progress < 0.25 {
                    2
                } else {
                    3
                }
            }
        }
    }

    pub fn star_thresholds(&self, duration: SessionDuration) -> StarThresholds {
        let base = duration.seconds() / 10;
        let (k1, k2, k3) = self.star_factors();
        StarThresholds {
            one: base * k1,
            two: base * k2,
            three: base * k3,
        }
    }

    /// Stars earned (0-3) for a final score
    pub fn stars(&self, score: u32, duration: SessionDuration) -> u8 {
        let t = self.star_thresholds(duration);
        if score >= t.three {
            3
        } else if score >= t.two {
            2
        } else if score >= t.one {
            1
        } else {
            0
        }
    }
}

/// Session length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SessionDuration {
    Quick,
    #[default]
    Classic,
    Marathon,
}

impl SessionDuration {
    pub const ALL: [SessionDuration; 3] = [
        SessionDuration::Quick,
        SessionDuration::Classic,
        SessionDuration::Marathon,
    ];

    pub fn seconds(&self) -> u32 {
        match self {
            SessionDuration::Quick => 30,
            SessionDuration::Classic => 60,
            SessionDuration::Marathon => 90,
        }
    }

    #[inline]
    pub fn as_secs_f64(&self) -> f64 {
        self.seconds() as f64
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionDuration::Quick => "Quick",
            SessionDuration::Classic => "Classic",
            SessionDuration::Marathon => "Marathon",
        }
    }
}

impl TryFrom<u32> for SessionDuration {
    type Error = SessionError;

    fn try_from(secs: u32) -> Result<Self, Self::Error> {
        match secs {
            30 => Ok(SessionDuration::Quick),
            60 => Ok(SessionDuration::Classic),
            90 => Ok(SessionDuration::Marathon),
            other => Err(SessionError::InvalidConfig(format!(
                "unsupported session duration {other}s (expected 30, 60 or 90)"
            ))),
        }
    }
}

impl From<SessionDuration> for u32 {
    fn from(d: SessionDuration) -> u32 {
        d.seconds()
    }
}

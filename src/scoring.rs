//! Scoring policy for finished sessions
//!
//! Pure functions of the final counters and the session config.

use serde::{Deserialize, Serialize};

use crate::sim::{Difficulty, GameOverReason, SessionConfig, SessionDuration, SessionState};

/// Stars earned (0-3)
pub fn stars(score: u32, difficulty: Difficulty, duration: SessionDuration) -> u8 {
    difficulty.stars(score, duration)
}

/// Fraction of taps that hit a target. A session without taps counts as perfect.
pub fn accuracy(score: u32, total_taps: u32) -> f64 {
    if total_taps > 0 {
        score as f64 / total_taps as f64
    } else {
        1.0
    }
}

/// Accuracy as a whole percentage, rounded
pub fn accuracy_percent(accuracy: f64) -> u32 {
    (accuracy * 100.0).round().max(0.0) as u32
}

/// Result-screen feedback band for an accuracy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccuracyFeedback {
    Pinpoint,
    Sharp,
    GettingCleaner,
    KeepTraining,
    WatchTheShape,
}

impl AccuracyFeedback {
    pub fn from_accuracy(accuracy: f64) -> Self {
        match accuracy_percent(accuracy) {
            90.. => AccuracyFeedback::Pinpoint,
            75.. => AccuracyFeedback::Sharp,
            60.. => AccuracyFeedback::GettingCleaner,
            40.. => AccuracyFeedback::KeepTraining,
            _ => AccuracyFeedback::WatchTheShape,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AccuracyFeedback::Pinpoint => "Pinpoint accuracy!",
            AccuracyFeedback::Sharp => "Sharp focus!",
            AccuracyFeedback::GettingCleaner => "Getting cleaner!",
            AccuracyFeedback::KeepTraining => "Keep training!",
            AccuracyFeedback::WatchTheShape => "Watch the shape!",
        }
    }
}

/// Final outcome of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub score: u32,
    pub accuracy: f64,
    pub stars: u8,
    pub total_taps: u32,
    pub wrong_taps: u32,
    pub duration: SessionDuration,
    pub difficulty: Difficulty,
    pub reason: GameOverReason,
}

impl SessionResult {
    pub fn from_state(state: &SessionState, reason: GameOverReason) -> Self {
        let config: &SessionConfig = &state.config;
        Self {
            score: state.score,
            accuracy: accuracy(state.score, state.total_taps),
            stars: stars(state.score, config.difficulty, config.duration),
            total_taps: state.total_taps,
            wrong_taps: state.wrong_taps,
            duration: config.duration,
            difficulty: config.difficulty,
            reason,
        }
    }

    pub fn accuracy_percent(&self) -> u32 {
        accuracy_percent(self.accuracy)
    }

    pub fn feedback(&self) -> AccuracyFeedback {
        AccuracyFeedback::from_accuracy(self.accuracy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(0, 0), 1.0);
        assert_eq!(accuracy(3, 4), 0.75);
        assert_eq!(accuracy(0, 5), 0.0);
    }

    #[test]
    fn test_stars_policy() {
        assert_eq!(stars(0, Difficulty::Normal, SessionDuration::Classic), 0);
        assert_eq!(stars(100, Difficulty::Normal, SessionDuration::Classic), 3);
        assert_eq!(stars(3, Difficulty::Easy, SessionDuration::Quick), 1);
    }

    #[test]
    fn test_feedback_bands() {
        assert_eq!(AccuracyFeedback::from_accuracy(1.0), AccuracyFeedback::Pinpoint);
        assert_eq!(AccuracyFeedback::from_accuracy(0.92), AccuracyFeedback::Pinpoint);
        assert_eq!(AccuracyFeedback::from_accuracy(0.80), AccuracyFeedback::Sharp);
        assert_eq!(AccuracyFeedback::from_accuracy(0.60), AccuracyFeedback::GettingCleaner);
        assert_eq!(AccuracyFeedback::from_accuracy(0.45), AccuracyFeedback::KeepTraining);
        assert_eq!(AccuracyFeedback::from_accuracy(0.1), AccuracyFeedback::WatchTheShape);
    }

    #[test]
    fn test_accuracy_percent_rounds() {
        assert_eq!(accuracy_percent(2.0 / 3.0), 67);
        assert_eq!(accuracy_percent(0.0), 0);
    }
}

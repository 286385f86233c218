//! Player progress: best score per (duration, difficulty) and lifetime totals
//!
//! Owned by the host, never by a session. Hosts call `record` after receiving
//! `SessionEvent::GameOver`.

use serde::{Deserialize, Serialize};

use crate::sim::{Difficulty, SessionConfig, SessionDuration};

/// Best score for one config pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScoreEntry {
    pub duration: SessionDuration,
    pub difficulty: Difficulty,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlayerProgress {
    pub best_scores: Vec<BestScoreEntry>,
    /// Sum of final scores over every recorded session
    pub total_correct_taps: u64,
    pub sessions_played: u64,
}

/// Anything that can take a finished session's score
pub trait ResultRecorder {
    /// Record a final score. Returns `true` when it beats the previous best.
    fn record_result(&mut self, score: u32, config: &SessionConfig) -> bool;
}

impl PlayerProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, duration: SessionDuration, difficulty: Difficulty) -> Option<&BestScoreEntry> {
        self.best_scores
            .iter()
            .find(|e| e.duration == duration && e.difficulty == difficulty)
    }

    /// Best score for the config's (duration, difficulty), 0 if never played
    pub fn best_score(&self, config: &SessionConfig) -> u32 {
        self.entry(config.duration, config.difficulty)
            .map(|e| e.score)
            .unwrap_or(0)
    }

    /// Record a finished session. Only a strictly higher score is a new best.
    pub fn record(&mut self, score: u32, config: &SessionConfig) -> bool {
        self.total_correct_taps += score as u64;
        self.sessions_played += 1;

        let previous = self.best_score(config);
        let is_new = score > previous;
        if is_new {
            match self
                .best_scores
                .iter_mut()
                .find(|e| e.duration == config.duration && e.difficulty == config.difficulty)
            {
                Some(entry) => entry.score = score,
                None => self.best_scores.push(BestScoreEntry {
                    duration: config.duration,
                    difficulty: config.difficulty,
                    score,
                }),
            }
            log::info!(
                "New best for {} {}: {} (was {})",
                config.duration.label(),
                config.difficulty.label(),
                score,
                previous
            );
        }
        is_new
    }
}

impl ResultRecorder for PlayerProgress {
    fn record_result(&mut self, score: u32, config: &SessionConfig) -> bool {
        self.record(score, config)
    }
}

//! Session state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::calm::{CalmMeter, CalmTier};
use super::difficulty::{Difficulty, SessionDuration};
use super::placement::{Rect, spawn_area};
use super::shape::ShapeKind;
use crate::consts::*;
use crate::error::{Result, SessionError};

/// Everything chosen before a session starts. Never mutated during play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub duration: SessionDuration,
    pub difficulty: Difficulty,
    /// Wrong taps allowed before the session ends
    pub lives: u32,
    /// Area shapes are scattered in
    pub playfield: Rect,
    pub shape_size: f32,
    /// RNG seed (same seed + same inputs = same session)
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration: SessionDuration::default(),
            difficulty: Difficulty::default(),
            lives: DEFAULT_LIVES,
            playfield: Rect::from_size(DEFAULT_PLAYFIELD_WIDTH, DEFAULT_PLAYFIELD_HEIGHT),
            shape_size: DEFAULT_SHAPE_SIZE,
            seed: 0,
        }
    }
}

impl SessionConfig {
    pub fn new(duration: SessionDuration, difficulty: Difficulty, lives: u32) -> Self {
        Self {
            duration,
            difficulty,
            lives,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_playfield(mut self, playfield: Rect) -> Self {
        self.playfield = playfield;
        self
    }

    /// Reject configs the simulation cannot run
    pub fn validate(&self) -> Result<()> {
        if !self.shape_size.is_finite() || self.shape_size <= 0.0 {
            return Err(SessionError::InvalidConfig(format!(
                "shape size must be positive, got {}",
                self.shape_size
            )));
        }
        if !self.playfield.is_finite() {
            return Err(SessionError::InvalidConfig(
                "playfield bounds must be finite".to_string(),
            ));
        }
        let area = spawn_area(&self.playfield, self.shape_size);
        if area.width() <= 0.0 || area.height() <= 0.0 {
            return Err(SessionError::InvalidConfig(format!(
                "playfield {}x{} too small for shapes of size {}",
                self.playfield.width(),
                self.playfield.height(),
                self.shape_size
            )));
        }
        Ok(())
    }
}

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Created, no tick received yet
    NotStarted,
    /// Active gameplay
    Running,
    /// Time or lives exhausted (terminal)
    Over,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    TimeUp,
    OutOfLives,
}

/// A shape currently on the playfield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveShape {
    pub id: u32,
    pub kind: ShapeKind,
    pub is_target: bool,
    pub position: Vec2,
    pub size: f32,
    /// Host time the shape appeared
    pub spawned_at: f64,
    /// Seconds the shape stays tappable
    pub lifespan: f64,
}

impl ActiveShape {
    /// Host time at which the shape silently disappears
    #[inline]
    pub fn expires_at(&self) -> f64 {
        self.spawned_at + self.lifespan
    }

    #[inline]
    pub fn is_expired(&self, now: f64) -> bool {
        now >= self.expires_at()
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.kind.contains(point, self.position, self.size, HIT_SLOP)
    }
}

/// Mutable session state, exclusively owned by the session
#[derive(Debug, Clone)]
pub struct SessionState {
    pub config: SessionConfig,
    pub phase: SessionPhase,
    pub score: u32,
    pub wrong_taps: u32,
    pub total_taps: u32,
    pub lives_left: u32,
    /// Host time of the first tick
    pub start_time: Option<f64>,
    /// Seconds since the first tick
    pub elapsed: f64,
    /// Host time of the last wave (None until the first wave)
    pub last_spawn_time: Option<f64>,
    pub current_target: ShapeKind,
    /// Active shapes in spawn order (last = topmost)
    pub shapes: Vec<ActiveShape>,
    pub calm: CalmMeter,
    pub waves_spawned: u32,
    pub game_over_reason: Option<GameOverReason>,
    pub rng: Pcg32,
    next_id: u32,
}

impl SessionState {
    /// Create a new session state. The opening target is drawn from the seeded RNG.
    pub fn new(config: SessionConfig) -> Result<Self> {
        use rand::seq::IndexedRandom;

        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(config.seed);
        let current_target = *ShapeKind::ALL.choose(&mut rng).unwrap_or(&ShapeKind::Circle);

        Ok(Self {
            lives_left: config.lives,
            config,
            phase: SessionPhase::NotStarted,
            score: 0,
            wrong_taps: 0,
            total_taps: 0,
            start_time: None,
            elapsed: 0.0,
            last_spawn_time: None,
            current_target,
            shapes: Vec::new(),
            calm: CalmMeter::new(),
            waves_spawned: 0,
            game_over_reason: None,
            rng,
            next_id: 1,
        })
    }

    /// Allocate a new shape ID
    pub fn next_shape_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == SessionPhase::Over
    }

    pub fn total_secs(&self) -> f64 {
        self.config.duration.as_secs_f64()
    }

    pub fn remaining_secs(&self) -> f64 {
        (self.total_secs() - self.elapsed).max(0.0)
    }

    /// Read-only view for renderers and HUDs
    pub fn snapshot(&self) -> SessionSnapshot {
        let remaining = self.remaining_secs();
        SessionSnapshot {
            phase: self.phase,
            score: self.score,
            wrong_taps: self.wrong_taps,
            total_taps: self.total_taps,
            lives_left: self.lives_left,
            elapsed: self.elapsed,
            remaining_secs: remaining,
            display_seconds: remaining.ceil() as u32,
            is_low_time: remaining <= LOW_TIME_WARNING_SECS,
            current_target: self.current_target,
            calm_value: self.calm.value(),
            calm_tier: self.calm.tier(),
            shapes: self.shapes.clone(),
            game_over_reason: self.game_over_reason,
        }
    }
}

/// Point-in-time copy of a session, safe to hand to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub score: u32,
    pub wrong_taps: u32,
    pub total_taps: u32,
    pub lives_left: u32,
    pub elapsed: f64,
    pub remaining_secs: f64,
    /// Whole seconds shown on the HUD timer (rounded up)
    pub display_seconds: u32,
    pub is_low_time: bool,
    pub current_target: ShapeKind,
    pub calm_value: f64,
    pub calm_tier: CalmTier,
    pub shapes: Vec<ActiveShape>,
    pub game_over_reason: Option<GameOverReason>,
}

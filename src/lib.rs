//! Shape Focus - a tap-the-target reaction game
//!
//! Core modules:
//! - `sim`: Deterministic session simulation (difficulty, placement, taps, calm meter)
//! - `scoring`: Star ratings and accuracy for finished sessions
//! - `progress`: Best scores and lifetime totals
//! - `persistence`: Storage backends for player progress
//! - `settings`: Menu selection and playfield tunables

pub mod error;
pub mod persistence;
pub mod progress;
pub mod scoring;
pub mod settings;
pub mod sim;

pub use error::{ProgressError, Result, SessionError, SettingsError};
pub use progress::PlayerProgress;
pub use scoring::SessionResult;
pub use settings::Settings;
pub use sim::{Session, SessionConfig, SessionEvent, SessionSnapshot};

/// Game configuration constants
pub mod consts {
    /// Default edge length of a shape (points)
    pub const DEFAULT_SHAPE_SIZE: f32 = 52.0;
    /// Gap kept between a shape and the playfield edge
    pub const EDGE_MARGIN: f32 = 10.0;
    /// Extra gap required between two shapes of the same wave
    pub const SEPARATION_MARGIN: f32 = 12.0;
    /// Random position draws per shape before accepting an overlap
    pub const PLACEMENT_ATTEMPTS: u32 = 40;
    /// Touch tolerance around a shape's outline
    pub const HIT_SLOP: f32 = 8.0;

    /// Default playfield (portrait phone)
    pub const DEFAULT_PLAYFIELD_WIDTH: f32 = 390.0;
    pub const DEFAULT_PLAYFIELD_HEIGHT: f32 = 844.0;

    /// Default number of wrong taps allowed
    pub const DEFAULT_LIVES: u32 = 3;

    /// HUD timer turns red below this many seconds
    pub const LOW_TIME_WARNING_SECS: f64 = 10.0;
}

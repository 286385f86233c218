//! Deterministic session simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-supplied time only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod calm;
pub mod difficulty;
pub mod event;
pub mod placement;
pub mod sdf;
pub mod session;
pub mod shape;
pub mod state;
pub mod tick;

pub use calm::{CalmMeter, CalmTier};
pub use difficulty::{Difficulty, SessionDuration, StarThresholds};
pub use event::{EventLog, SessionEvent, SessionObserver, SpawnedShape};
pub use placement::{PlacedShape, Rect, place};
pub use session::Session;
pub use shape::ShapeKind;
pub use state::{
    ActiveShape, GameOverReason, SessionConfig, SessionPhase, SessionSnapshot, SessionState,
};
pub use tick::{tap, tick};

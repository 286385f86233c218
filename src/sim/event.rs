//! Events pushed from the simulation to the host
//!
//! Renderers, audio and haptics react to these; none of them feed back into
//! session state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::calm::CalmTier;
use super::state::GameOverReason;
use super::shape::ShapeKind;

/// One shape of a freshly spawned wave
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnedShape {
    pub id: u32,
    pub kind: ShapeKind,
    pub is_target: bool,
    pub position: Vec2,
    pub lifespan: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A new wave appeared
    Spawn { wave: Vec<SpawnedShape> },
    /// A shape was tapped
    Hit {
        shape_id: u32,
        kind: ShapeKind,
        is_target: bool,
        correct: bool,
        position: Vec2,
        new_score: u32,
        new_lives: u32,
        new_calm_tier: CalmTier,
    },
    /// A shape outlived its lifespan untouched
    Expire { shape_id: u32 },
    /// The target to tap changed (session start and after each correct tap)
    TargetChanged { target: ShapeKind },
    /// Session ended. Emitted exactly once.
    GameOver {
        final_score: u32,
        accuracy: f64,
        stars: u8,
        reason: GameOverReason,
    },
}

/// Receives events as they are produced, inside `tick`/`tap`
pub trait SessionObserver {
    fn on_event(&mut self, event: &SessionEvent);
}

/// Observer that keeps every event, handy for replays and tests
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<SessionEvent>,
}

impl SessionObserver for EventLog {
    fn on_event(&mut self, event: &SessionEvent) {
        self.events.push(event.clone());
    }
}

/// Shared observers, so the host can keep a handle after subscribing
impl<T: SessionObserver> SessionObserver for std::rc::Rc<std::cell::RefCell<T>> {
    fn on_event(&mut self, event: &SessionEvent) {
        self.borrow_mut().on_event(event);
    }
}

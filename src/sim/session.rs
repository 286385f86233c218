//! Host-facing session handle
//!
//! Wraps `SessionState` with the tick/tap entry points and fans events out to
//! subscribed observers. Not thread-safe; drive it from one game loop.

use glam::Vec2;

use super::event::{SessionEvent, SessionObserver};
use super::state::{SessionConfig, SessionPhase, SessionSnapshot, SessionState};
use super::tick::{tap, tick};
use crate::error::Result;
use crate::scoring::SessionResult;

pub struct Session {
    state: SessionState,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Session {
    /// Start a new session. Fails only on an invalid config.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let state = SessionState::new(config).inspect_err(|e| log::warn!("{e}"))?;
        log::info!(
            "New session: {}s {} with {} lives (seed {})",
            state.config.duration.seconds(),
            state.config.difficulty.label(),
            state.config.lives,
            state.config.seed
        );
        Ok(Self {
            state,
            observers: Vec::new(),
        })
    }

    /// Register an observer for every future event
    pub fn subscribe(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    /// Advance to host time `now` (seconds, any epoch)
    pub fn tick(&mut self, now: f64) -> Vec<SessionEvent> {
        let events = tick(&mut self.state, now);
        self.dispatch(&events);
        events
    }

    /// Tap at a playfield position
    pub fn tap(&mut self, position: Vec2) -> Vec<SessionEvent> {
        let events = tap(&mut self.state, position);
        self.dispatch(&events);
        events
    }

    fn dispatch(&mut self, events: &[SessionEvent]) {
        for event in events {
            for observer in &mut self.observers {
                observer.on_event(event);
            }
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.state.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Final result, once the session is over
    pub fn result(&self) -> Option<SessionResult> {
        self.state
            .game_over_reason
            .map(|reason| SessionResult::from_state(&self.state, reason))
    }
}

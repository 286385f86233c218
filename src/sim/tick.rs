//! Session tick and tap handling
//!
//! The host owns the clock: `tick` receives its current time and `tap` a
//! playfield position. Both run to completion and return the events they
//! produced, in order.

use glam::Vec2;
use rand::seq::IndexedRandom;

use super::event::{SessionEvent, SpawnedShape};
use super::placement::place;
use super::state::{ActiveShape, GameOverReason, SessionPhase, SessionState};
use crate::scoring::SessionResult;

/// Advance the session to host time `now`
pub fn tick(state: &mut SessionState, now: f64) -> Vec<SessionEvent> {
    let mut events = Vec::new();

    if state.is_over() {
        return events;
    }

    let start = *state.start_time.get_or_insert(now);
    let starting = state.phase == SessionPhase::NotStarted;
    if starting {
        state.phase = SessionPhase::Running;
    }

    state.elapsed = (now - start).max(0.0);

    // Termination is checked before anything else happens this tick
    if state.elapsed >= state.total_secs() {
        end_session(state, GameOverReason::TimeUp, &mut events);
        return events;
    }
    if state.lives_left == 0 {
        end_session(state, GameOverReason::OutOfLives, &mut events);
        return events;
    }

    if starting {
        log::info!(
            "Session running: {} {}, {} lives, first target {}",
            state.config.duration.label(),
            state.config.difficulty.label(),
            state.lives_left,
            state.current_target
        );
        events.push(SessionEvent::TargetChanged {
            target: state.current_target,
        });
    }

    expire_shapes(state, now, &mut events);

    let total = state.total_secs();
    let interval = state.config.difficulty.spawn_interval(state.elapsed, total);
    let due = match state.last_spawn_time {
        None => true,
        Some(last) => now - last >= interval,
    };
    if due {
        spawn_wave(state, now, &mut events);
        state.last_spawn_time = Some(now);
    }

    events
}

/// Handle a tap at `position`
///
/// Tapping empty space does nothing. A tap only ever affects the topmost shape
/// under the finger.
///
/// Taps carry no time, so expiry is whatever the last `tick` applied: a shape
/// whose lifespan ran out after that tick stays tappable until the next one.
/// Hosts should tick before forwarding taps from the same frame.
pub fn tap(state: &mut SessionState, position: Vec2) -> Vec<SessionEvent> {
    let mut events = Vec::new();

    if state.is_over() {
        return events;
    }

    // Later shapes are drawn on top
    let Some(index) = state.shapes.iter().rposition(|s| s.contains(position)) else {
        return events;
    };
    let shape = state.shapes.remove(index);

    state.total_taps += 1;

    if shape.is_target {
        state.score += 1;
        state.calm.record_hit();
        log::debug!("Hit {} (score {})", shape.kind, state.score);
        events.push(hit_event(state, &shape, true));
        rotate_target(state, &mut events);
    } else {
        state.wrong_taps += 1;
        state.lives_left = state.lives_left.saturating_sub(1);
        state.calm.record_wrong_tap();
        log::debug!(
            "Wrong tap on {} ({} lives left)",
            shape.kind,
            state.lives_left
        );
        events.push(hit_event(state, &shape, false));
        if state.lives_left == 0 {
            end_session(state, GameOverReason::OutOfLives, &mut events);
        }
    }

    events
}

fn hit_event(state: &SessionState, shape: &ActiveShape, correct: bool) -> SessionEvent {
    SessionEvent::Hit {
        shape_id: shape.id,
        kind: shape.kind,
        is_target: shape.is_target,
        correct,
        position: shape.position,
        new_score: state.score,
        new_lives: state.lives_left,
        new_calm_tier: state.calm.tier(),
    }
}

/// Silently drop shapes whose lifespan has run out
fn expire_shapes(state: &mut SessionState, now: f64, events: &mut Vec<SessionEvent>) {
    state.shapes.retain(|shape| {
        if shape.is_expired(now) {
            events.push(SessionEvent::Expire { shape_id: shape.id });
            false
        } else {
            true
        }
    });
}

/// Spawn one wave: the current target plus decoys, sized by the difficulty ramp
pub fn spawn_wave(state: &mut SessionState, now: f64, events: &mut Vec<SessionEvent>) {
    let total = state.total_secs();
    let difficulty = state.config.difficulty;
    let lifespan = difficulty.lifespan(state.elapsed, total);
    let decoy_count = difficulty.decoy_count(state.elapsed, total);

    let placed = place(
        &mut state.rng,
        state.current_target,
        decoy_count,
        &state.config.playfield,
        state.config.shape_size,
    );

    let mut wave = Vec::with_capacity(placed.len());
    for p in placed {
        let shape = ActiveShape {
            id: state.next_shape_id(),
            kind: p.kind,
            is_target: p.is_target,
            position: p.position,
            size: state.config.shape_size,
            spawned_at: now,
            lifespan,
        };
        wave.push(SpawnedShape {
            id: shape.id,
            kind: shape.kind,
            is_target: shape.is_target,
            position: shape.position,
            lifespan,
        });
        state.shapes.push(shape);
    }

    state.waves_spawned += 1;
    log::debug!(
        "Wave {} at {:.2}s: target {} + {} decoys, lifespan {:.2}s",
        state.waves_spawned,
        state.elapsed,
        state.current_target,
        decoy_count,
        lifespan
    );
    events.push(SessionEvent::Spawn { wave });
}

/// Pick a new target that differs from the current one
fn rotate_target(state: &mut SessionState, events: &mut Vec<SessionEvent>) {
    let others = state.current_target.decoys();
    if let Some(next) = others.choose(&mut state.rng) {
        log::debug!("Target {} -> {}", state.current_target, next);
        state.current_target = *next;
        events.push(SessionEvent::TargetChanged { target: *next });
    }
}

/// Enter the terminal phase. Runs at most once per session.
fn end_session(state: &mut SessionState, reason: GameOverReason, events: &mut Vec<SessionEvent>) {
    if state.is_over() {
        return;
    }
    state.phase = SessionPhase::Over;
    state.game_over_reason = Some(reason);
    state.shapes.clear();

    let result = SessionResult::from_state(state, reason);
    log::info!(
        "Game over ({:?}): score {}, accuracy {}%, {} stars",
        reason,
        result.score,
        result.accuracy_percent(),
        result.stars
    );
    events.push(SessionEvent::GameOver {
        final_score: result.score,
        accuracy: result.accuracy,
        stars: result.stars,
        reason,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Difficulty, SessionConfig, SessionDuration, ShapeKind};
    use proptest::prelude::*;

    fn easy_quick(seed: u64) -> SessionState {
        let config = SessionConfig::new(SessionDuration::Quick, Difficulty::Easy, 3).with_seed(seed);
        SessionState::new(config).unwrap()
    }

    fn first_matching(state: &SessionState, is_target: bool) -> Option<Vec2> {
        state
            .shapes
            .iter()
            .rev()
            .find(|s| s.is_target == is_target)
            .map(|s| s.position)
    }

    /// A point no shape covers (corner of the playfield)
    fn empty_spot(state: &SessionState) -> Vec2 {
        let p = state.config.playfield.min;
        assert!(state.shapes.iter().all(|s| !s.contains(p)));
        p
    }

    fn game_overs(events: &[SessionEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, SessionEvent::GameOver { .. }))
            .count()
    }

    #[test]
    fn test_first_tick_starts_and_spawns() {
        let mut state = easy_quick(1);
        let events = tick(&mut state, 0.0);
        assert_eq!(state.phase, SessionPhase::Running);
        assert!(matches!(events[0], SessionEvent::TargetChanged { .. }));

        // Easy at progress 0: target + 1 decoy
        assert_eq!(state.shapes.len(), 2);
        assert_eq!(state.shapes.iter().filter(|s| s.is_target).count(), 1);
        let target = state.shapes.iter().find(|s| s.is_target).unwrap();
        assert_eq!(target.kind, state.current_target);
        assert!((target.lifespan - 3.2).abs() < 1e-9);
        assert!(matches!(events.last(), Some(SessionEvent::Spawn { wave }) if wave.len() == 2));
    }

    #[test]
    fn test_spawn_waits_for_interval() {
        let mut state = easy_quick(2);
        tick(&mut state, 0.0);
        assert_eq!(state.waves_spawned, 1);

        // Easy starts at 1.8s between waves
        tick(&mut state, 1.0);
        assert_eq!(state.waves_spawned, 1);
        tick(&mut state, 1.8);
        assert_eq!(state.waves_spawned, 2);
        assert_eq!(state.last_spawn_time, Some(1.8));
    }

    #[test]
    fn test_start_time_is_latched() {
        let mut state = easy_quick(3);
        tick(&mut state, 100.0);
        tick(&mut state, 105.5);
        assert!((state.elapsed - 5.5).abs() < 1e-9);
    }

    #[test]
    fn test_shapes_expire_silently() {
        let mut state = easy_quick(4);
        tick(&mut state, 0.0);
        let ids: Vec<u32> = state.shapes.iter().map(|s| s.id).collect();

        let events = tick(&mut state, 3.2);
        let expired: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::Expire { shape_id } => Some(*shape_id),
                _ => None,
            })
            .collect();
        assert_eq!(expired, ids);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives_left, 3);
        assert_eq!(state.calm.value(), 50.0);
        assert!(state.shapes.iter().all(|s| !ids.contains(&s.id)));
    }

    #[test]
    fn test_expiry_keeps_target() {
        let mut state = easy_quick(5);
        tick(&mut state, 0.0);
        let target = state.current_target;
        tick(&mut state, 3.5);
        assert_eq!(state.current_target, target);
    }

    #[test]
    fn test_correct_tap() {
        let mut state = easy_quick(6);
        tick(&mut state, 0.0);
        let old_target = state.current_target;
        let pos = first_matching(&state, true).unwrap();

        let events = tap(&mut state, pos);
        assert_eq!(state.score, 1);
        assert_eq!(state.total_taps, 1);
        assert_eq!(state.calm.value(), 58.0);
        assert_ne!(state.current_target, old_target);
        assert!(matches!(
            events[0],
            SessionEvent::Hit { correct: true, new_score: 1, new_lives: 3, .. }
        ));
        assert!(matches!(events[1], SessionEvent::TargetChanged { target } if target != old_target));
        assert!(state.shapes.iter().all(|s| !s.is_target));
    }

    #[test]
    fn test_wrong_tap() {
        let mut state = easy_quick(7);
        tick(&mut state, 0.0);
        let target = state.current_target;
        let pos = first_matching(&state, false).unwrap();

        let events = tap(&mut state, pos);
        assert_eq!(state.score, 0);
        assert_eq!(state.wrong_taps, 1);
        assert_eq!(state.total_taps, 1);
        assert_eq!(state.lives_left, 2);
        assert_eq!(state.calm.value(), 38.0);
        assert_eq!(state.current_target, target);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], SessionEvent::Hit { correct: false, new_lives: 2, .. }));
    }

    #[test]
    fn test_tap_empty_space_is_free() {
        let mut state = easy_quick(8);
        tick(&mut state, 0.0);
        let spot = empty_spot(&state);
        let events = tap(&mut state, spot);
        assert!(events.is_empty());
        assert_eq!(state.total_taps, 0);
        assert_eq!(state.lives_left, 3);
        assert_eq!(state.shapes.len(), 2);
    }

    #[test]
    fn test_topmost_shape_wins() {
        let mut state = easy_quick(9);
        tick(&mut state, 0.0);
        state.shapes.clear();
        let spot = Vec2::new(150.0, 300.0);
        for (id, is_target) in [(100, true), (101, false)] {
            state.shapes.push(ActiveShape {
                id,
                kind: ShapeKind::Circle,
                is_target,
                position: spot,
                size: 52.0,
                spawned_at: 0.0,
                lifespan: 3.0,
            });
        }

        let events = tap(&mut state, spot);
        assert!(matches!(events[0], SessionEvent::Hit { shape_id: 101, correct: false, .. }));
        assert_eq!(state.shapes.len(), 1);
        assert_eq!(state.shapes[0].id, 100);
    }

    #[test]
    fn test_time_up_ends_once() {
        let mut state = easy_quick(10);
        tick(&mut state, 0.0);
        let events = tick(&mut state, 30.0);
        assert_eq!(state.phase, SessionPhase::Over);
        assert_eq!(state.game_over_reason, Some(GameOverReason::TimeUp));
        assert_eq!(game_overs(&events), 1);
        assert!(state.shapes.is_empty());
        assert!(matches!(
            events[0],
            SessionEvent::GameOver { final_score: 0, accuracy, stars: 0, .. } if accuracy == 1.0
        ));

        assert!(tick(&mut state, 31.0).is_empty());
        assert!(tick(&mut state, 40.0).is_empty());
        assert!(tap(&mut state, Vec2::new(100.0, 100.0)).is_empty());
    }

    #[test]
    fn test_last_life_ends_in_tap() {
        let config = SessionConfig::new(SessionDuration::Classic, Difficulty::Normal, 1).with_seed(11);
        let mut state = SessionState::new(config).unwrap();
        tick(&mut state, 0.0);
        let pos = first_matching(&state, false).unwrap();

        let events = tap(&mut state, pos);
        assert_eq!(state.lives_left, 0);
        assert_eq!(state.phase, SessionPhase::Over);
        assert_eq!(state.game_over_reason, Some(GameOverReason::OutOfLives));
        assert_eq!(game_overs(&events), 1);
        assert!(matches!(
            events[1],
            SessionEvent::GameOver { final_score: 0, accuracy, .. } if accuracy == 0.0
        ));
        assert!(tick(&mut state, 1.0).is_empty());
    }

    #[test]
    fn test_zero_lives_ends_on_first_tick() {
        let config = SessionConfig::new(SessionDuration::Quick, Difficulty::Hard, 0);
        let mut state = SessionState::new(config).unwrap();
        let events = tick(&mut state, 0.0);
        assert_eq!(state.game_over_reason, Some(GameOverReason::OutOfLives));
        assert_eq!(game_overs(&events), 1);
        assert_eq!(state.waves_spawned, 0);
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, SessionEvent::TargetChanged { .. }))
        );
    }

    #[test]
    fn test_tap_after_expiry_tick_misses() {
        let mut state = easy_quick(8);
        tick(&mut state, 0.0);
        let target = state.shapes.iter().find(|s| s.is_target).unwrap().clone();

        // Easy lifespan at progress 0 is 3.2s; the tick at 3.5 sweeps the wave
        tick(&mut state, 3.5);
        assert!(state.shapes.iter().all(|s| s.id != target.id));
        let events = tap(&mut state, target.position);
        assert!(!events.iter().any(
            |e| matches!(e, SessionEvent::Hit { shape_id, .. } if *shape_id == target.id)
        ));
    }

    #[test]
    fn test_decoys_grow_with_progress() {
        let config = SessionConfig::new(SessionDuration::Quick, Difficulty::Hard, 3).with_seed(12);
        let mut state = SessionState::new(config).unwrap();
        tick(&mut state, 0.0);
        assert_eq!(state.shapes.len(), 3);

        // Past 25% progress hard waves carry 3 decoys
        state.shapes.clear();
        tick(&mut state, 10.0);
        assert_eq!(state.shapes.len(), 4);
    }

    #[test]
    fn test_determinism() {
        let run = |seed| {
            let mut state = easy_quick(seed);
            let mut log = Vec::new();
            let mut t = 0.0;
            while !state.is_over() {
                log.extend(tick(&mut state, t));
                if let Some(pos) = first_matching(&state, true) {
                    log.extend(tap(&mut state, pos));
                }
                t += 0.25;
            }
            (log, state.snapshot())
        };

        let (events_a, snap_a) = run(99);
        let (events_b, snap_b) = run(99);
        assert_eq!(events_a, events_b);
        assert_eq!(snap_a, snap_b);
        assert!(snap_a.score > 0);
    }

    proptest! {
        #[test]
        fn empty_taps_change_nothing(seed in any::<u64>(), t in 0.0f64..29.0) {
            let mut state = easy_quick(seed);
            tick(&mut state, 0.0);
            tick(&mut state, t);
            let before = state.snapshot();
            let corner = state.config.playfield.min;
            if state.shapes.iter().all(|s| !s.contains(corner)) {
                prop_assert!(tap(&mut state, corner).is_empty());
                prop_assert_eq!(state.snapshot(), before);
            }
        }
    }
}

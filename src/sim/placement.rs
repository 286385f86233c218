//! Wave placement: scatter one target and its decoys across the playfield
//!
//! Placement only avoids shapes of the same wave. Shapes from earlier waves are
//! still alive on the field and may be overlapped.

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::shape::ShapeKind;
use crate::consts::{EDGE_MARGIN, PLACEMENT_ATTEMPTS, SEPARATION_MARGIN};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle anchored at the origin
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Shrink every edge by `amount`
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(self.min + Vec2::splat(amount), self.max - Vec2::splat(amount))
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Area shape centers may occupy for a given shape size
///
/// An axis too short for the shape collapses to the bounds' midpoint, so a
/// degenerate field still yields (stacked) positions.
pub fn spawn_area(bounds: &Rect, shape_size: f32) -> Rect {
    let mut area = bounds.inset(shape_size / 2.0 + EDGE_MARGIN);
    let mid = (bounds.min + bounds.max) * 0.5;
    if area.width() < 0.0 {
        area.min.x = mid.x;
        area.max.x = mid.x;
    }
    if area.height() < 0.0 {
        area.min.y = mid.y;
        area.max.y = mid.y;
    }
    area
}

/// One shape chosen and positioned for a wave
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedShape {
    pub kind: ShapeKind,
    pub is_target: bool,
    pub position: Vec2,
}

/// Pick the kinds for a wave: the target plus `decoy_count` distinct decoys,
/// in shuffled order. Exactly one entry is flagged as the target.
pub fn wave_kinds<R: Rng + ?Sized>(
    rng: &mut R,
    target: ShapeKind,
    decoy_count: usize,
) -> Vec<(ShapeKind, bool)> {
    let mut pool = target.decoys();
    pool.shuffle(rng);

    let mut kinds = Vec::with_capacity(decoy_count + 1);
    kinds.push((target, true));
    kinds.extend(pool.iter().take(decoy_count).map(|k| (*k, false)));
    kinds.shuffle(rng);
    kinds
}

/// Place a wave of shapes inside `bounds`
///
/// Each shape gets up to `PLACEMENT_ATTEMPTS` random draws; the first draw that
/// clears every shape already placed in this wave wins. If none does, the last
/// draw is accepted anyway.
pub fn place<R: Rng + ?Sized>(
    rng: &mut R,
    target: ShapeKind,
    decoy_count: usize,
    bounds: &Rect,
    shape_size: f32,
) -> Vec<PlacedShape> {
    let area = spawn_area(bounds, shape_size);
    let min_distance = shape_size + SEPARATION_MARGIN;

    let mut placed: Vec<PlacedShape> = Vec::with_capacity(decoy_count + 1);
    for (kind, is_target) in wave_kinds(rng, target, decoy_count) {
        let mut position = random_point(rng, &area);
        let mut attempts = 1;
        while attempts < PLACEMENT_ATTEMPTS
            && placed
                .iter()
                .any(|p| p.position.distance(position) <= min_distance)
        {
            position = random_point(rng, &area);
            attempts += 1;
        }

        if attempts == PLACEMENT_ATTEMPTS
            && placed
                .iter()
                .any(|p| p.position.distance(position) <= min_distance)
        {
            log::debug!("No clear spot for {kind} after {attempts} draws, overlapping");
        }

        placed.push(PlacedShape {
            kind,
            is_target,
            position,
        });
    }

    placed
}

fn random_point<R: Rng + ?Sized>(rng: &mut R, area: &Rect) -> Vec2 {
    Vec2::new(
        rng.random_range(area.min.x..=area.max.x),
        rng.random_range(area.min.y..=area.max.y),
    )
}

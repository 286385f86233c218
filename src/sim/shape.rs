//! Shape kinds and their hit regions

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sdf::{sd_box, sd_circle, sd_diamond, sd_triangle};

/// The four distinguishable shapes used in gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
    Diamond,
}

impl ShapeKind {
    /// Every kind, in a stable order
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Triangle,
        ShapeKind::Diamond,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "Circle",
            ShapeKind::Square => "Square",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Diamond => "Diamond",
        }
    }

    /// All kinds except `self` (the decoys for a given target)
    pub fn decoys(&self) -> [ShapeKind; 3] {
        let mut out = [*self; 3];
        let mut i = 0;
        for kind in Self::ALL {
            if kind != *self {
                out[i] = kind;
                i += 1;
            }
        }
        out
    }

    /// Signed distance from `point` to a shape of this kind centered at `center`
    pub fn signed_distance(&self, point: Vec2, center: Vec2, size: f32) -> f32 {
        let half = size / 2.0;
        let local = point - center;
        match self {
            ShapeKind::Circle => sd_circle(local, Vec2::ZERO, half),
            ShapeKind::Square => sd_box(local, Vec2::splat(half)),
            ShapeKind::Diamond => sd_diamond(local, half),
            ShapeKind::Triangle => sd_triangle(
                local,
                Vec2::new(0.0, half),
                Vec2::new(half, -half),
                Vec2::new(-half, -half),
            ),
        }
    }

    /// Whether a tap at `point` lands on the shape, allowing `slop` of tolerance
    pub fn contains(&self, point: Vec2, center: Vec2, size: f32, slop: f32) -> bool {
        self.signed_distance(point, center, size) <= slop
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

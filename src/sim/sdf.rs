//! Signed distance functions for shape hit regions
//!
//! All functions take a point relative to the shape center. Negative values are
//! inside the shape, positive values outside.

use glam::Vec2;
use std::f32::consts::FRAC_1_SQRT_2;

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Signed distance to an axis-aligned box with the given half extents
pub fn sd_box(p: Vec2, half_extents: Vec2) -> f32 {
    let d = p.abs() - half_extents;
    d.max(Vec2::ZERO).length() + d.x.max(d.y).min(0.0)
}

/// Signed distance to a rhombus whose half-diagonals are both `half`
///
/// A square rotated by 45°, so rotate the point back and reuse the box.
pub fn sd_diamond(p: Vec2, half: f32) -> f32 {
    let q = Vec2::new(p.x + p.y, p.y - p.x) * FRAC_1_SQRT_2;
    let side_half = half * FRAC_1_SQRT_2;
    sd_box(q, Vec2::splat(side_half))
}

/// Unsigned distance from a point to a line segment
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).length()
}

/// Signed distance to a triangle given its three vertices
pub fn sd_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> f32 {
    let dist = distance_to_segment(p, a, b)
        .min(distance_to_segment(p, b, c))
        .min(distance_to_segment(p, c, a));

    let c1 = (b - a).perp_dot(p - a);
    let c2 = (c - b).perp_dot(p - b);
    let c3 = (a - c).perp_dot(p - c);
    let inside = (c1 >= 0.0 && c2 >= 0.0 && c3 >= 0.0) || (c1 <= 0.0 && c2 <= 0.0 && c3 <= 0.0);

    if inside { -dist } else { dist }
}

//! Small geometry helpers reusable by movement and combat resolution.

use data_runtime::level::Rect;
use glam::Vec2;

#[inline]
pub fn circles_overlap(a: Vec2, a_r: f32, b: Vec2, b_r: f32) -> bool {
    let r = a_r + b_r;
    a.distance_squared(b) < r * r
}

#[inline]
pub fn point_in_rect(p: Vec2, r: &Rect) -> bool {
    p.x > r.x && p.x < r.x + r.w && p.y > r.y && p.y < r.y + r.h
}

/// Circle vs axis-aligned rect, written as the padded AABB test used by
/// actor/wall resolution.
#[inline]
pub fn circle_hits_rect(c: Vec2, radius: f32, r: &Rect) -> bool {
    c.x + radius > r.x && c.x - radius < r.x + r.w && c.y + radius > r.y && c.y - radius < r.y + r.h
}

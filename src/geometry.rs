//! Pure geometry helpers: grid snapping, segment distance, angle snapping,
//! and rotation between world space and a sprite's local frame.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::f64::consts::TAU;

use crate::camera::Point;
use crate::consts::{ANGLE_SNAP_EPSILON, ANGLE_SNAP_STEP, ANGLE_SNAP_THRESHOLD};

/// Round `value` to the nearest multiple of `cell_size`.
///
/// A non-positive `cell_size` leaves the value untouched.
#[must_use]
pub fn snap_to_grid(value: f64, cell_size: f64) -> f64 {
    if cell_size <= 0.0 {
        return value;
    }
    (value / cell_size).round() * cell_size
}

/// Shortest distance from `p` to the closed segment `a`–`b`.
#[must_use]
pub fn distance_point_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= f64::EPSILON {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

/// Normalize an angle in radians to `[0, 2π)`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let n = angle.rem_euclid(TAU);
    if n >= TAU { 0.0 } else { n }
}

/// Outcome of [`snap_angle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSnap {
    /// Resulting rotation in radians, in `[0, 2π)`.
    pub angle: f64,
    /// Whether the angle was pulled onto a 45° multiple.
    pub is_snapped: bool,
}

/// Snap a rotation to the nearest 45° multiple when it lies strictly within 2° of it.
#[must_use]
pub fn snap_angle(raw: f64) -> AngleSnap {
    let normalized = normalize_angle(raw);
    let nearest = (normalized / ANGLE_SNAP_STEP).round() * ANGLE_SNAP_STEP;
    if (normalized - nearest).abs() + ANGLE_SNAP_EPSILON < ANGLE_SNAP_THRESHOLD {
        AngleSnap { angle: normalize_angle(nearest), is_snapped: true }
    } else {
        AngleSnap { angle: normalized, is_snapped: false }
    }
}

/// Whole degrees in `0..360` for a rotation readout.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn display_degrees(rotation: f64) -> i64 {
    (normalize_angle(rotation).to_degrees().round() as i64).rem_euclid(360)
}

/// Rotate `local` by `rotation` radians and translate it to `center`.
#[must_use]
pub fn local_to_world(local: Point, center: Point, rotation: f64) -> Point {
    let (sin, cos) = rotation.sin_cos();
    Point::new(
        center.x + local.x * cos - local.y * sin,
        center.y + local.x * sin + local.y * cos,
    )
}

/// Express `world` in the frame centered on `center` and rotated by `rotation`.
#[must_use]
pub fn world_to_local(world: Point, center: Point, rotation: f64) -> Point {
    let (sin, cos) = rotation.sin_cos();
    let dx = world.x - center.x;
    let dy = world.y - center.y;
    Point::new(dx * cos + dy * sin, -dx * sin + dy * cos)
}

/// Integer grid coordinate of the cell containing `world`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn cell_at(world: Point, cell_size: f64) -> (i32, i32) {
    (
        (world.x / cell_size).floor() as i32,
        (world.y / cell_size).floor() as i32,
    )
}

/// Integer grid corner nearest to `world`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn nearest_corner(world: Point, cell_size: f64) -> (i32, i32) {
    (
        (world.x / cell_size).round() as i32,
        (world.y / cell_size).round() as i32,
    )
}

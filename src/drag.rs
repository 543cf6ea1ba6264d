//! Pure geometry for sprite drags: move, resize and rotate.
//!
//! Each function maps the geometry captured at drag start plus the current
//! pointer to the draft geometry for this frame. They never touch the scene;
//! the controller keeps the result as a draft and commits it on release.
//!
//! Resize deltas are measured along the world axes, not the sprite's local
//! axes, so a rotated sprite grows in world x/y as the pointer moves.
//! Snapping, when enabled, quantizes x, y, width and height independently
//! and keeps both sides at least one cell long.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use std::f64::consts::FRAC_PI_2;

use crate::camera::Point;
use crate::consts::MIN_SPRITE_SIZE;
use crate::geometry::{AngleSnap, snap_angle, snap_to_grid};
use crate::hit::ResizeAnchor;
use crate::sprite::Transform;

/// Move the box so the pointer keeps its grab `offset` from the center.
///
/// `snap` is the grid cell size when the sprite snaps, `None` otherwise.
#[must_use]
pub fn moved(orig: &Transform, pointer: Point, offset: Point, snap: Option<f64>) -> Transform {
    let mut x = pointer.x - offset.x - orig.width / 2.0;
    let mut y = pointer.y - offset.y - orig.height / 2.0;
    if let Some(cs) = snap {
        x = snap_to_grid(x, cs);
        y = snap_to_grid(y, cs);
    }
    Transform { x, y, ..*orig }
}

/// Resize the box by dragging `anchor` by `(dx, dy)` world units.
#[must_use]
pub fn resized(orig: &Transform, anchor: ResizeAnchor, dx: f64, dy: f64, snap: Option<f64>) -> Transform {
    let grow = |base: f64, delta: f64| (base + delta).max(MIN_SPRITE_SIZE);
    let Transform { mut x, mut y, mut width, mut height, .. } = *orig;

    match anchor {
        ResizeAnchor::Se => {
            width = grow(orig.width, dx);
            height = grow(orig.height, dy);
        }
        ResizeAnchor::Sw => {
            x = orig.x + dx;
            width = grow(orig.width, -dx);
            height = grow(orig.height, dy);
        }
        ResizeAnchor::Ne => {
            y = orig.y + dy;
            width = grow(orig.width, dx);
            height = grow(orig.height, -dy);
        }
        ResizeAnchor::Nw => {
            x = orig.x + dx;
            y = orig.y + dy;
            width = grow(orig.width, -dx);
            height = grow(orig.height, -dy);
        }
        ResizeAnchor::N => {
            y = orig.y + dy;
            height = grow(orig.height, -dy);
        }
        ResizeAnchor::S => height = grow(orig.height, dy),
        ResizeAnchor::W => {
            x = orig.x + dx;
            width = grow(orig.width, -dx);
        }
        ResizeAnchor::E => width = grow(orig.width, dx),
    }

    if let Some(cs) = snap {
        x = snap_to_grid(x, cs);
        y = snap_to_grid(y, cs);
        width = snap_to_grid(width, cs).max(cs);
        height = snap_to_grid(height, cs).max(cs);
    }

    Transform { x, y, width, height, rotation: orig.rotation }
}

/// Rotation that points the top of the sprite at `pointer`, angle-snapped.
#[must_use]
pub fn rotation_towards(center: Point, pointer: Point) -> AngleSnap {
    let raw = (pointer.y - center.y).atan2(pointer.x - center.x) + FRAC_PI_2;
    snap_angle(raw)
}

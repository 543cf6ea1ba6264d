//! Map viewport: pan and zoom, and conversion between screen and world space.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

/// 2D position; whether it is screen or world space depends on the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Viewport transform: `screen = world * zoom + pan`.
///
/// Pan is measured in CSS pixels. [`Camera::zoom_at`] keeps `zoom` within the
/// limits it is given. Not persisted with the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// World position under a pointer at `screen` (CSS pixels).
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new((screen.x - self.pan_x) / self.zoom, (screen.y - self.pan_y) / self.zoom)
    }

    /// Where `world` lands on screen, in CSS pixels.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(self.pan_x + world.x * self.zoom, self.pan_y + world.y * self.zoom)
    }

    /// Multiply zoom by `factor` while keeping the world point under `screen` fixed.
    ///
    /// The resulting zoom is clamped to `[min_zoom, max_zoom]`. Returns `true`
    /// if the camera changed.
    pub fn zoom_at(&mut self, screen: Point, factor: f64, min_zoom: f64, max_zoom: f64) -> bool {
        let new_zoom = (self.zoom * factor).clamp(min_zoom, max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return false;
        }
        let anchor = self.screen_to_world(screen);
        self.zoom = new_zoom;
        self.pan_x = screen.x - anchor.x * new_zoom;
        self.pan_y = screen.y - anchor.y * new_zoom;
        true
    }

    /// Zoom as a whole-number percentage for display.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn zoom_percent(&self) -> i64 {
        (self.zoom * 100.0).round() as i64
    }
}

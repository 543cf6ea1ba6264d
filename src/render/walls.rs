//! Wall segments, door markers, the selection highlight and the preview line
//! shown while a wall is being drawn.

use std::f64::consts::PI;

use crate::camera::Point;
use crate::render::surface::Surface;
use crate::wall::{DoorState, Visibility, WallId, WallSegment};

const WALL_WIDTH: f64 = 6.0;
const DOOR_WIDTH: f64 = 4.0;
const TRANSPARENT_ALPHA: f64 = 0.5;

const HIGHLIGHT_COLOR: &str = "#00aaff";
const HIGHLIGHT_EXTRA_WIDTH: f64 = 8.0;
const HIGHLIGHT_ALPHA: f64 = 0.35;

const DOOR_MARKER_RADIUS: f64 = 6.0;
const PREVIEW_COLOR: &str = "#ffffff";
const PREVIEW_DASH: [f64; 2] = [6.0, 4.0];

/// Stroke color by height in feet.
#[must_use]
pub fn wall_color(height: i32) -> &'static str {
    match height {
        h if h >= 10 => "#ef4444",
        h if h >= 5 => "#f97316",
        h if h >= 3 => "#eab308",
        _ => "#9ca3af",
    }
}

/// Marker fill for a door state.
#[must_use]
pub fn door_color(state: DoorState) -> &'static str {
    match state {
        DoorState::Open => "#22c55e",
        DoorState::Locked => "#ef4444",
        DoorState::Closed => "#eab308",
    }
}

/// Line width for a wall or door.
#[must_use]
pub fn wall_width(wall: &WallSegment) -> f64 {
    if wall.is_door { DOOR_WIDTH } else { WALL_WIDTH }
}

/// Draw all walls in order; later walls draw on top.
///
/// # Errors
///
/// Propagates surface errors.
pub fn draw_walls<S: Surface>(
    surface: &S,
    walls: &[WallSegment],
    selected: Option<WallId>,
    cell_size: f64,
) -> Result<(), S::Error> {
    surface.save();
    for wall in walls {
        let a = wall.p1.to_world(cell_size);
        let b = wall.p2.to_world(cell_size);

        if selected == Some(wall.id) {
            surface.set_global_alpha(HIGHLIGHT_ALPHA);
            surface.set_stroke_style(HIGHLIGHT_COLOR);
            surface.set_line_width(wall_width(wall) + HIGHLIGHT_EXTRA_WIDTH);
            segment(surface, a, b);
        }

        let alpha = if wall.visibility == Visibility::Transparent { TRANSPARENT_ALPHA } else { 1.0 };
        surface.set_global_alpha(alpha);
        surface.set_stroke_style(wall_color(wall.height));
        surface.set_line_width(wall_width(wall));
        segment(surface, a, b);

        if let Some(state) = wall.effective_door_state() {
            let mid = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
            surface.set_global_alpha(1.0);
            surface.set_fill_style(door_color(state));
            surface.begin_path();
            surface.arc(mid.x, mid.y, DOOR_MARKER_RADIUS, 0.0, 2.0 * PI)?;
            surface.fill();
        }
    }
    surface.restore();
    Ok(())
}

/// Dashed line from the start corner to the current corner, both in world
/// units.
///
/// # Errors
///
/// Propagates surface errors.
pub fn draw_wall_preview<S: Surface>(surface: &S, start: Point, end: Point, zoom: f64) -> Result<(), S::Error> {
    surface.save();
    surface.set_stroke_style(PREVIEW_COLOR);
    surface.set_line_width(2.0 / zoom);
    surface.set_line_dash(&PREVIEW_DASH.map(|d| d / zoom))?;
    segment(surface, start, end);
    surface.restore();
    Ok(())
}

fn segment<S: Surface>(surface: &S, a: Point, b: Point) {
    surface.begin_path();
    surface.move_to(a.x, a.y);
    surface.line_to(b.x, b.y);
    surface.stroke();
}

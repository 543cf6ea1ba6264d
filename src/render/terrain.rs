//! Terrain overlay: elevation tint, terrain-type pattern and elevation label
//! per painted cell.

use std::f64::consts::PI;

use crate::render::surface::Surface;
use crate::terrain::{CellCoord, TerrainCell, TerrainGrid, TerrainType};

/// Elevation ramp, ascending by key. A cell takes the color of the largest
/// key not above its elevation.
pub const ELEVATION_COLORS: [(i32, &str); 7] = [
    (-10, "#1e3a5f"),
    (-5, "#2563eb"),
    (0, "#22c55e"),
    (5, "#eab308"),
    (10, "#f97316"),
    (15, "#ef4444"),
    (20, "#a855f7"),
];

/// Color for elevation 0, also used below the lowest ramp key.
pub const GROUND_COLOR: &str = "#22c55e";

const WATER_COLOR: &str = "#3b82f6";
const HAZARD_COLOR: &str = "#ef4444";
const DIFFICULT_COLOR: &str = "#92400e";

const CELL_ALPHA: f64 = 0.45;
const PATTERN_COLOR: &str = "rgba(255, 255, 255, 0.6)";
const LABEL_COLOR: &str = "#ffffff";

/// Step color for an elevation.
#[must_use]
pub fn elevation_color(elevation: i32) -> &'static str {
    ELEVATION_COLORS
        .iter()
        .rev()
        .find(|(key, _)| *key <= elevation)
        .map_or(GROUND_COLOR, |(_, color)| color)
}

/// Fill color for a cell: terrain type overrides the elevation tint.
#[must_use]
pub fn cell_color(cell: &TerrainCell) -> &'static str {
    match cell.terrain_type {
        TerrainType::Normal => elevation_color(cell.elevation),
        TerrainType::Water => WATER_COLOR,
        TerrainType::Hazard => HAZARD_COLOR,
        TerrainType::Difficult => DIFFICULT_COLOR,
    }
}

/// Signed label: `+5`, `0`, `-10`.
#[must_use]
pub fn elevation_label(elevation: i32) -> String {
    if elevation > 0 { format!("+{elevation}") } else { elevation.to_string() }
}

/// Draw every painted cell in world coordinates.
///
/// # Errors
///
/// Propagates surface errors.
pub fn draw_terrain<S: Surface>(surface: &S, terrain: &TerrainGrid, cell_size: f64) -> Result<(), S::Error> {
    if terrain.is_empty() || !(cell_size > 0.0) {
        return Ok(());
    }

    // Sorted so output is stable across frames.
    let mut cells: Vec<(&CellCoord, &TerrainCell)> = terrain.iter().collect();
    cells.sort_by_key(|(coord, _)| **coord);

    surface.save();
    surface.set_font(&format!("bold {}px sans-serif", (cell_size * 0.3).round()));
    surface.set_text_align("center");
    surface.set_text_baseline("middle");
    for (coord, cell) in cells {
        draw_cell(surface, *coord, cell, cell_size)?;
    }
    surface.restore();
    Ok(())
}

fn draw_cell<S: Surface>(surface: &S, coord: CellCoord, cell: &TerrainCell, cs: f64) -> Result<(), S::Error> {
    let x = f64::from(coord.x) * cs;
    let y = f64::from(coord.y) * cs;

    surface.set_global_alpha(CELL_ALPHA);
    surface.set_fill_style(cell_color(cell));
    surface.fill_rect(x, y, cs, cs);

    surface.set_global_alpha(1.0);
    match cell.terrain_type {
        TerrainType::Normal => {}
        TerrainType::Water => draw_wave(surface, x, y, cs),
        TerrainType::Hazard => draw_cross(surface, x, y, cs),
        TerrainType::Difficult => draw_dots(surface, x, y, cs)?,
    }

    surface.set_fill_style(LABEL_COLOR);
    surface.fill_text(&elevation_label(cell.elevation), x + cs / 2.0, y + cs / 2.0)
}

// =============================================================
// Type patterns
// =============================================================

fn draw_wave<S: Surface>(surface: &S, x: f64, y: f64, cs: f64) {
    let mid = y + cs * 0.75;
    let amp = cs * 0.1;
    surface.set_stroke_style(PATTERN_COLOR);
    surface.set_line_width(cs * 0.04);
    surface.begin_path();
    surface.move_to(x + cs * 0.1, mid);
    surface.quadratic_curve_to(x + cs * 0.3, mid - amp, x + cs * 0.5, mid);
    surface.quadratic_curve_to(x + cs * 0.7, mid + amp, x + cs * 0.9, mid);
    surface.stroke();
}

fn draw_cross<S: Surface>(surface: &S, x: f64, y: f64, cs: f64) {
    let inset = cs * 0.2;
    surface.set_stroke_style(PATTERN_COLOR);
    surface.set_line_width(cs * 0.05);
    surface.begin_path();
    surface.move_to(x + inset, y + inset);
    surface.line_to(x + cs - inset, y + cs - inset);
    surface.move_to(x + cs - inset, y + inset);
    surface.line_to(x + inset, y + cs - inset);
    surface.stroke();
}

fn draw_dots<S: Surface>(surface: &S, x: f64, y: f64, cs: f64) -> Result<(), S::Error> {
    let r = cs * 0.05;
    surface.set_fill_style(PATTERN_COLOR);
    surface.begin_path();
    for (fx, fy) in [(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)] {
        let (cx, cy) = (x + cs * fx, y + cs * fy);
        surface.move_to(cx + r, cy);
        surface.arc(cx, cy, r, 0.0, 2.0 * PI)?;
    }
    surface.fill();
    Ok(())
}

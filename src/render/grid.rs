//! Square, hex and isometric grid drawing.
//!
//! The grid is drawn in world coordinates over a fixed square extent centered
//! on the origin. Square grid lines fall on multiples of the cell size so
//! they coincide with snap positions.

use std::f64::consts::PI;

use crate::grid::{GridSettings, GridType, LineStyle};
use crate::render::surface::Surface;

/// Radius of a grid dot in world units.
pub const DOT_RADIUS: f64 = 2.0;

/// On/off lengths of a dashed grid line in world units.
pub const DASH: [f64; 2] = [8.0, 8.0];

/// Hex rows and columns drawn on each side of the origin.
const HEX_SPAN: i32 = 50;

/// Isometric lattice lines drawn on each side of the origin.
const ISO_SPAN: i32 = 100;

/// Horizontal distance between hex centers, as a fraction of the cell size.
const HEX_WIDTH_RATIO: f64 = 0.866;

/// Vertical distance between hex rows, as a fraction of the cell size.
const HEX_ROW_RATIO: f64 = 0.75;

/// Draw the grid described by `grid`. Disabled grids draw nothing.
///
/// # Errors
///
/// Propagates surface errors.
pub fn draw_grid<S: Surface>(surface: &S, grid: &GridSettings, extent: f64) -> Result<(), S::Error> {
    if !grid.enabled || !(grid.cell_size > 0.0) {
        return Ok(());
    }

    surface.save();
    surface.set_global_alpha(grid.opacity);
    surface.set_stroke_style(&grid.color);
    surface.set_fill_style(&grid.color);
    surface.set_line_width(1.0);

    let result = match grid.grid_type {
        GridType::Square => draw_square(surface, grid, extent),
        GridType::HexH | GridType::HexV => draw_hex(surface, grid),
        GridType::Isometric => draw_isometric(surface, grid, extent),
    };

    surface.restore();
    result
}

/// Multiples of `step` within `[-extent, extent]`.
#[allow(clippy::cast_possible_truncation)]
fn lattice(extent: f64, step: f64) -> impl Iterator<Item = f64> {
    let n = (extent / step).floor() as i64;
    (-n..=n).map(move |i| {
        #[allow(clippy::cast_precision_loss)]
        let v = i as f64 * step;
        v
    })
}

fn dot<S: Surface>(surface: &S, x: f64, y: f64) -> Result<(), S::Error> {
    surface.move_to(x + DOT_RADIUS, y);
    surface.arc(x, y, DOT_RADIUS, 0.0, 2.0 * PI)
}

// =============================================================
// Square
// =============================================================

fn draw_square<S: Surface>(surface: &S, grid: &GridSettings, extent: f64) -> Result<(), S::Error> {
    let cs = grid.cell_size;
    surface.begin_path();
    match grid.line_style {
        LineStyle::Dots => {
            for x in lattice(extent, cs) {
                for y in lattice(extent, cs) {
                    dot(surface, x, y)?;
                }
            }
            surface.fill();
        }
        LineStyle::Dashed => {
            let period = DASH[0] + DASH[1];
            for fixed in lattice(extent, cs) {
                let mut t = -extent;
                while t <= extent {
                    let end = (t + DASH[0]).min(extent);
                    // vertical dash, then horizontal dash
                    surface.move_to(fixed, t);
                    surface.line_to(fixed, end);
                    surface.move_to(t, fixed);
                    surface.line_to(end, fixed);
                    t += period;
                }
            }
            surface.stroke();
        }
        LineStyle::Solid => {
            for v in lattice(extent, cs) {
                surface.move_to(v, -extent);
                surface.line_to(v, extent);
                surface.move_to(-extent, v);
                surface.line_to(extent, v);
            }
            surface.stroke();
        }
    }
    Ok(())
}

// =============================================================
// Hex
// =============================================================

/// Center of the hex at `(row, col)`. Odd rows shift right by half a hex.
#[must_use]
pub fn hex_center(row: i32, col: i32, cell_size: f64) -> (f64, f64) {
    let hex_width = cell_size * HEX_WIDTH_RATIO;
    let offset = if row.rem_euclid(2) == 0 { 0.0 } else { hex_width / 2.0 };
    (f64::from(col) * hex_width + offset, f64::from(row) * cell_size * HEX_ROW_RATIO)
}

fn draw_hex<S: Surface>(surface: &S, grid: &GridSettings) -> Result<(), S::Error> {
    let cs = grid.cell_size;
    let radius = cs / 2.0;
    let phase = if grid.grid_type == GridType::HexH { 0.0 } else { PI / 6.0 };

    if grid.line_style == LineStyle::Dashed {
        surface.set_line_dash(&DASH)?;
    }
    surface.begin_path();
    for row in -HEX_SPAN..=HEX_SPAN {
        for col in -HEX_SPAN..=HEX_SPAN {
            let (cx, cy) = hex_center(row, col, cs);
            if grid.line_style == LineStyle::Dots {
                dot(surface, cx, cy)?;
                continue;
            }
            for i in 0..6 {
                let a1 = PI / 3.0 * f64::from(i) + phase;
                let a2 = a1 + PI / 3.0;
                surface.move_to(cx + radius * a1.cos(), cy + radius * a1.sin());
                surface.line_to(cx + radius * a2.cos(), cy + radius * a2.sin());
            }
        }
    }
    if grid.line_style == LineStyle::Dots {
        surface.fill();
    } else {
        surface.stroke();
    }
    if grid.line_style == LineStyle::Dashed {
        surface.set_line_dash(&[])?;
    }
    Ok(())
}

// =============================================================
// Isometric
// =============================================================

fn draw_isometric<S: Surface>(surface: &S, grid: &GridSettings, extent: f64) -> Result<(), S::Error> {
    let cs = grid.cell_size;
    surface.begin_path();

    if grid.line_style == LineStyle::Dots {
        for i in -ISO_SPAN..=ISO_SPAN {
            for j in -ISO_SPAN..=ISO_SPAN {
                let x = f64::from(i - j) * cs / 2.0;
                let y = f64::from(i + j) * cs / 4.0;
                dot(surface, x, y)?;
            }
        }
        surface.fill();
        return Ok(());
    }

    if grid.line_style == LineStyle::Dashed {
        surface.set_line_dash(&DASH)?;
    }
    let half = extent / 2.0;
    let quarter = extent / 4.0;
    for i in -ISO_SPAN..=ISO_SPAN {
        let start_x = f64::from(i) * cs / 2.0;
        surface.move_to(start_x - half, -quarter);
        surface.line_to(start_x + half, quarter);
        surface.move_to(start_x - half, quarter);
        surface.line_to(start_x + half, -quarter);
    }
    surface.stroke();
    if grid.line_style == LineStyle::Dashed {
        surface.set_line_dash(&[])?;
    }
    Ok(())
}

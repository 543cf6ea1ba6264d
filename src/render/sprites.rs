//! Sprite images, the selection frame with its handles, and the screen-space
//! overlays (rotation badge, zoom indicator).

use std::f64::consts::PI;

use crate::asset::AssetId;
use crate::hit::{ResizeAnchor, handle_size, rotate_handle_local, rotate_handle_radius};
use crate::input::RotationReadout;
use crate::render::surface::Surface;
use crate::sprite::Transform;

const SELECTION_COLOR: &str = "#00aaff";
const HANDLE_STROKE: &str = "#ffffff";
const ROTATE_COLOR: &str = "#00ff00";

const BADGE_SNAPPED: &str = "rgba(22, 163, 74, 0.9)";
const BADGE_FREE: &str = "rgba(0, 0, 0, 0.7)";
const BADGE_PAD_X: f64 = 12.0;
const BADGE_HEIGHT: f64 = 32.0;

const INDICATOR_BG: &str = "rgba(0, 0, 0, 0.6)";
const INDICATOR_TEXT: &str = "rgba(255, 255, 255, 0.7)";
const INDICATOR_MARGIN: f64 = 16.0;
const INDICATOR_HEIGHT: f64 = 28.0;

/// Draw one sprite image centered on its box and rotated about its center.
///
/// # Errors
///
/// Propagates surface errors.
pub fn draw_sprite<S: Surface>(surface: &S, asset: AssetId, t: &Transform) -> Result<(), S::Error> {
    surface.save();
    translate_and_rotate(surface, t)?;
    surface.draw_image(asset, -t.width / 2.0, -t.height / 2.0, t.width, t.height)?;
    surface.restore();
    Ok(())
}

/// Draw the selection border, eight resize handles and the rotate handle.
///
/// Sizes are fixed in screen pixels, so every length is divided by `zoom`.
///
/// # Errors
///
/// Propagates surface errors.
pub fn draw_selection<S: Surface>(surface: &S, t: &Transform, zoom: f64) -> Result<(), S::Error> {
    let (w, h) = (t.width, t.height);
    let hs = handle_size(zoom);

    surface.save();
    translate_and_rotate(surface, t)?;

    surface.set_stroke_style(SELECTION_COLOR);
    surface.set_line_width(2.0 / zoom);
    surface.stroke_rect(-w / 2.0, -h / 2.0, w, h);

    // Rotate handle and its stem.
    let rh = rotate_handle_local(h, zoom);
    surface.set_stroke_style(ROTATE_COLOR);
    surface.set_line_width(1.0 / zoom);
    surface.begin_path();
    surface.move_to(0.0, -h / 2.0);
    surface.line_to(rh.x, rh.y);
    surface.stroke();

    surface.set_fill_style(ROTATE_COLOR);
    surface.set_stroke_style(HANDLE_STROKE);
    surface.begin_path();
    surface.arc(rh.x, rh.y, rotate_handle_radius(zoom), 0.0, 2.0 * PI)?;
    surface.fill();
    surface.stroke();

    surface.set_fill_style(SELECTION_COLOR);
    for anchor in ResizeAnchor::ALL {
        let p = anchor.local_position(w, h);
        surface.fill_rect(p.x - hs / 2.0, p.y - hs / 2.0, hs, hs);
        surface.stroke_rect(p.x - hs / 2.0, p.y - hs / 2.0, hs, hs);
    }

    surface.restore();
    Ok(())
}

/// Draw the rotation badge centered on the sprite. Expects an identity
/// (screen-space) transform.
///
/// # Errors
///
/// Propagates surface errors.
pub fn draw_rotation_badge<S: Surface>(surface: &S, readout: &RotationReadout) -> Result<(), S::Error> {
    let text = format!("{}°", readout.degrees);

    surface.save();
    surface.set_font("bold 18px sans-serif");
    let width = text_width(surface, &text) + BADGE_PAD_X * 2.0;

    surface.set_fill_style(if readout.is_snapped { BADGE_SNAPPED } else { BADGE_FREE });
    surface.fill_rect(readout.screen.x - width / 2.0, readout.screen.y - BADGE_HEIGHT / 2.0, width, BADGE_HEIGHT);

    surface.set_fill_style("#ffffff");
    surface.set_text_align("center");
    surface.set_text_baseline("middle");
    surface.fill_text(&text, readout.screen.x, readout.screen.y)?;
    surface.restore();
    Ok(())
}

/// Draw `NN%` at the bottom center of the viewport. Expects a screen-space
/// transform.
///
/// # Errors
///
/// Propagates surface errors.
pub fn draw_zoom_indicator<S: Surface>(
    surface: &S,
    percent: i64,
    viewport_w: f64,
    viewport_h: f64,
) -> Result<(), S::Error> {
    let text = format!("{percent}%");

    surface.save();
    surface.set_font("14px monospace");
    let width = text_width(surface, &text) + BADGE_PAD_X * 2.0;
    let cx = viewport_w / 2.0;
    let cy = viewport_h - INDICATOR_MARGIN - INDICATOR_HEIGHT / 2.0;

    surface.set_fill_style(INDICATOR_BG);
    surface.fill_rect(cx - width / 2.0, cy - INDICATOR_HEIGHT / 2.0, width, INDICATOR_HEIGHT);
    surface.set_fill_style(INDICATOR_TEXT);
    surface.set_text_align("center");
    surface.set_text_baseline("middle");
    surface.fill_text(&text, cx, cy)?;
    surface.restore();
    Ok(())
}

/// Measured width of `text`, or 0 when the surface cannot measure it.
fn text_width<S: Surface>(surface: &S, text: &str) -> f64 {
    let w = surface.measure_text(text);
    if w.is_finite() { w } else { 0.0 }
}

/// Translate to the box center and rotate by its rotation.
fn translate_and_rotate<S: Surface>(surface: &S, t: &Transform) -> Result<(), S::Error> {
    let c = t.center();
    surface.translate(c.x, c.y)?;
    surface.rotate(t.rotation)
}

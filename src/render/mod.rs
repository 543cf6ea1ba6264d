//! Rendering: draws the full battle map to a [`Surface`].
//!
//! This module receives read-only views of scene, camera and UI state and
//! produces pixels; it does not mutate any application state. Drawing is
//! generic over [`Surface`] so the same code paints the browser canvas and
//! the [`surface::RecordingSurface`] used by headless hosts and tests.
//!
//! Layer order, bottom first:
//!
//! 1. background fill
//! 2. background (map) sprites
//! 3. terrain overlay
//! 4. grid
//! 5. walls
//! 6. object sprites
//! 7. selection frame and handles
//! 8. wall preview
//! 9. screen-space overlays (rotation badge, zoom indicator)
//!
//! All fallible calls propagate `S::Error`. The top-level caller
//! ([`crate::engine::Engine::render`]) handles the result.


pub mod grid;
pub mod sprites;
pub mod surface;
pub mod terrain;
pub mod walls;

use crate::camera::Camera;
use crate::input::{RotationReadout, UiState};
use crate::scene::Scene;
use crate::sprite::{DraftTransform, Layer};
use crate::wall::GridPoint;

pub use surface::{DrawOp, RecordingSurface, Surface, WebSurface};

/// Canvas background color.
pub const BACKGROUND_COLOR: &str = "#1a1a2e";

/// Everything one frame needs, borrowed from the engine.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub scene: &'a Scene,
    pub camera: &'a Camera,
    pub ui: &'a UiState,
    /// Uncommitted geometry of the sprite being dragged.
    pub draft: Option<&'a DraftTransform>,
    /// Start and current corner of the wall being drawn.
    pub wall_preview: Option<(GridPoint, GridPoint)>,
    pub readout: Option<RotationReadout>,
    /// Half-extent of the grid in world units.
    pub grid_extent: f64,
    /// Viewport width in CSS pixels.
    pub viewport_w: f64,
    /// Viewport height in CSS pixels.
    pub viewport_h: f64,
    /// Device pixel ratio.
    pub dpr: f64,
}

/// Draw the full scene.
///
/// # Errors
///
/// Returns `Err` if any surface call fails (e.g. invalid context state).
pub fn draw<S: Surface>(surface: &S, frame: &Frame<'_>) -> Result<(), S::Error> {
    let Frame { scene, camera, ui, draft, .. } = *frame;
    let layers = ui.layers;
    let cell_size = scene.grid().cell_size;

    // Layer 1: clear in screen space.
    surface.set_transform(frame.dpr, 0.0, 0.0, frame.dpr, 0.0, 0.0)?;
    surface.clear_rect(0.0, 0.0, frame.viewport_w, frame.viewport_h);
    surface.set_fill_style(BACKGROUND_COLOR);
    surface.fill_rect(0.0, 0.0, frame.viewport_w, frame.viewport_h);

    // World transform.
    surface.save();
    surface.translate(camera.pan_x, camera.pan_y)?;
    surface.scale(camera.zoom, camera.zoom)?;

    let ordered = scene.sprites_in_draw_order();

    if layers.background {
        for sprite in ordered.iter().filter(|s| s.layer == Layer::Background) {
            sprites::draw_sprite(surface, sprite.asset_id, &DraftTransform::resolve(draft, sprite))?;
        }
    }

    if scene.show_terrain() && layers.terrain {
        terrain::draw_terrain(surface, scene.terrain(), cell_size)?;
    }

    grid::draw_grid(surface, scene.grid(), frame.grid_extent)?;

    if layers.structures {
        walls::draw_walls(surface, scene.walls(), scene.selected_wall_id(), cell_size)?;
    }

    if layers.objects {
        for sprite in ordered.iter().filter(|s| s.layer == Layer::Objects) {
            sprites::draw_sprite(surface, sprite.asset_id, &DraftTransform::resolve(draft, sprite))?;
        }
    }

    if let Some(sprite) = scene.selected_sprite().filter(|s| layers.sprite_layer(s.layer)) {
        sprites::draw_selection(surface, &DraftTransform::resolve(draft, sprite), camera.zoom)?;
    }

    if let Some((start, end)) = frame.wall_preview {
        walls::draw_wall_preview(surface, start.to_world(cell_size), end.to_world(cell_size), camera.zoom)?;
    }

    surface.restore();

    // Screen-space overlays.
    if let Some(readout) = frame.readout {
        sprites::draw_rotation_badge(surface, &readout)?;
    }
    sprites::draw_zoom_indicator(surface, camera.zoom_percent(), frame.viewport_w, frame.viewport_h)?;

    Ok(())
}

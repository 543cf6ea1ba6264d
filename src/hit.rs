//! Hit-testing against sprites and their selection handles.
//!
//! DESIGN
//! ======
//! All tests run in the sprite's local frame (origin at its center, axes
//! rotated with it), so a rotated sprite is hit exactly where it is drawn.
//! Handle sizes are fixed in screen pixels and converted to world units with
//! the current zoom. Handles of the selected sprite are tested before any
//! sprite body; bodies are tested topmost first.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::consts::{HANDLE_SIZE_PX, ROTATE_HANDLE_OFFSET_PX, ROTATE_HANDLE_RADIUS_RATIO};
use crate::geometry::world_to_local;
use crate::sprite::{DraftTransform, Layer, Sprite, SpriteId, Transform};

/// Which part of a sprite was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeAnchor),
    RotateHandle,
}

/// Anchor position for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    /// Corners first, then edges; the order handles are drawn and tested in.
    pub const ALL: [Self; 8] = [Self::Nw, Self::Ne, Self::Sw, Self::Se, Self::N, Self::S, Self::W, Self::E];

    /// Handle center in the sprite's local frame for a `width` × `height` box.
    #[must_use]
    pub fn local_position(self, width: f64, height: f64) -> Point {
        let (hw, hh) = (width / 2.0, height / 2.0);
        match self {
            Self::Nw => Point::new(-hw, -hh),
            Self::Ne => Point::new(hw, -hh),
            Self::Sw => Point::new(-hw, hh),
            Self::Se => Point::new(hw, hh),
            Self::N => Point::new(0.0, -hh),
            Self::S => Point::new(0.0, hh),
            Self::W => Point::new(-hw, 0.0),
            Self::E => Point::new(hw, 0.0),
        }
    }

    /// CSS cursor shown over this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N => "n-resize",
            Self::Ne => "ne-resize",
            Self::E => "e-resize",
            Self::Se => "se-resize",
            Self::S => "s-resize",
            Self::Sw => "sw-resize",
            Self::W => "w-resize",
            Self::Nw => "nw-resize",
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub sprite_id: SpriteId,
    pub part: HitPart,
}

/// Resize handle edge length in world units.
#[must_use]
pub fn handle_size(zoom: f64) -> f64 {
    HANDLE_SIZE_PX / zoom
}

/// Rotate handle center in the local frame of a sprite `height` tall.
#[must_use]
pub fn rotate_handle_local(height: f64, zoom: f64) -> Point {
    Point::new(0.0, -height / 2.0 - ROTATE_HANDLE_OFFSET_PX / zoom)
}

/// Rotate handle radius in world units.
#[must_use]
pub fn rotate_handle_radius(zoom: f64) -> f64 {
    handle_size(zoom) * ROTATE_HANDLE_RADIUS_RATIO
}

/// Test the rotate and resize handles of a sprite with geometry `t`.
#[must_use]
pub fn hit_handles(world: Point, t: &Transform, zoom: f64) -> Option<HitPart> {
    let local = world_to_local(world, t.center(), t.rotation);

    if local.distance(rotate_handle_local(t.height, zoom)) <= rotate_handle_radius(zoom) {
        return Some(HitPart::RotateHandle);
    }

    let half = handle_size(zoom) / 2.0;
    ResizeAnchor::ALL
        .into_iter()
        .find(|anchor| {
            let p = anchor.local_position(t.width, t.height);
            (local.x - p.x).abs() <= half && (local.y - p.y).abs() <= half
        })
        .map(HitPart::ResizeHandle)
}

/// Whether `world` lies inside the (possibly rotated) box `t`.
#[must_use]
pub fn hit_body(world: Point, t: &Transform) -> bool {
    let local = world_to_local(world, t.center(), t.rotation);
    local.x.abs() <= t.width / 2.0 && local.y.abs() <= t.height / 2.0
}

/// Find the sprite part under `world`.
///
/// `sprites` is in draw order (bottom first). Sprites whose layer fails
/// `visible` are skipped. The selected sprite's handles win over every body;
/// otherwise the topmost body hit wins.
#[must_use]
pub fn hit_test_sprites(
    world: Point,
    sprites: &[&Sprite],
    selected: Option<SpriteId>,
    draft: Option<&DraftTransform>,
    zoom: f64,
    visible: impl Fn(Layer) -> bool,
) -> Option<Hit> {
    let selected_sprite = selected.and_then(|id| sprites.iter().find(|s| s.id == id && visible(s.layer)));
    if let Some(sprite) = selected_sprite {
        let t = DraftTransform::resolve(draft, sprite);
        if let Some(part) = hit_handles(world, &t, zoom) {
            return Some(Hit { sprite_id: sprite.id, part });
        }
    }

    sprites
        .iter()
        .rev()
        .filter(|s| visible(s.layer))
        .find(|s| hit_body(world, &DraftTransform::resolve(draft, s)))
        .map(|s| Hit { sprite_id: s.id, part: HitPart::Body })
}

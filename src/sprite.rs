//! Placed sprites, their layers, and the draft transform used during drags.

#[cfg(test)]
#[path = "sprite_test.rs"]
mod sprite_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::asset::{Asset, AssetId, AssetKind};
use crate::camera::Point;

/// Unique identifier for a placed sprite.
pub type SpriteId = Uuid;

/// Draw layer of a sprite. Background sprites always render beneath objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Background,
    #[default]
    Objects,
}

impl From<AssetKind> for Layer {
    fn from(kind: AssetKind) -> Self {
        match kind {
            AssetKind::Map => Self::Background,
            AssetKind::Sprite => Self::Objects,
        }
    }
}

fn default_true() -> bool {
    true
}

/// An asset instance placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprite {
    pub id: SpriteId,
    pub asset_id: AssetId,
    /// Left edge at rotation 0, in world units.
    pub x: f64,
    /// Top edge at rotation 0, in world units.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise rotation in radians about the sprite center.
    pub rotation: f64,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub layer: Layer,
    /// Whether drags quantize position and size to the grid.
    #[serde(default = "default_true")]
    pub snap_to_grid: bool,
}

impl Sprite {
    /// A new sprite at `(x, y)` with the asset's natural size.
    ///
    /// Background sprites start unsnapped so maps can be calibrated to the
    /// grid with sub-cell offsets.
    #[must_use]
    pub fn from_asset(asset: &Asset, x: f64, y: f64) -> Self {
        let layer = Layer::from(asset.kind);
        Self {
            id: Uuid::new_v4(),
            asset_id: asset.id,
            x,
            y,
            width: asset.width,
            height: asset.height,
            rotation: 0.0,
            locked: false,
            layer,
            snap_to_grid: layer == Layer::Objects,
        }
    }

    /// Rotation pivot in world coordinates.
    #[must_use]
    pub fn center(&self) -> Point {
        self.transform().center()
    }

    /// Current geometry as a [`Transform`].
    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform { x: self.x, y: self.y, width: self.width, height: self.height, rotation: self.rotation }
    }
}

/// Position, size and rotation of a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

impl Transform {
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Uncommitted geometry for the sprite being dragged.
///
/// Renderers and handle hit-testing read the draft in place of the committed
/// sprite so feedback tracks the pointer; it is written back to the scene
/// once on pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DraftTransform {
    pub sprite_id: SpriteId,
    pub transform: Transform,
}

impl DraftTransform {
    /// Geometry to show for `sprite`: the draft when it targets this sprite.
    #[must_use]
    pub fn resolve(draft: Option<&DraftTransform>, sprite: &Sprite) -> Transform {
        match draft {
            Some(d) if d.sprite_id == sprite.id => d.transform,
            _ => sprite.transform(),
        }
    }
}

//! Editor input vocabulary and gesture state.
//!
//! Event payloads (`Button`, `Modifiers`, `Key`, `WheelDelta`) arrive from the
//! host already decoded. `UiState` holds the editor choices that shape what a
//! pointer press means: active tool, terrain brush, wall defaults, visible
//! layers. `InputState` tracks the one gesture in flight between pointer-down
//! and pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::hit::ResizeAnchor;
use crate::sprite::{Layer, SpriteId, Transform};
use crate::terrain::{CellCoord, TerrainBrush};
use crate::wall::{GridPoint, WallDefaults};

/// Active editing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Select, move, resize and rotate sprites; select walls.
    #[default]
    Select,
    /// Pan the view with the primary button.
    Hand,
    /// Paint terrain cells with the current brush.
    Terrain,
    /// Draw walls between grid corners.
    Wall,
}

impl Tool {
    /// Cursor shown while idle with this tool.
    #[must_use]
    pub fn idle_cursor(self) -> &'static str {
        match self {
            Self::Select => "default",
            Self::Hand => "grab",
            Self::Terrain | Self::Wall => "crosshair",
        }
    }
}

/// Modifier keys held when the event fired.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Command on macOS, Windows key elsewhere.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer button that started a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left button, pen or touch contact.
    Primary,
    /// Wheel press; always pans.
    Middle,
    Secondary,
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"r"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Scroll amounts from a wheel event. Only the sign of `dy` matters for
/// zooming; positive scrolls away from the user.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    pub dx: f64,
    pub dy: f64,
}

/// Which parts of the scene are drawn and hit-tested.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerVisibility {
    pub background: bool,
    pub terrain: bool,
    /// Walls and doors.
    pub structures: bool,
    pub objects: bool,
}

impl Default for LayerVisibility {
    fn default() -> Self {
        Self { background: true, terrain: true, structures: true, objects: true }
    }
}

impl LayerVisibility {
    /// Whether sprites on `layer` are visible.
    #[must_use]
    pub fn sprite_layer(self, layer: Layer) -> bool {
        match layer {
            Layer::Background => self.background,
            Layer::Objects => self.objects,
        }
    }
}

/// Editor UI state visible to the renderer and input handlers.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub tool: Tool,
    /// Brush used by the terrain tool.
    pub brush: TerrainBrush,
    /// Attributes given to walls drawn with the wall tool.
    pub wall_defaults: WallDefaults,
    pub layers: LayerVisibility,
}

/// What a sprite drag is doing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragMode {
    /// Translate; `offset` is pointer minus sprite center at grab time.
    Move { offset: Point },
    /// Drag a resize handle from `start_screen`, relative to `orig`.
    Resize { anchor: ResizeAnchor, start_screen: Point, orig: Transform },
    /// Turn about `center`, fixed at grab time.
    Rotate { center: Point },
}

/// The gesture in flight. Exactly one is active; every non-idle variant
/// ends on pointer-up (inside or outside the canvas).
#[derive(Debug, Clone, Default)]
pub enum InputState {
    #[default]
    Idle,
    /// Panning the view. The pan is `pan_origin` plus the pointer travel
    /// since `pointer_origin`.
    Panning { pan_origin: Point, pointer_origin: Point },
    /// Moving, resizing or rotating a sprite.
    DraggingSprite { id: SpriteId, mode: DragMode },
    /// Painting terrain; `last_cell` avoids repainting the same cell.
    PaintingTerrain { last_cell: CellCoord },
    /// Drawing a wall from one grid corner to another.
    DrawingWall { start: GridPoint, current: GridPoint },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Live rotation feedback shown while a rotate drag is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationReadout {
    /// Whole degrees in `0..360`.
    pub degrees: i64,
    pub is_snapped: bool,
    /// Screen position of the sprite center.
    pub screen: Point,
}

//! Shared numeric constants for the battle-map engine.

use std::f64::consts::PI;

// ── Viewport ────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 5.0;

/// Zoom multiplier applied per wheel notch towards the user (zoom in).
pub const ZOOM_IN_FACTOR: f64 = 1.1;

/// Zoom multiplier applied per wheel notch away from the user (zoom out).
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

// ── Sprites ─────────────────────────────────────────────────────

/// Minimum sprite width/height in world units during interactive resize.
pub const MIN_SPRITE_SIZE: f64 = 20.0;

/// Offset applied to duplicated and pasted sprites, in world units.
pub const DUPLICATE_OFFSET: f64 = 30.0;

/// Keyboard rotation step in degrees.
pub const ROTATE_STEP_DEG: f64 = 15.0;

// ── Handles ─────────────────────────────────────────────────────

/// Edge length of a resize handle in screen pixels.
pub const HANDLE_SIZE_PX: f64 = 10.0;

/// Distance from the top edge to the rotate handle, in screen pixels.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 30.0;

/// Rotate handle radius relative to the resize handle size.
pub const ROTATE_HANDLE_RADIUS_RATIO: f64 = 1.0 / 1.5;

// ── Angle snapping ──────────────────────────────────────────────

/// Rotation snaps to multiples of 45°.
pub const ANGLE_SNAP_STEP: f64 = PI / 4.0;

/// Rotation within 2° of a snap angle is pulled onto it.
pub const ANGLE_SNAP_THRESHOLD: f64 = PI / 90.0;

/// Absorbs float error when the distance to a snap angle equals the threshold.
pub const ANGLE_SNAP_EPSILON: f64 = 1e-9;

// ── Walls ───────────────────────────────────────────────────────

/// Click tolerance for wall selection (screen pixels or world units, see config).
pub const WALL_HIT_TOLERANCE: f64 = 10.0;

// ── Grid ────────────────────────────────────────────────────────

/// Half-extent of the rendered grid in world units.
pub const GRID_EXTENT: f64 = 5000.0;

/// Default grid cell size in world units.
pub const DEFAULT_CELL_SIZE: f64 = 50.0;

// ── Persistence ─────────────────────────────────────────────────

/// Snapshot format version written by `Scene::save_snapshot`.
pub const SNAPSHOT_VERSION: u32 = 1;

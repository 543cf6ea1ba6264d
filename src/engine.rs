//! Interaction controller: turns pointer, wheel and key events into scene
//! mutations and camera changes.
//!
//! DESIGN
//! ======
//! `EngineCore` owns the scene, the camera and the gesture state machine and
//! has no browser dependencies, so every interaction is testable natively.
//! `Engine` wraps it together with the canvas element and the decoded image
//! cache and adds rendering.
//!
//! Sprite drags never touch the scene while in flight. Each pointer move
//! recomputes a [`DraftTransform`] from the geometry captured at drag start;
//! renderers and handle hit-tests read the draft, and pointer-up writes it
//! back once. Terrain painting and wall drawing commit as they go and on
//! release respectively.
//!
//! Every handler returns the [`Action`]s the host should react to.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashMap;

use tracing::{debug, info, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::asset::AssetId;
use crate::camera::{Camera, Point};
use crate::config::EditorConfig;
use crate::consts::{ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
use crate::drag;
use crate::geometry::{cell_at, display_degrees, nearest_corner, normalize_angle};
use crate::hit::{self, HitPart};
use crate::input::{Button, DragMode, InputState, Key, Modifiers, RotationReadout, Tool, UiState, WheelDelta};
use crate::render::{self, Frame, WebSurface};
use crate::scene::Scene;
use crate::sprite::{DraftTransform, Sprite, SpriteId, Transform};
use crate::terrain::{CellCoord, MAX_BRUSH_SIZE, TerrainBrush};
use crate::wall::{GridPoint, WallId, WallInsert, WallSegment};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    RenderNeeded,
    SetCursor(String),
    ToolChanged(Tool),
    SelectionChanged { sprite: Option<SpriteId>, wall: Option<WallId> },
    /// A drag or shortcut committed new geometry.
    SpriteTransformed { id: SpriteId, transform: Transform },
    SpriteCreated(Sprite),
    SpriteDeleted { id: SpriteId },
    TerrainPainted { cells: Vec<CellCoord> },
    WallCreated(WallSegment),
    WallDeleted { id: WallId },
    ViewportChanged(Camera),
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub scene: Scene,
    pub camera: Camera,
    pub config: EditorConfig,
    pub ui: UiState,
    pub input: InputState,
    draft: Option<DraftTransform>,
    readout: Option<RotationReadout>,
    clipboard: Option<SpriteId>,
    cursor: String,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        Self { config, cursor: "default".into(), dpr: 1.0, ..Self::default() }
    }

    // --- Tool / UI ---

    /// Set the active tool. Ignored while a gesture is in progress.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        if self.ui.tool == tool || !self.input.is_idle() {
            return Vec::new();
        }
        self.ui.tool = tool;
        let mut actions = vec![Action::ToolChanged(tool)];
        self.push_cursor(&mut actions, tool.idle_cursor());
        actions
    }

    /// Set the terrain brush; size is clamped to `1..=MAX_BRUSH_SIZE`.
    pub fn set_brush(&mut self, brush: TerrainBrush) {
        self.ui.brush = TerrainBrush { size: brush.size.clamp(1, MAX_BRUSH_SIZE), ..brush };
    }

    /// Update viewport dimensions and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = if dpr > 0.0 { dpr } else { 1.0 };
    }

    // --- Queries ---

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Zoom as a whole percentage for the zoom indicator.
    #[must_use]
    pub fn zoom_percent(&self) -> i64 {
        self.camera.zoom_percent()
    }

    /// Live rotation feedback while a rotate drag is active.
    #[must_use]
    pub fn rotation_readout(&self) -> Option<RotationReadout> {
        self.readout
    }

    /// Uncommitted geometry of the sprite being dragged.
    #[must_use]
    pub fn draft(&self) -> Option<&DraftTransform> {
        self.draft.as_ref()
    }

    /// Geometry of a sprite as currently displayed (draft if dragging).
    #[must_use]
    pub fn displayed_transform(&self, id: SpriteId) -> Option<Transform> {
        self.scene.sprite(id).map(|s| DraftTransform::resolve(self.draft.as_ref(), s))
    }

    /// Borrowed view of everything the renderer needs.
    #[must_use]
    pub fn frame(&self) -> Frame<'_> {
        let wall_preview = match self.input {
            InputState::DrawingWall { start, current } => Some((start, current)),
            _ => None,
        };
        Frame {
            scene: &self.scene,
            camera: &self.camera,
            ui: &self.ui,
            draft: self.draft.as_ref(),
            wall_preview,
            readout: self.readout,
            grid_extent: self.config.grid_extent,
            viewport_w: self.viewport_width,
            viewport_h: self.viewport_height,
            dpr: self.dpr,
        }
    }

    // --- Pointer ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        let mut actions = Vec::new();

        if button == Button::Middle || (button == Button::Primary && self.ui.tool == Tool::Hand) {
            self.input = InputState::Panning {
                pan_origin: Point::new(self.camera.pan_x, self.camera.pan_y),
                pointer_origin: screen_pt,
            };
            self.push_cursor(&mut actions, "grabbing");
            return actions;
        }

        let world = self.camera.screen_to_world(screen_pt);
        match self.ui.tool {
            Tool::Terrain if button == Button::Primary => {
                let cell = self.cell_under(world);
                let cells = self.scene.paint_area(cell, &self.ui.brush);
                self.input = InputState::PaintingTerrain { last_cell: cell };
                actions.push(Action::TerrainPainted { cells });
                actions.push(Action::RenderNeeded);
            }
            Tool::Wall if button == Button::Primary => {
                let corner = self.corner_under(world);
                self.input = InputState::DrawingWall { start: corner, current: corner };
                actions.push(Action::RenderNeeded);
            }
            Tool::Select => self.select_down(world, screen_pt, button, &mut actions),
            _ => {}
        }
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        let world = self.camera.screen_to_world(screen_pt);

        match self.input {
            InputState::Idle => self.hover(world, &mut actions),
            InputState::Panning { pan_origin, pointer_origin } => {
                self.camera.pan_x = pan_origin.x + (screen_pt.x - pointer_origin.x);
                self.camera.pan_y = pan_origin.y + (screen_pt.y - pointer_origin.y);
                actions.push(Action::ViewportChanged(self.camera));
                actions.push(Action::RenderNeeded);
            }
            InputState::DraggingSprite { id, mode } => {
                if self.drag_to(id, mode, screen_pt, world) {
                    actions.push(Action::RenderNeeded);
                } else {
                    // Sprite vanished mid-drag.
                    self.input = InputState::Idle;
                    self.draft = None;
                    self.readout = None;
                }
            }
            InputState::PaintingTerrain { last_cell } => {
                let cell = self.cell_under(world);
                if cell != last_cell {
                    let cells = self.scene.paint_area(cell, &self.ui.brush);
                    self.input = InputState::PaintingTerrain { last_cell: cell };
                    actions.push(Action::TerrainPainted { cells });
                    actions.push(Action::RenderNeeded);
                }
            }
            InputState::DrawingWall { start, current } => {
                let corner = self.corner_under(world);
                if corner != current {
                    self.input = InputState::DrawingWall { start, current: corner };
                    actions.push(Action::RenderNeeded);
                }
            }
        }
        actions
    }

    /// Finish the active gesture. Also used for pointer-up outside the canvas.
    pub fn on_pointer_up(&mut self, _screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();

        match std::mem::take(&mut self.input) {
            InputState::Idle => return actions,
            InputState::Panning { .. } => {
                debug!(pan_x = self.camera.pan_x, pan_y = self.camera.pan_y, "pan finished");
            }
            InputState::DraggingSprite { id, mode } => {
                self.readout = None;
                if let Some(draft) = self.draft.take() {
                    self.commit_drag(id, mode, draft.transform, &mut actions);
                }
                actions.push(Action::RenderNeeded);
            }
            InputState::PaintingTerrain { last_cell } => {
                debug!(x = last_cell.x, y = last_cell.y, cells = self.scene.terrain().len(), "terrain stroke finished");
            }
            InputState::DrawingWall { start, current } => {
                self.finish_wall(start, current, &mut actions);
                actions.push(Action::RenderNeeded);
            }
        }

        let idle = self.ui.tool.idle_cursor();
        self.push_cursor(&mut actions, idle);
        actions
    }

    /// Zoom about the cursor. Horizontal-only scrolls are ignored.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        if delta.dy == 0.0 {
            return Vec::new();
        }
        let factor = if delta.dy > 0.0 { ZOOM_OUT_FACTOR } else { ZOOM_IN_FACTOR };
        if !self.camera.zoom_at(screen_pt, factor, self.config.min_zoom, self.config.max_zoom) {
            return Vec::new();
        }
        match (&mut self.input, self.readout.as_mut()) {
            // Pan continues from the zoomed view, not the pre-zoom origin.
            (InputState::Panning { pan_origin, pointer_origin }, _) => {
                *pan_origin = Point::new(self.camera.pan_x, self.camera.pan_y);
                *pointer_origin = screen_pt;
            }
            (InputState::DraggingSprite { mode: DragMode::Rotate { center }, .. }, Some(readout)) => {
                readout.screen = self.camera.world_to_screen(*center);
            }
            _ => {}
        }
        vec![Action::ViewportChanged(self.camera), Action::RenderNeeded]
    }

    // --- Keyboard ---

    /// Editor shortcuts. Ignored while a gesture is in progress.
    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        let command = modifiers.command();
        let mut actions = Vec::new();

        match key.0.as_str() {
            "Delete" | "Backspace" => self.delete_selection(&mut actions),
            "Escape" => self.clear_selection(&mut actions),
            "c" | "C" if command => {
                if let Some(id) = self.scene.selected_sprite_id() {
                    self.clipboard = Some(id);
                    debug!(sprite_id = %id, "sprite copied");
                }
            }
            "v" | "V" if command => {
                if let Some(id) = self.clipboard {
                    self.duplicate(id, &mut actions);
                }
            }
            "d" | "D" if command => {
                if let Some(id) = self.scene.selected_sprite_id() {
                    self.duplicate(id, &mut actions);
                }
            }
            "0" if command => self.set_selected_rotation(|_| 0.0, &mut actions),
            "r" | "R" if !command => {
                let step = self.config.rotate_step_deg.to_radians();
                let step = if modifiers.shift { -step } else { step };
                self.set_selected_rotation(|r| normalize_angle(r + step), &mut actions);
            }
            "v" | "V" if !command => actions.extend(self.set_tool(Tool::Select)),
            "h" | "H" if !command => actions.extend(self.set_tool(Tool::Hand)),
            "t" | "T" if !command => actions.extend(self.set_tool(Tool::Terrain)),
            "w" | "W" if !command => actions.extend(self.set_tool(Tool::Wall)),
            _ => {}
        }
        actions
    }

    // =============================================================
    // Select tool
    // =============================================================

    fn select_down(&mut self, world: Point, screen_pt: Point, button: Button, actions: &mut Vec<Action>) {
        let layers = self.ui.layers;
        let hit = {
            let ordered = self.scene.sprites_in_draw_order();
            hit::hit_test_sprites(
                world,
                &ordered,
                self.scene.selected_sprite_id(),
                None,
                self.camera.zoom,
                |l| layers.sprite_layer(l),
            )
        };

        if let Some(hit) = hit {
            if self.scene.selected_sprite_id() != Some(hit.sprite_id) {
                self.scene.select_sprite(Some(hit.sprite_id));
                self.push_selection(actions);
            }
            let Some(sprite) = self.scene.sprite(hit.sprite_id) else {
                return;
            };
            if button == Button::Primary && !sprite.locked {
                let mode = match hit.part {
                    HitPart::Body => DragMode::Move { offset: sub(world, sprite.center()) },
                    HitPart::ResizeHandle(anchor) => {
                        DragMode::Resize { anchor, start_screen: screen_pt, orig: sprite.transform() }
                    }
                    HitPart::RotateHandle => DragMode::Rotate { center: sprite.center() },
                };
                debug!(sprite_id = %sprite.id, ?mode, "sprite drag started");
                self.draft = Some(DraftTransform { sprite_id: sprite.id, transform: sprite.transform() });
                self.input = InputState::DraggingSprite { id: sprite.id, mode };
                let cursor = drag_cursor(&mode);
                self.push_cursor(actions, cursor);
            }
            actions.push(Action::RenderNeeded);
            return;
        }

        if layers.structures {
            let tolerance = self.config.wall_tolerance_world(self.camera.zoom);
            if let Some(id) = self.scene.wall_at(world, tolerance) {
                if self.scene.selected_wall_id() != Some(id) {
                    self.scene.select_wall(Some(id));
                    self.push_selection(actions);
                    actions.push(Action::RenderNeeded);
                }
                return;
            }
        }

        if button == Button::Primary {
            self.clear_selection(actions);
        }
    }

    fn hover(&mut self, world: Point, actions: &mut Vec<Action>) {
        if self.ui.tool != Tool::Select {
            return;
        }
        let layers = self.ui.layers;
        let hit = {
            let ordered = self.scene.sprites_in_draw_order();
            hit::hit_test_sprites(
                world,
                &ordered,
                self.scene.selected_sprite_id(),
                None,
                self.camera.zoom,
                |l| layers.sprite_layer(l),
            )
        };
        let locked = hit.and_then(|h| self.scene.sprite(h.sprite_id)).is_some_and(|s| s.locked);
        let cursor = match hit.map(|h| h.part) {
            Some(_) if locked => "pointer",
            Some(HitPart::Body) => "move",
            Some(HitPart::ResizeHandle(anchor)) => anchor.cursor(),
            Some(HitPart::RotateHandle) => "grab",
            None => Tool::Select.idle_cursor(),
        };
        self.push_cursor(actions, cursor);
    }

    // =============================================================
    // Sprite drags
    // =============================================================

    /// Recompute the draft for the pointer at `screen_pt` / `world`.
    /// Returns `false` if the sprite no longer exists.
    fn drag_to(&mut self, id: SpriteId, mode: DragMode, screen_pt: Point, world: Point) -> bool {
        let Some(sprite) = self.scene.sprite(id) else {
            return false;
        };
        let snap = sprite.snap_to_grid.then_some(self.scene.grid().cell_size);
        let current = DraftTransform::resolve(self.draft.as_ref(), sprite);

        let transform = match mode {
            DragMode::Move { offset } => drag::moved(&current, world, offset, snap),
            DragMode::Resize { anchor, start_screen, orig } => {
                let dx = (screen_pt.x - start_screen.x) / self.camera.zoom;
                let dy = (screen_pt.y - start_screen.y) / self.camera.zoom;
                drag::resized(&orig, anchor, dx, dy, snap)
            }
            DragMode::Rotate { center } => {
                let snapped = drag::rotation_towards(center, world);
                self.readout = Some(RotationReadout {
                    degrees: display_degrees(snapped.angle),
                    is_snapped: snapped.is_snapped,
                    screen: self.camera.world_to_screen(center),
                });
                Transform { rotation: snapped.angle, ..current }
            }
        };
        self.draft = Some(DraftTransform { sprite_id: id, transform });
        true
    }

    fn commit_drag(&mut self, id: SpriteId, mode: DragMode, transform: Transform, actions: &mut Vec<Action>) {
        let Some(before) = self.scene.sprite(id).map(Sprite::transform) else {
            return;
        };
        if before == transform {
            return;
        }
        let committed = match mode {
            DragMode::Rotate { .. } => self.scene.update_sprite_rotation(id, transform.rotation),
            DragMode::Move { .. } | DragMode::Resize { .. } => {
                self.scene.update_sprite_transform(id, transform.x, transform.y, transform.width, transform.height)
            }
        };
        if committed {
            info!(sprite_id = %id, x = transform.x, y = transform.y, width = transform.width,
                height = transform.height, rotation = transform.rotation, "drag committed");
            actions.push(Action::SpriteTransformed { id, transform });
        }
    }

    // =============================================================
    // Walls / terrain
    // =============================================================

    fn finish_wall(&mut self, start: GridPoint, end: GridPoint, actions: &mut Vec<Action>) {
        match self.scene.add_wall(start, end, &self.ui.wall_defaults) {
            Some(WallInsert::Created(id)) => {
                if let Some(wall) = self.scene.wall(id) {
                    actions.push(Action::WallCreated(wall.clone()));
                }
            }
            Some(WallInsert::Existing(_)) => self.push_selection(actions),
            None => {}
        }
    }

    fn cell_under(&self, world: Point) -> CellCoord {
        let (x, y) = cell_at(world, self.scene.grid().cell_size);
        CellCoord::new(x, y)
    }

    fn corner_under(&self, world: Point) -> GridPoint {
        let (x, y) = nearest_corner(world, self.scene.grid().cell_size);
        GridPoint::new(x, y)
    }

    // =============================================================
    // Shortcut helpers
    // =============================================================

    fn delete_selection(&mut self, actions: &mut Vec<Action>) {
        if let Some(id) = self.scene.selected_sprite_id() {
            match self.scene.delete_sprite(id) {
                Ok(_) => {
                    actions.push(Action::SpriteDeleted { id });
                    self.push_selection(actions);
                    actions.push(Action::RenderNeeded);
                }
                Err(e) => warn!(error = %e, code = e.error_code(), "delete failed"),
            }
        } else if let Some(id) = self.scene.selected_wall_id() {
            match self.scene.delete_wall(id) {
                Ok(_) => {
                    actions.push(Action::WallDeleted { id });
                    self.push_selection(actions);
                    actions.push(Action::RenderNeeded);
                }
                Err(e) => warn!(error = %e, code = e.error_code(), "delete failed"),
            }
        }
    }

    fn clear_selection(&mut self, actions: &mut Vec<Action>) {
        if self.scene.selected_sprite_id().is_none() && self.scene.selected_wall_id().is_none() {
            return;
        }
        self.scene.select_sprite(None);
        self.scene.select_wall(None);
        self.push_selection(actions);
        actions.push(Action::RenderNeeded);
    }

    fn duplicate(&mut self, id: SpriteId, actions: &mut Vec<Action>) {
        let offset = self.config.duplicate_offset;
        match self.scene.duplicate_sprite(id, offset, offset) {
            Ok(copy) => {
                actions.push(Action::SpriteCreated(copy));
                self.push_selection(actions);
                actions.push(Action::RenderNeeded);
            }
            Err(e) => debug!(error = %e, "nothing to duplicate"),
        }
    }

    fn set_selected_rotation(&mut self, rotate: impl Fn(f64) -> f64, actions: &mut Vec<Action>) {
        let Some(sprite) = self.scene.selected_sprite().filter(|s| !s.locked) else {
            return;
        };
        let id = sprite.id;
        let rotation = rotate(sprite.rotation);
        if self.scene.update_sprite_rotation(id, rotation) {
            if let Some(sprite) = self.scene.sprite(id) {
                actions.push(Action::SpriteTransformed { id, transform: sprite.transform() });
            }
            actions.push(Action::RenderNeeded);
        }
    }

    // =============================================================
    // Action helpers
    // =============================================================

    fn push_selection(&self, actions: &mut Vec<Action>) {
        actions.push(Action::SelectionChanged {
            sprite: self.scene.selected_sprite_id(),
            wall: self.scene.selected_wall_id(),
        });
    }

    fn push_cursor(&mut self, actions: &mut Vec<Action>, cursor: &str) {
        if self.cursor != cursor {
            cursor.clone_into(&mut self.cursor);
            actions.push(Action::SetCursor(cursor.to_owned()));
        }
    }
}

fn sub(a: Point, b: Point) -> Point {
    Point::new(a.x - b.x, a.y - b.y)
}

fn drag_cursor(mode: &DragMode) -> &'static str {
    match mode {
        DragMode::Move { .. } => "move",
        DragMode::Resize { anchor, .. } => anchor.cursor(),
        DragMode::Rotate { .. } => "grabbing",
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas
/// element and the decoded images drawn onto it.
pub struct Engine {
    canvas: HtmlCanvasElement,
    images: HashMap<AssetId, HtmlImageElement>,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, config: EditorConfig) -> Self {
        Self { canvas, images: HashMap::new(), core: EngineCore::with_config(config) }
    }

    /// Make a loaded image drawable for `asset`.
    ///
    /// Images arriving after their asset was removed (or the scene replaced)
    /// are dropped. Returns whether the image was kept.
    pub fn register_image(&mut self, asset: AssetId, image: HtmlImageElement) -> bool {
        if self.core.scene.asset(asset).is_none() {
            debug!(%asset, "dropping image for unknown asset");
            return false;
        }
        self.images.insert(asset, image);
        true
    }

    /// Forget images whose assets are gone.
    pub fn prune_images(&mut self) {
        let scene = &self.core.scene;
        self.images.retain(|id, _| scene.asset(*id).is_some());
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio, resizing the
    /// canvas backing store to match.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        let dpr = self.core.dpr;
        self.canvas.set_width((width_css * dpr).round().max(0.0) as u32);
        self.canvas.set_height((height_css * dpr).round().max(0.0) as u32);
    }

    // --- Delegated input ---

    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.core.set_tool(tool)
    }

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a canvas call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        let surface = WebSurface::new(&ctx, &self.images);
        render::draw(&surface, &self.core.frame())
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }

    #[must_use]
    pub fn zoom_percent(&self) -> i64 {
        self.core.zoom_percent()
    }

    #[must_use]
    pub fn rotation_readout(&self) -> Option<RotationReadout> {
        self.core.rotation_readout()
    }
}

//! Scene model: assets, placed sprites, terrain, walls and grid settings.
//!
//! `Scene` is the single owner of everything that is persisted in a project
//! snapshot, plus the current selection. The interaction engine mutates it
//! through the operations here and the renderers only read from it.
//!
//! DESIGN
//! ======
//! Sprites are kept in insertion order; draw order is a stable partition that
//! moves background sprites ahead of objects. Asset removal cascades to every
//! sprite that references the asset. Sprite and wall selection are mutually
//! exclusive: selecting one clears the other.
//!
//! Update-style operations (`update_sprite_*`, `nudge_sprite`, …) return
//! `false` for an unknown id because a drag can outlive its sprite. Explicit
//! operations (`delete_sprite`, `duplicate_sprite`, `remove_asset`) return
//! [`SceneError::NotFound`].
//!
//! Every clear or snapshot load bumps an epoch. Imports that were started
//! before the bump are dropped when they complete.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::asset::{Asset, AssetId, AssetKind, DecodedImage, ImageDecoder};
use crate::camera::Point;
use crate::error::{EntityKind, SceneError};
use crate::grid::{GridSettings, GridSettingsPatch};
use crate::sprite::{Layer, Sprite, SpriteId};
use crate::terrain::{CellCoord, TerrainBrush, TerrainCell, TerrainGrid};
use crate::wall::{GridPoint, WallDefaults, WallId, WallInsert, WallKey, WallPatch, WallSegment};

/// Which dimensions `scale_sprite_to_asset` rescales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleAxis {
    Width,
    Height,
    Both,
}

/// Proof that an import was started against a particular scene generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportTicket {
    epoch: u64,
}

/// The editable battle map.
#[derive(Debug, Clone)]
pub struct Scene {
    pub(crate) assets: Vec<Asset>,
    pub(crate) sprites: Vec<Sprite>,
    pub(crate) terrain: TerrainGrid,
    pub(crate) walls: Vec<WallSegment>,
    pub(crate) grid: GridSettings,
    pub(crate) show_terrain: bool,
    pub(crate) selected_sprite: Option<SpriteId>,
    pub(crate) selected_wall: Option<WallId>,
    pub(crate) epoch: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            assets: Vec::new(),
            sprites: Vec::new(),
            terrain: TerrainGrid::new(),
            walls: Vec::new(),
            grid: GridSettings::default(),
            show_terrain: true,
            selected_sprite: None,
            selected_wall: None,
            epoch: 0,
        }
    }
}

impl Scene {
    /// An empty scene with default grid settings and terrain shown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Assets ──────────────────────────────────────────────────

    #[must_use]
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    #[must_use]
    pub fn asset(&self, id: AssetId) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Decode `bytes` and add the result to the library.
    ///
    /// # Errors
    ///
    /// [`SceneError::Decode`] when the decoder rejects the bytes. The scene is
    /// not modified.
    pub fn add_asset(
        &mut self,
        name: &str,
        bytes: &[u8],
        kind: AssetKind,
        decoder: &dyn ImageDecoder,
    ) -> Result<Asset, SceneError> {
        let decoded = decoder.decode(bytes).inspect_err(|e| {
            warn!(name, error = %e, "asset decode failed");
        })?;
        Ok(self.insert_asset(name, decoded, kind))
    }

    fn insert_asset(&mut self, name: &str, decoded: DecodedImage, kind: AssetKind) -> Asset {
        let asset = Asset::from_decoded(name, decoded, kind);
        info!(asset_id = %asset.id, name = %asset.name, ?kind, width = asset.width, height = asset.height, "asset added");
        self.assets.push(asset.clone());
        asset
    }

    /// Remove an asset and every sprite that uses it. Returns the number of
    /// sprites removed.
    ///
    /// # Errors
    ///
    /// [`SceneError::NotFound`] for an unknown asset id.
    pub fn remove_asset(&mut self, id: AssetId) -> Result<usize, SceneError> {
        let index = self
            .assets
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| SceneError::not_found(EntityKind::Asset, id))?;
        self.assets.remove(index);

        let before = self.sprites.len();
        self.sprites.retain(|s| s.asset_id != id);
        let removed = before - self.sprites.len();

        if self.selected_sprite.is_some_and(|sel| self.sprite(sel).is_none()) {
            self.selected_sprite = None;
        }
        info!(asset_id = %id, sprites_removed = removed, "asset removed");
        Ok(removed)
    }

    /// Start an import whose decode finishes later.
    #[must_use]
    pub fn begin_import(&self) -> ImportTicket {
        ImportTicket { epoch: self.epoch }
    }

    /// Complete an import started with [`Scene::begin_import`].
    ///
    /// Returns `None` without touching the scene if it was cleared or
    /// reloaded since the ticket was issued.
    pub fn finish_import(
        &mut self,
        ticket: ImportTicket,
        name: &str,
        decoded: DecodedImage,
        kind: AssetKind,
    ) -> Option<Asset> {
        if ticket.epoch != self.epoch {
            debug!(name, ticket_epoch = ticket.epoch, epoch = self.epoch, "discarding stale import");
            return None;
        }
        Some(self.insert_asset(name, decoded, kind))
    }

    // ── Sprites ─────────────────────────────────────────────────

    /// Sprites in insertion order.
    #[must_use]
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    #[must_use]
    pub fn sprite(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.id == id)
    }

    fn sprite_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites.iter_mut().find(|s| s.id == id)
    }

    /// Sprites bottom-to-top: background first, then objects, each in
    /// insertion order.
    #[must_use]
    pub fn sprites_in_draw_order(&self) -> Vec<&Sprite> {
        let (mut ordered, objects): (Vec<&Sprite>, Vec<&Sprite>) =
            self.sprites.iter().partition(|s| s.layer == Layer::Background);
        ordered.extend(objects);
        ordered
    }

    /// Place a new sprite for `asset_id` with its top-left at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`SceneError::NotFound`] if the asset does not exist.
    pub fn place_sprite(&mut self, asset_id: AssetId, x: f64, y: f64) -> Result<Sprite, SceneError> {
        let asset = self.asset(asset_id).ok_or_else(|| SceneError::not_found(EntityKind::Asset, asset_id))?;
        let sprite = Sprite::from_asset(asset, x, y);
        debug!(sprite_id = %sprite.id, %asset_id, x, y, layer = ?sprite.layer, "sprite placed");
        self.sprites.push(sprite.clone());
        Ok(sprite)
    }

    /// Import a map image and lay it down as a background sprite at the origin.
    ///
    /// # Errors
    ///
    /// [`SceneError::Decode`] when the image cannot be decoded.
    pub fn place_map_background(
        &mut self,
        name: &str,
        bytes: &[u8],
        decoder: &dyn ImageDecoder,
    ) -> Result<Sprite, SceneError> {
        let asset = self.add_asset(name, bytes, AssetKind::Map, decoder)?;
        self.place_sprite(asset.id, 0.0, 0.0)
    }

    #[must_use]
    pub fn selected_sprite_id(&self) -> Option<SpriteId> {
        self.selected_sprite
    }

    #[must_use]
    pub fn selected_sprite(&self) -> Option<&Sprite> {
        self.selected_sprite.and_then(|id| self.sprite(id))
    }

    /// Select a sprite, or clear the selection with `None`.
    ///
    /// Selecting an id that does not exist clears the selection.
    pub fn select_sprite(&mut self, id: Option<SpriteId>) {
        self.selected_sprite = id.filter(|id| self.sprite(*id).is_some());
        if self.selected_sprite.is_some() {
            self.selected_wall = None;
        }
    }

    pub fn update_sprite_position(&mut self, id: SpriteId, x: f64, y: f64) -> bool {
        let Some(s) = self.sprite_mut(id) else {
            return false;
        };
        s.x = x;
        s.y = y;
        true
    }

    pub fn update_sprite_size(&mut self, id: SpriteId, width: f64, height: f64) -> bool {
        let Some(s) = self.sprite_mut(id) else {
            return false;
        };
        s.width = width;
        s.height = height;
        true
    }

    pub fn update_sprite_rotation(&mut self, id: SpriteId, rotation: f64) -> bool {
        let Some(s) = self.sprite_mut(id) else {
            return false;
        };
        s.rotation = rotation;
        true
    }

    /// Overwrite position and size in one step. Rotation is left as is.
    pub fn update_sprite_transform(&mut self, id: SpriteId, x: f64, y: f64, width: f64, height: f64) -> bool {
        let Some(s) = self.sprite_mut(id) else {
            return false;
        };
        s.x = x;
        s.y = y;
        s.width = width;
        s.height = height;
        true
    }

    pub fn update_sprite_snap_to_grid(&mut self, id: SpriteId, snap: bool) -> bool {
        let Some(s) = self.sprite_mut(id) else {
            return false;
        };
        s.snap_to_grid = snap;
        true
    }

    pub fn set_sprite_locked(&mut self, id: SpriteId, locked: bool) -> bool {
        let Some(s) = self.sprite_mut(id) else {
            return false;
        };
        s.locked = locked;
        true
    }

    /// Resize to a whole number of grid cells. Zero counts are treated as 1.
    pub fn resize_sprite_to_grid(&mut self, id: SpriteId, cols: u32, rows: u32) -> bool {
        let cs = self.grid.cell_size;
        self.update_sprite_size(id, f64::from(cols.max(1)) * cs, f64::from(rows.max(1)) * cs)
    }

    /// Copy a sprite with a fresh id, offset by `(dx, dy)`, and select it.
    ///
    /// # Errors
    ///
    /// [`SceneError::NotFound`] if `id` is unknown.
    pub fn duplicate_sprite(&mut self, id: SpriteId, dx: f64, dy: f64) -> Result<Sprite, SceneError> {
        let source = self.sprite(id).ok_or_else(|| SceneError::not_found(EntityKind::Sprite, id))?;
        let copy = Sprite { id: Uuid::new_v4(), x: source.x + dx, y: source.y + dy, ..source.clone() };
        debug!(source_id = %id, sprite_id = %copy.id, "sprite duplicated");
        self.sprites.push(copy.clone());
        self.select_sprite(Some(copy.id));
        Ok(copy)
    }

    /// # Errors
    ///
    /// [`SceneError::NotFound`] if `id` is unknown.
    pub fn delete_sprite(&mut self, id: SpriteId) -> Result<Sprite, SceneError> {
        let index = self
            .sprites
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| SceneError::not_found(EntityKind::Sprite, id))?;
        let removed = self.sprites.remove(index);
        if self.selected_sprite == Some(id) {
            self.selected_sprite = None;
        }
        debug!(sprite_id = %id, "sprite deleted");
        Ok(removed)
    }

    // ── Map calibration ─────────────────────────────────────────

    pub fn nudge_sprite(&mut self, id: SpriteId, dx: f64, dy: f64) -> bool {
        let Some(s) = self.sprite_mut(id) else {
            return false;
        };
        s.x += dx;
        s.y += dy;
        true
    }

    /// Set the size to `percent` of the asset's natural size on `axis`.
    pub fn scale_sprite_to_asset(&mut self, id: SpriteId, percent: f64, axis: ScaleAxis) -> bool {
        if !percent.is_finite() || percent <= 0.0 {
            return false;
        }
        let Some((natural_w, natural_h)) = self.natural_size(id) else {
            return false;
        };
        let factor = percent / 100.0;
        let Some(s) = self.sprite_mut(id) else {
            return false;
        };
        if matches!(axis, ScaleAxis::Width | ScaleAxis::Both) {
            s.width = natural_w * factor;
        }
        if matches!(axis, ScaleAxis::Height | ScaleAxis::Both) {
            s.height = natural_h * factor;
        }
        true
    }

    /// Move to the origin at natural size, keeping rotation.
    pub fn reset_sprite_transform(&mut self, id: SpriteId) -> bool {
        let Some((natural_w, natural_h)) = self.natural_size(id) else {
            return false;
        };
        let Some(s) = self.sprite_mut(id) else {
            return false;
        };
        s.x = 0.0;
        s.y = 0.0;
        s.width = natural_w;
        s.height = natural_h;
        true
    }

    /// Round width and height to the nearest whole number of cells (at least one).
    pub fn fit_sprite_to_grid(&mut self, id: SpriteId) -> bool {
        let cs = self.grid.cell_size;
        let Some(s) = self.sprite_mut(id) else {
            return false;
        };
        s.width = (s.width / cs).round().max(1.0) * cs;
        s.height = (s.height / cs).round().max(1.0) * cs;
        true
    }

    fn natural_size(&self, id: SpriteId) -> Option<(f64, f64)> {
        let sprite = self.sprite(id)?;
        let asset = self.asset(sprite.asset_id)?;
        Some((asset.width, asset.height))
    }

    // ── Grid ────────────────────────────────────────────────────

    #[must_use]
    pub fn grid(&self) -> &GridSettings {
        &self.grid
    }

    pub fn update_grid_settings(&mut self, patch: &GridSettingsPatch) -> bool {
        self.grid.apply(patch)
    }

    // ── Terrain ─────────────────────────────────────────────────

    #[must_use]
    pub fn terrain(&self) -> &TerrainGrid {
        &self.terrain
    }

    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<&TerrainCell> {
        self.terrain.get(coord)
    }

    pub fn set_cell(&mut self, coord: CellCoord, cell: TerrainCell) {
        self.terrain.set(coord, cell);
    }

    pub fn clear_cell(&mut self, coord: CellCoord) -> bool {
        self.terrain.clear_cell(coord)
    }

    pub fn clear_terrain(&mut self) {
        debug!(cells = self.terrain.len(), "terrain cleared");
        self.terrain.clear_all();
    }

    /// Apply the brush centered on `center`; returns the touched cells.
    pub fn paint_area(&mut self, center: CellCoord, brush: &TerrainBrush) -> Vec<CellCoord> {
        self.terrain.paint_area(center, brush)
    }

    #[must_use]
    pub fn show_terrain(&self) -> bool {
        self.show_terrain
    }

    pub fn set_show_terrain(&mut self, show: bool) {
        self.show_terrain = show;
    }

    /// Flip terrain visibility and return the new value.
    pub fn toggle_show_terrain(&mut self) -> bool {
        self.show_terrain = !self.show_terrain;
        self.show_terrain
    }

    // ── Walls ───────────────────────────────────────────────────

    /// Walls in insertion (draw) order.
    #[must_use]
    pub fn walls(&self) -> &[WallSegment] {
        &self.walls
    }

    #[must_use]
    pub fn wall(&self, id: WallId) -> Option<&WallSegment> {
        self.walls.iter().find(|w| w.id == id)
    }

    /// Add a wall between two corners.
    ///
    /// Zero-length walls are discarded (`None`). If a wall already joins the
    /// same pair of corners, in either direction, it is selected and returned
    /// as [`WallInsert::Existing`]. New walls are not auto-selected.
    pub fn add_wall(&mut self, p1: GridPoint, p2: GridPoint, defaults: &WallDefaults) -> Option<WallInsert> {
        if p1 == p2 {
            debug!(x = p1.x, y = p1.y, "discarding zero-length wall");
            return None;
        }
        let key = WallKey::new(p1, p2);
        if let Some(existing) = self.walls.iter().find(|w| w.key() == key) {
            let id = existing.id;
            debug!(wall_id = %id, %key, "wall already exists, selecting");
            self.select_wall(Some(id));
            return Some(WallInsert::Existing(id));
        }
        let wall = defaults.build(p1, p2);
        let id = wall.id;
        info!(wall_id = %id, %key, "wall created");
        self.walls.push(wall);
        Some(WallInsert::Created(id))
    }

    pub fn update_wall(&mut self, id: WallId, patch: &WallPatch) -> bool {
        self.walls.iter_mut().find(|w| w.id == id).is_some_and(|w| patch.apply(w))
    }

    /// # Errors
    ///
    /// [`SceneError::NotFound`] if `id` is unknown.
    pub fn delete_wall(&mut self, id: WallId) -> Result<WallSegment, SceneError> {
        let index = self
            .walls
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| SceneError::not_found(EntityKind::Wall, id))?;
        let removed = self.walls.remove(index);
        if self.selected_wall == Some(id) {
            self.selected_wall = None;
        }
        debug!(wall_id = %id, "wall deleted");
        Ok(removed)
    }

    #[must_use]
    pub fn selected_wall_id(&self) -> Option<WallId> {
        self.selected_wall
    }

    #[must_use]
    pub fn selected_wall(&self) -> Option<&WallSegment> {
        self.selected_wall.and_then(|id| self.wall(id))
    }

    /// Select a wall, or clear with `None`. Unknown ids clear the selection.
    pub fn select_wall(&mut self, id: Option<WallId>) {
        self.selected_wall = id.filter(|id| self.wall(*id).is_some());
        if self.selected_wall.is_some() {
            self.selected_sprite = None;
        }
    }

    /// Topmost wall whose centerline is within `tolerance` world units.
    #[must_use]
    pub fn wall_at(&self, world: Point, tolerance: f64) -> Option<WallId> {
        let cs = self.grid.cell_size;
        self.walls.iter().rev().find(|w| w.distance_to(world, cs) <= tolerance).map(|w| w.id)
    }

    // ── Lifecycle ───────────────────────────────────────────────

    /// Current scene generation; bumped by `clear` and snapshot loads.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Reset to an empty scene with default grid settings.
    pub fn clear(&mut self) {
        let epoch = self.epoch + 1;
        *self = Self { epoch, ..Self::new() };
        info!(epoch, "scene cleared");
    }
}

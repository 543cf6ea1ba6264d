//! Project snapshot: the flat, versioned JSON form of a scene.
//!
//! ERROR HANDLING
//! ==============
//! A snapshot is validated completely before the live scene is touched. Any
//! problem yields [`SceneError::InvalidFormat`] (or [`SceneError::Json`] for
//! text that is not JSON at all) and the previous scene stays active.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::asset::Asset;
use crate::consts::SNAPSHOT_VERSION;
use crate::error::SceneError;
use crate::grid::GridSettings;
use crate::scene::Scene;
use crate::sprite::Sprite;
use crate::terrain::TerrainGrid;
use crate::wall::WallSegment;

fn default_true() -> bool {
    true
}

/// Everything persisted for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: u32,
    #[serde(default)]
    pub grid_settings: GridSettings,
    pub assets: Vec<Asset>,
    pub sprites: Vec<Sprite>,
    #[serde(default)]
    pub terrain_grid: TerrainGrid,
    #[serde(default = "default_true")]
    pub show_terrain: bool,
    #[serde(default)]
    pub walls: Vec<WallSegment>,
}

impl Snapshot {
    /// Parse snapshot JSON text.
    ///
    /// `version`, `assets` and `sprites` must be present; `version` must be a
    /// positive integer. Other fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// [`SceneError::Json`] if the text is not JSON, otherwise
    /// [`SceneError::InvalidFormat`] describing the first problem found.
    pub fn from_json(text: &str) -> Result<Self, SceneError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let Some(object) = value.as_object() else {
            return Err(SceneError::InvalidFormat("snapshot is not a JSON object".into()));
        };
        for key in ["version", "assets", "sprites"] {
            if object.get(key).is_none_or(serde_json::Value::is_null) {
                return Err(SceneError::InvalidFormat(format!("missing `{key}`")));
            }
        }
        match object.get("version").and_then(serde_json::Value::as_u64) {
            Some(v) if v > 0 => {}
            _ => return Err(SceneError::InvalidFormat("`version` must be a positive integer".into())),
        }
        let snapshot: Self =
            serde_json::from_value(value).map_err(|e| SceneError::InvalidFormat(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Pretty-printed JSON text.
    ///
    /// # Errors
    ///
    /// [`SceneError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), SceneError> {
        if self.version == 0 {
            return Err(SceneError::InvalidFormat("`version` must be a positive integer".into()));
        }
        if self.version > SNAPSHOT_VERSION {
            warn!(version = self.version, supported = SNAPSHOT_VERSION, "loading snapshot from a newer version");
        }
        if !(self.grid_settings.cell_size.is_finite() && self.grid_settings.cell_size > 0.0) {
            return Err(SceneError::InvalidFormat("grid cell size must be positive".into()));
        }

        let mut asset_ids = HashSet::new();
        for asset in &self.assets {
            if !asset_ids.insert(asset.id) {
                return Err(SceneError::InvalidFormat(format!("duplicate asset id {}", asset.id)));
            }
            if !(asset.width > 0.0 && asset.height > 0.0) {
                return Err(SceneError::InvalidFormat(format!("asset {} has non-positive size", asset.id)));
            }
        }

        let mut sprite_ids = HashSet::new();
        for sprite in &self.sprites {
            if !sprite_ids.insert(sprite.id) {
                return Err(SceneError::InvalidFormat(format!("duplicate sprite id {}", sprite.id)));
            }
            if !(sprite.width > 0.0 && sprite.height > 0.0) {
                return Err(SceneError::InvalidFormat(format!("sprite {} has non-positive size", sprite.id)));
            }
            if !asset_ids.contains(&sprite.asset_id) {
                return Err(SceneError::InvalidFormat(format!(
                    "sprite {} references unknown asset {}",
                    sprite.id, sprite.asset_id
                )));
            }
        }

        let mut wall_ids = HashSet::new();
        for wall in &self.walls {
            if !wall_ids.insert(wall.id) {
                return Err(SceneError::InvalidFormat(format!("duplicate wall id {}", wall.id)));
            }
        }
        Ok(())
    }
}

impl Scene {
    /// Capture the persistent state of the scene. Selection is not saved.
    #[must_use]
    pub fn save_snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            grid_settings: self.grid.clone(),
            assets: self.assets.clone(),
            sprites: self.sprites.clone(),
            terrain_grid: self.terrain.clone(),
            show_terrain: self.show_terrain,
            walls: self.walls.clone(),
        }
    }

    /// Replace the whole scene with `snapshot`. Selection is reset.
    ///
    /// Zero-length walls and walls duplicating an earlier wall's endpoints
    /// are dropped.
    ///
    /// # Errors
    ///
    /// [`SceneError::InvalidFormat`] if the snapshot fails validation; the
    /// current scene is left untouched.
    pub fn load_snapshot(&mut self, snapshot: Snapshot) -> Result<(), SceneError> {
        snapshot.validate()?;

        let mut seen = HashSet::new();
        let total_walls = snapshot.walls.len();
        let walls: Vec<WallSegment> =
            snapshot.walls.into_iter().filter(|w| w.p1 != w.p2 && seen.insert(w.key())).collect();
        if walls.len() != total_walls {
            warn!(dropped = total_walls - walls.len(), "dropped degenerate or duplicate walls");
        }

        let epoch = self.epoch + 1;
        *self = Scene {
            assets: snapshot.assets,
            sprites: snapshot.sprites,
            terrain: snapshot.terrain_grid,
            walls,
            grid: snapshot.grid_settings,
            show_terrain: snapshot.show_terrain,
            selected_sprite: None,
            selected_wall: None,
            epoch,
        };
        info!(
            assets = self.assets.len(),
            sprites = self.sprites.len(),
            walls = self.walls.len(),
            terrain_cells = self.terrain.len(),
            "snapshot loaded"
        );
        Ok(())
    }

    /// Parse and load snapshot JSON text.
    ///
    /// # Errors
    ///
    /// See [`Snapshot::from_json`]. On error the current scene is kept.
    pub fn load_json(&mut self, text: &str) -> Result<(), SceneError> {
        let snapshot = Snapshot::from_json(text).inspect_err(|e| {
            warn!(error = %e, code = e.error_code(), "snapshot rejected");
        })?;
        self.load_snapshot(snapshot)
    }

    /// Serialize the scene as snapshot JSON text.
    ///
    /// # Errors
    ///
    /// [`SceneError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SceneError> {
        self.save_snapshot().to_json()
    }
}

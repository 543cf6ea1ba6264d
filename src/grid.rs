//! Grid settings: topology, line style, cell size and color.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_CELL_SIZE;

/// Grid topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GridType {
    #[default]
    #[serde(rename = "square")]
    Square,
    /// Hexes with a flat top edge.
    #[serde(rename = "hex-h")]
    HexH,
    /// Hexes with a pointy top vertex.
    #[serde(rename = "hex-v")]
    HexV,
    #[serde(rename = "isometric")]
    Isometric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dots,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridSettings {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub grid_type: GridType,
    pub line_style: LineStyle,
    /// Cell edge length in world units; also the snap quantum.
    pub cell_size: f64,
    /// CSS hex color, e.g. `#ffffff`.
    pub color: String,
    /// Stroke/fill alpha in `[0, 1]`.
    pub opacity: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            grid_type: GridType::Square,
            line_style: LineStyle::Solid,
            cell_size: DEFAULT_CELL_SIZE,
            color: "#ffffff".into(),
            opacity: 0.15,
        }
    }
}

/// Sparse update for grid settings. Only present fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub grid_type: Option<GridType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_style: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl GridSettings {
    /// Apply a patch. A non-positive or non-finite cell size is ignored and
    /// opacity is clamped to `[0, 1]`. Returns `true` if anything changed.
    pub fn apply(&mut self, patch: &GridSettingsPatch) -> bool {
        let before = self.clone();
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(grid_type) = patch.grid_type {
            self.grid_type = grid_type;
        }
        if let Some(line_style) = patch.line_style {
            self.line_style = line_style;
        }
        if let Some(cell_size) = patch.cell_size {
            if cell_size.is_finite() && cell_size > 0.0 {
                self.cell_size = cell_size;
            } else {
                tracing::warn!(cell_size, "ignoring invalid grid cell size");
            }
        }
        if let Some(ref color) = patch.color {
            self.color.clone_from(color);
        }
        if let Some(opacity) = patch.opacity.filter(|o| o.is_finite()) {
            self.opacity = opacity.clamp(0.0, 1.0);
        }
        *self != before
    }
}

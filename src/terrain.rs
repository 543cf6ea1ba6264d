//! Sparse elevation/terrain overlay and the brush that paints it.
//!
//! DESIGN
//! ======
//! Cells are keyed by integer grid coordinate. Absent cells are plain ground
//! at elevation 0, so the grid only ever stores what was painted. On disk the
//! key is the `"gx,gy"` string form; in memory it is a packed `CellCoord`.

#[cfg(test)]
#[path = "terrain_test.rs"]
mod terrain_test;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest brush size offered by the terrain tool.
pub const MAX_BRUSH_SIZE: u32 = 10;

/// Integer cell coordinate on the terrain grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for CellCoord {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once(',').ok_or_else(|| format!("cell key missing comma: {s}"))?;
        let x = x.trim().parse().map_err(|_| format!("bad cell x in {s}"))?;
        let y = y.trim().parse().map_err(|_| format!("bad cell y in {s}"))?;
        Ok(Self { x, y })
    }
}

impl Serialize for CellCoord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellCoord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainType {
    #[default]
    Normal,
    Water,
    Difficult,
    Hazard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TerrainCell {
    /// Height in feet; negative values are pits.
    pub elevation: i32,
    #[serde(rename = "type")]
    pub terrain_type: TerrainType,
}

/// Footprint of the terrain brush around its center cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushShape {
    #[default]
    Circle,
    /// Outline of a square.
    Square,
    /// Filled square.
    Rectangle,
}

impl BrushShape {
    /// Whether offset `(dx, dy)` from the center lies in a brush of radius `r`.
    #[must_use]
    pub fn contains(self, dx: i32, dy: i32, r: i32) -> bool {
        let (dx, dy, r) = (i64::from(dx), i64::from(dy), i64::from(r));
        match self {
            Self::Circle => dx * dx + dy * dy <= r * r,
            Self::Square => dx.abs() == r || dy.abs() == r,
            Self::Rectangle => true,
        }
    }
}

/// What a brush stroke writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "type")]
pub enum BrushKind {
    Paint(TerrainType),
    Eraser,
}

impl Default for BrushKind {
    fn default() -> Self {
        Self::Paint(TerrainType::Normal)
    }
}

/// Terrain tool parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainBrush {
    pub size: u32,
    pub elevation: i32,
    pub kind: BrushKind,
    pub shape: BrushShape,
}

impl Default for TerrainBrush {
    fn default() -> Self {
        Self { size: 1, elevation: 5, kind: BrushKind::default(), shape: BrushShape::Circle }
    }
}

impl TerrainBrush {
    /// Cells covered when the brush is centered on `center`.
    ///
    /// A size of 0 or 1 covers the center only; sizes above
    /// [`MAX_BRUSH_SIZE`] paint as the largest brush. Offsets that would
    /// leave the `i32` coordinate range are skipped.
    #[must_use]
    pub fn footprint(&self, center: CellCoord) -> Vec<CellCoord> {
        let size = self.size.min(MAX_BRUSH_SIZE);
        if size <= 1 {
            return vec![center];
        }
        let r = i32::try_from(size / 2).unwrap_or(0);
        let mut cells = Vec::new();
        for dy in -r..=r {
            for dx in -r..=r {
                if !self.shape.contains(dx, dy, r) {
                    continue;
                }
                if let (Some(x), Some(y)) = (center.x.checked_add(dx), center.y.checked_add(dy)) {
                    cells.push(CellCoord::new(x, y));
                }
            }
        }
        cells
    }
}

/// Sparse map from cell coordinate to terrain.
///
/// Serializes as a JSON object keyed `"gx,gy"`, ordered for stable output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerrainGrid {
    cells: HashMap<CellCoord, TerrainCell>,
}

impl TerrainGrid {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, coord: CellCoord) -> Option<&TerrainCell> {
        self.cells.get(&coord)
    }

    pub fn set(&mut self, coord: CellCoord, cell: TerrainCell) {
        self.cells.insert(coord, cell);
    }

    pub fn clear_cell(&mut self, coord: CellCoord) -> bool {
        self.cells.remove(&coord).is_some()
    }

    pub fn clear_all(&mut self) {
        self.cells.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CellCoord, &TerrainCell)> {
        self.cells.iter()
    }

    /// Apply `brush` centered on `center`. Returns the touched cells.
    ///
    /// Painting overwrites whatever was there; erasing removes the keys.
    pub fn paint_area(&mut self, center: CellCoord, brush: &TerrainBrush) -> Vec<CellCoord> {
        let cells = brush.footprint(center);
        for &coord in &cells {
            match brush.kind {
                BrushKind::Paint(terrain_type) => {
                    self.cells.insert(coord, TerrainCell { elevation: brush.elevation, terrain_type });
                }
                BrushKind::Eraser => {
                    self.cells.remove(&coord);
                }
            }
        }
        cells
    }
}

impl Serialize for TerrainGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let ordered: BTreeMap<&CellCoord, &TerrainCell> = self.cells.iter().collect();
        ordered.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TerrainGrid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let cells = HashMap::<CellCoord, TerrainCell>::deserialize(deserializer)?;
        Ok(Self { cells })
    }
}

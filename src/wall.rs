//! Wall segments between grid corners, with gameplay attributes.
//!
//! DESIGN
//! ======
//! Endpoints are integer grid corners. A wall is identified for duplicate
//! detection by its unordered endpoint pair, normalized so the smaller point
//! (by x, then y) comes first. The wall store itself lives in
//! [`crate::scene::Scene`]; this module holds the types and the pure rules.

#[cfg(test)]
#[path = "wall_test.rs"]
mod wall_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::geometry::distance_point_to_segment;

pub type WallId = Uuid;

/// A grid corner (not a cell center).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// World position of this corner.
    #[must_use]
    pub fn to_world(self, cell_size: f64) -> Point {
        Point::new(f64::from(self.x) * cell_size, f64::from(self.y) * cell_size)
    }
}

/// Normalized unordered endpoint pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WallKey {
    pub lo: GridPoint,
    pub hi: GridPoint,
}

impl WallKey {
    #[must_use]
    pub fn new(p1: GridPoint, p2: GridPoint) -> Self {
        // derived Ord on GridPoint compares x then y
        if p1 <= p2 { Self { lo: p1, hi: p2 } } else { Self { lo: p2, hi: p1 } }
    }
}

impl fmt::Display for WallKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}-{},{}", self.lo.x, self.lo.y, self.hi.x, self.hi.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Passage {
    Passable,
    Difficult,
    #[default]
    Impassable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Transparent,
    #[default]
    Opaque,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorState {
    Open,
    #[default]
    Closed,
    Locked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallSegment {
    pub id: WallId,
    pub p1: GridPoint,
    pub p2: GridPoint,
    /// Height in feet; determines cover.
    pub height: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hp: Option<i32>,
    #[serde(default)]
    pub passage: Passage,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_door: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub door_state: Option<DoorState>,
    #[serde(default)]
    pub indestructible: bool,
}

impl WallSegment {
    #[must_use]
    pub fn key(&self) -> WallKey {
        WallKey::new(self.p1, self.p2)
    }

    /// Door state to display; a door without an explicit state is closed.
    #[must_use]
    pub fn effective_door_state(&self) -> Option<DoorState> {
        self.is_door.then(|| self.door_state.unwrap_or_default())
    }

    /// Distance from a world point to this wall's centerline.
    #[must_use]
    pub fn distance_to(&self, world: Point, cell_size: f64) -> f64 {
        distance_point_to_segment(world, self.p1.to_world(cell_size), self.p2.to_world(cell_size))
    }
}

/// Attributes given to newly drawn walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WallDefaults {
    pub height: i32,
    pub passage: Passage,
    pub visibility: Visibility,
    pub is_door: bool,
    pub indestructible: bool,
}

impl Default for WallDefaults {
    fn default() -> Self {
        Self {
            height: 10,
            passage: Passage::Impassable,
            visibility: Visibility::Opaque,
            is_door: false,
            indestructible: false,
        }
    }
}

impl WallDefaults {
    #[must_use]
    pub fn build(&self, p1: GridPoint, p2: GridPoint) -> WallSegment {
        WallSegment {
            id: Uuid::new_v4(),
            p1,
            p2,
            height: self.height,
            hp: None,
            max_hp: None,
            passage: self.passage,
            visibility: self.visibility,
            is_door: self.is_door,
            door_state: self.is_door.then_some(DoorState::Closed),
            indestructible: self.indestructible,
        }
    }
}

/// Outcome of adding a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallInsert {
    Created(WallId),
    /// A wall already joined these corners; it was selected instead.
    Existing(WallId),
}

impl WallInsert {
    #[must_use]
    pub fn id(self) -> WallId {
        match self {
            Self::Created(id) | Self::Existing(id) => id,
        }
    }
}

/// Sparse edit of a wall's attributes. Endpoints are not editable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WallPatch {
    pub height: Option<i32>,
    pub hp: Option<i32>,
    pub max_hp: Option<i32>,
    pub passage: Option<Passage>,
    pub visibility: Option<Visibility>,
    pub is_door: Option<bool>,
    pub door_state: Option<DoorState>,
    pub indestructible: Option<bool>,
}

impl WallPatch {
    /// Apply to `wall`. Returns `true` if anything changed.
    ///
    /// HP fields are ignored while the wall (after this patch) is
    /// indestructible. Setting `hp` alone keeps the existing `max_hp`, or
    /// adopts `hp` when there is none. Turning a wall into a door closes it;
    /// turning a door back into a wall drops its state.
    pub fn apply(&self, wall: &mut WallSegment) -> bool {
        let before = wall.clone();

        if let Some(height) = self.height {
            wall.height = height.max(0);
        }
        if let Some(indestructible) = self.indestructible {
            wall.indestructible = indestructible;
        }
        if !wall.indestructible {
            if let Some(hp) = self.hp {
                let hp = hp.max(0);
                wall.hp = Some(hp);
                if self.max_hp.is_none() && wall.max_hp.is_none_or(|m| m == 0) {
                    wall.max_hp = Some(hp);
                }
            }
            if let Some(max_hp) = self.max_hp {
                wall.max_hp = Some(max_hp.max(0));
            }
        }
        if let Some(passage) = self.passage {
            wall.passage = passage;
        }
        if let Some(visibility) = self.visibility {
            wall.visibility = visibility;
        }
        if let Some(is_door) = self.is_door {
            wall.is_door = is_door;
            if is_door {
                wall.door_state.get_or_insert(DoorState::Closed);
            } else {
                wall.door_state = None;
            }
        }
        if let Some(door_state) = self.door_state.filter(|_| wall.is_door) {
            wall.door_state = Some(door_state);
        }

        *wall != before
    }
}

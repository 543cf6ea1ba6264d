//! Error types for scene operations and the image-decoding collaborator.
//!
//! ERROR HANDLING
//! ==============
//! Update-style operations that a live drag may issue against a sprite deleted
//! mid-gesture return `false` instead of an error. Explicit, user-initiated
//! operations (delete by id, duplicate, remove asset) surface `NotFound`.
//! Snapshot loads validate fully before touching the current scene, so an
//! `InvalidFormat` leaves the previous scene active.

use uuid::Uuid;

/// Which collection a missing id was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Asset,
    Sprite,
    Wall,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Asset => "asset",
            Self::Sprite => "sprite",
            Self::Wall => "wall",
        };
        f.write_str(name)
    }
}

/// Failure reported by an [`crate::asset::ImageDecoder`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("image data is empty")]
    Empty,
    #[error("unsupported image format")]
    UnsupportedFormat,
    #[error("corrupt image data: {0}")]
    Corrupt(String),
    #[error("image has zero width or height")]
    ZeroSize,
}

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: Uuid },
    #[error("invalid project file format: {0}")]
    InvalidFormat(String),
    #[error("image decode failed: {0}")]
    Decode(#[from] DecodeError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SceneError {
    #[must_use]
    pub fn not_found(kind: EntityKind, id: Uuid) -> Self {
        Self::NotFound { kind, id }
    }

    /// Stable machine-readable code for hosts that surface errors to users.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { kind: EntityKind::Asset, .. } => "E_ASSET_NOT_FOUND",
            Self::NotFound { kind: EntityKind::Sprite, .. } => "E_SPRITE_NOT_FOUND",
            Self::NotFound { kind: EntityKind::Wall, .. } => "E_WALL_NOT_FOUND",
            Self::InvalidFormat(_) | Self::Json(_) => "E_INVALID_FORMAT",
            Self::Decode(_) => "E_DECODE_FAILURE",
        }
    }
}

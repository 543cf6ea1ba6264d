//! Image assets and the decoding collaborator.
//!
//! An [`Asset`] is the immutable image record sprites point at. Hosts turn
//! raw file bytes into an asset through an [`ImageDecoder`]; the bundled
//! [`RasterDecoder`] sniffs the format with the `image` crate and embeds the
//! original bytes as a base64 data URL so snapshots stay self-contained.

#[cfg(test)]
#[path = "asset_test.rs"]
mod asset_test;

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DecodeError;

/// Unique identifier for an asset.
pub type AssetId = Uuid;

/// What an asset is used for; decides the layer of sprites placed from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// A battle-map background image.
    Map,
    /// A token, prop or other placeable object.
    #[default]
    Sprite,
}

/// An image available for placement, as stored in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    /// Self-contained image reference (a `data:` URL).
    #[serde(rename = "imageUrl")]
    pub image_ref: String,
    /// Natural pixel width.
    pub width: f64,
    /// Natural pixel height.
    pub height: f64,
    #[serde(rename = "type")]
    pub kind: AssetKind,
}

impl Asset {
    /// Build an asset from a decoded image under a fresh id.
    #[must_use]
    pub fn from_decoded(name: &str, decoded: DecodedImage, kind: AssetKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: display_name(name),
            image_ref: decoded.image_ref,
            width: f64::from(decoded.width),
            height: f64::from(decoded.height),
            kind,
        }
    }
}

/// Strip a trailing file extension from an imported file name.
#[must_use]
pub fn display_name(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.contains(['/', '\\']) => stem.to_string(),
        _ => file_name.to_string(),
    }
}

/// Result of decoding raw image bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Opaque reference the renderer can load (a `data:` URL for [`RasterDecoder`]).
    pub image_ref: String,
}

/// Capability that turns file bytes into image metadata.
pub trait ImageDecoder {
    /// Decode `bytes`, reporting natural dimensions and a loadable reference.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] for empty, unsupported or corrupt data.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError>;
}

/// Default decoder for PNG, JPEG and BMP data.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterDecoder;

impl ImageDecoder for RasterDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }
        let format = image::guess_format(bytes).map_err(|_| DecodeError::UnsupportedFormat)?;
        let img = image::load_from_memory_with_format(bytes, format).map_err(|e| match e {
            image::ImageError::Unsupported(_) => DecodeError::UnsupportedFormat,
            other => DecodeError::Corrupt(other.to_string()),
        })?;
        if img.width() == 0 || img.height() == 0 {
            return Err(DecodeError::ZeroSize);
        }
        Ok(DecodedImage { width: img.width(), height: img.height(), image_ref: data_url(format.to_mime_type(), bytes) })
    }
}

/// Encode bytes as a base64 `data:` URL.
#[must_use]
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", base64::engine::general_purpose::STANDARD.encode(bytes))
}

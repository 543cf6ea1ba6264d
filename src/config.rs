//! Editor configuration: tunables the host may override.
//!
//! Defaults match the interactive behavior hosts expect. Browser hosts
//! deserialize the config from JSON; native hosts read `BATTLEMAP_*`
//! environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::collections::HashMap;
use std::env::VarError;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::{DUPLICATE_OFFSET, GRID_EXTENT, MAX_ZOOM, MIN_ZOOM, ROTATE_STEP_DEG, WALL_HIT_TOLERANCE};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("zoom limits out of order: min {min} > max {max}")]
    ZoomRange { min: f64, max: f64 },
    #[error("config json: {0}")]
    Json(String),
}

/// Space in which the wall click tolerance is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToleranceSpace {
    /// Constant on screen: the world tolerance is divided by zoom.
    #[default]
    Screen,
    /// Constant in world units regardless of zoom.
    World,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Offset for duplicate and paste, in world units.
    pub duplicate_offset: f64,
    /// Keyboard rotation step in degrees.
    pub rotate_step_deg: f64,
    /// Wall click tolerance, measured in `wall_tolerance_space`.
    pub wall_hit_tolerance: f64,
    pub wall_tolerance_space: ToleranceSpace,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Half-extent of the rendered grid, in world units.
    pub grid_extent: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            duplicate_offset: DUPLICATE_OFFSET,
            rotate_step_deg: ROTATE_STEP_DEG,
            wall_hit_tolerance: WALL_HIT_TOLERANCE,
            wall_tolerance_space: ToleranceSpace::Screen,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            grid_extent: GRID_EXTENT,
        }
    }
}

impl EditorConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `BATTLEMAP_DUPLICATE_OFFSET`: default 30
    /// - `BATTLEMAP_ROTATE_STEP_DEG`: default 15
    /// - `BATTLEMAP_WALL_TOLERANCE`: default 10
    /// - `BATTLEMAP_WALL_TOLERANCE_SPACE`: `screen` (default) or `world`
    /// - `BATTLEMAP_MIN_ZOOM` / `BATTLEMAP_MAX_ZOOM`: default 0.1 / 5
    /// - `BATTLEMAP_GRID_EXTENT`: default 5000
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but unparseable or
    /// the resulting values are inconsistent.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut vars = HashMap::new();
        for key in ENV_KEYS {
            if let Some(value) = env_value(key, std::env::var(key))? {
                vars.insert(*key, value);
            }
        }
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// Build config from any key lookup (environment, query string, test map).
    ///
    /// # Errors
    ///
    /// See [`EditorConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            duplicate_offset: parse_f64(&lookup, "BATTLEMAP_DUPLICATE_OFFSET", defaults.duplicate_offset)?,
            rotate_step_deg: parse_f64(&lookup, "BATTLEMAP_ROTATE_STEP_DEG", defaults.rotate_step_deg)?,
            wall_hit_tolerance: parse_f64(&lookup, "BATTLEMAP_WALL_TOLERANCE", defaults.wall_hit_tolerance)?,
            wall_tolerance_space: parse_space(lookup("BATTLEMAP_WALL_TOLERANCE_SPACE").as_deref())?,
            min_zoom: parse_f64(&lookup, "BATTLEMAP_MIN_ZOOM", defaults.min_zoom)?,
            max_zoom: parse_f64(&lookup, "BATTLEMAP_MAX_ZOOM", defaults.max_zoom)?,
            grid_extent: parse_f64(&lookup, "BATTLEMAP_GRID_EXTENT", defaults.grid_extent)?,
        };
        config.validate()
    }

    /// Parse config from a JSON object; absent keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON and the usual
    /// validation errors otherwise.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.min_zoom <= 0.0 {
            return Err(ConfigError::InvalidValue { key: "min_zoom".into(), value: self.min_zoom.to_string() });
        }
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::ZoomRange { min: self.min_zoom, max: self.max_zoom });
        }
        if self.wall_hit_tolerance < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "wall_hit_tolerance".into(),
                value: self.wall_hit_tolerance.to_string(),
            });
        }
        if self.grid_extent <= 0.0 {
            return Err(ConfigError::InvalidValue { key: "grid_extent".into(), value: self.grid_extent.to_string() });
        }
        Ok(self)
    }

    /// Wall click tolerance in world units at the given zoom.
    #[must_use]
    pub fn wall_tolerance_world(&self, zoom: f64) -> f64 {
        match self.wall_tolerance_space {
            ToleranceSpace::Screen => self.wall_hit_tolerance / zoom,
            ToleranceSpace::World => self.wall_hit_tolerance,
        }
    }
}

const ENV_KEYS: &[&str] = &[
    "BATTLEMAP_DUPLICATE_OFFSET",
    "BATTLEMAP_ROTATE_STEP_DEG",
    "BATTLEMAP_WALL_TOLERANCE",
    "BATTLEMAP_WALL_TOLERANCE_SPACE",
    "BATTLEMAP_MIN_ZOOM",
    "BATTLEMAP_MAX_ZOOM",
    "BATTLEMAP_GRID_EXTENT",
];

/// An unset variable is `None`; one that is set but not unicode is an error.
fn env_value(key: &str, result: Result<String, VarError>) -> Result<Option<String>, ConfigError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => {
            let value = raw.to_string_lossy().into_owned();
            warn!(key, value = %value, "environment variable is not valid unicode");
            Err(ConfigError::InvalidValue { key: key.to_owned(), value })
        }
    }
}

fn parse_f64<F>(lookup: &F, key: &str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ConfigError::InvalidValue { key: key.to_string(), value: raw }),
    }
}

fn parse_space(raw: Option<&str>) -> Result<ToleranceSpace, ConfigError> {
    match raw.unwrap_or("screen") {
        "screen" => Ok(ToleranceSpace::Screen),
        "world" => Ok(ToleranceSpace::World),
        other => Err(ConfigError::InvalidValue {
            key: "BATTLEMAP_WALL_TOLERANCE_SPACE".into(),
            value: other.to_string(),
        }),
    }
}

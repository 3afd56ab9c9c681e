//! Candidate stall sites along the festival avenue
//!
//! Pre-surveyed positions an operator can pick by name instead of typing
//! coordinates. They are drawn on preview maps in a distinct style.

use serde::Serialize;

use crate::errors::{Result, StallError};
use crate::model::Coordinate;

/// A named candidate location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresetLocation {
    pub name: String,
    pub coordinate: Coordinate,
    pub description: String,
}

impl PresetLocation {
    /// Build a preset, validating its coordinate
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        description: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            coordinate: Coordinate::new(latitude, longitude)?,
            description: description.into(),
        })
    }
}

// (name, latitude, longitude, description)
const BUILTIN: &[(&str, f64, f64, &str)] = &[
    ("大通り北側・店舗1", 39.7034, 141.1434, "大通り北側・西端"),
    ("大通り北側・店舗3", 39.7034, 141.13555, "大通り北側・西寄り"),
    ("大通り北側・店舗5", 39.7034, 141.1437, "大通り北側・中央"),
    ("大通り北側・店舗7", 39.7034, 141.13885, "大通り北側・東寄り"),
    ("大通り北側・店舗9", 39.7034, 141.1440, "大通り北側・東端"),
    ("大通り南側・店舗2", 39.7032, 141.1434, "大通り南側・西端"),
    ("大通り南側・店舗4", 39.7032, 141.13555, "大通り南側・西寄り"),
    ("大通り南側・店舗6", 39.7032, 141.1437, "大通り南側・中央"),
    ("大通り南側・店舗8", 39.7032, 141.13885, "大通り南側・東寄り"),
    ("大通り南側・店舗10", 39.7032, 141.1440, "大通り南側・東端"),
];

/// The built-in preset table, in survey order
pub fn builtin_presets() -> Vec<PresetLocation> {
    BUILTIN
        .iter()
        .filter_map(|(name, lat, lng, description)| {
            PresetLocation::new(*name, *lat, *lng, *description).ok()
        })
        .collect()
}

/// Names of all built-in presets
pub fn preset_names() -> Vec<&'static str> {
    BUILTIN.iter().map(|(name, ..)| *name).collect()
}

/// Look up a built-in preset by exact name
pub fn find_preset(name: &str) -> Result<PresetLocation> {
    builtin_presets()
        .into_iter()
        .find(|preset| preset.name == name)
        .ok_or_else(|| StallError::UnknownPreset {
            name: name.to_string(),
        })
}

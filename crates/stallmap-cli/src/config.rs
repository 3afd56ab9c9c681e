//! Layered settings: built-in defaults, then a TOML file, then `STALLMAP_*`
//! environment variables (`__` separates nesting, e.g. `STALLMAP_MAP__ZOOM`).

use ::config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use stallmap_core::catalog::DEFAULT_CURRENCY_UNIT;
use stallmap_core::logging_facility::Profile;
use stallmap_core::model::Coordinate;
use stallmap_core::render::{
    MapMode, MapOptions, MapView, VenueMarker, DEFAULT_EMPTY_PRODUCTS_TEXT, DEFAULT_PRODUCTS_HEADING,
};
use stallmap_core::InvalidCoordinate;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "stallmap.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub map: MapSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub path: PathBuf,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".stallmap/stalls.db"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub zoom: u8,
    pub preview_zoom: u8,
    pub currency_unit: String,
    pub visitor_output: PathBuf,
    pub preview_output: PathBuf,
    pub venue_title: String,
    pub venue_hint: String,
    pub products_heading: String,
    pub empty_products_text: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center_latitude: 39.703483,
            center_longitude: 141.144167,
            zoom: 19,
            preview_zoom: 17,
            currency_unit: DEFAULT_CURRENCY_UNIT.to_string(),
            visitor_output: PathBuf::from("festival_visitor_map.html"),
            preview_output: PathBuf::from("festival_preview_map.html"),
            venue_title: "Festival grounds".to_string(),
            venue_hint: "Click a stall marker to see its menu".to_string(),
            products_heading: DEFAULT_PRODUCTS_HEADING.to_string(),
            empty_products_text: DEFAULT_EMPTY_PRODUCTS_TEXT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub profile: String,
    /// Overrides the profile's default filter; `RUST_LOG` still wins
    pub filter: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            profile: "development".to_string(),
            filter: None,
        }
    }
}

impl Settings {
    /// Load settings from `config_file` (or the optional default file) and the environment
    ///
    /// # Errors
    /// Returns an error if an explicit file is missing or any source is malformed.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match config_file {
            Some(path) => File::new(&path.to_string_lossy(), FileFormat::Toml).required(true),
            None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("STALLMAP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn logging_profile(&self) -> Result<Profile, String> {
        self.logging.profile.parse()
    }

    /// Map viewport for the given mode
    ///
    /// # Errors
    /// Returns an error if the configured center is out of range.
    pub fn map_view(&self, mode: MapMode) -> Result<MapView, InvalidCoordinate> {
        let zoom = match mode {
            MapMode::Visitor => self.map.zoom,
            MapMode::Preview => self.map.preview_zoom,
        };
        Ok(MapView {
            center: Coordinate::new(self.map.center_latitude, self.map.center_longitude)?,
            zoom,
        })
    }

    /// Render options for the given mode; visitor maps carry the venue marker
    ///
    /// # Errors
    /// Returns an error if the configured center is out of range.
    pub fn map_options(&self, mode: MapMode) -> Result<MapOptions, InvalidCoordinate> {
        let view = self.map_view(mode)?;
        let title = match mode {
            MapMode::Visitor => self.map.venue_title.clone(),
            MapMode::Preview => format!("{} (preview)", self.map.venue_title),
        };

        let mut options = MapOptions::new(view, title)
            .with_mode(mode)
            .with_product_labels(&self.map.products_heading, &self.map.empty_products_text);
        if mode == MapMode::Visitor {
            options = options.with_venue(VenueMarker {
                coordinate: view.center,
                title: self.map.venue_title.clone(),
                hint: self.map.venue_hint.clone(),
            });
        }
        Ok(options)
    }

    pub fn default_output(&self, mode: MapMode) -> &Path {
        match mode {
            MapMode::Visitor => &self.map.visitor_output,
            MapMode::Preview => &self.map.preview_output,
        }
    }
}

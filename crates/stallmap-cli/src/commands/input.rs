//! Shared argument groups for coordinates and product lists

use anyhow::{bail, Context as _};
use clap::Args;
use stallmap_core::catalog::parse_products_from_text;
use stallmap_core::model::{Coordinate, ProductDraft};
use stallmap_core::presets::find_preset;
use std::path::PathBuf;

/// Where a stall goes: explicit numbers, an exchange pair, or a preset name
#[derive(Debug, Args)]
pub struct CoordinateArgs {
    /// Latitude in degrees
    #[arg(long, allow_negative_numbers = true, requires = "lng")]
    pub lat: Option<f64>,

    /// Longitude in degrees
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lng: Option<f64>,

    /// Coordinate pair as "lat,lng" (the format copied from map pages)
    #[arg(long, value_name = "LAT,LNG", conflicts_with_all = ["lat", "lng", "preset"])]
    pub coords: Option<String>,

    /// Name of a candidate site (see `stallmap presets`)
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub preset: Option<String>,
}

impl CoordinateArgs {
    /// Raw latitude/longitude; range checks happen in the store
    pub fn resolve(&self) -> anyhow::Result<(f64, f64)> {
        if let (Some(lat), Some(lng)) = (self.lat, self.lng) {
            return Ok((lat, lng));
        }
        if let Some(pair) = &self.coords {
            let coordinate = Coordinate::parse_pair(pair)?;
            return Ok((coordinate.latitude(), coordinate.longitude()));
        }
        if let Some(name) = &self.preset {
            let preset = find_preset(name)?;
            return Ok((preset.coordinate.latitude(), preset.coordinate.longitude()));
        }
        bail!("a position is required: use --lat/--lng, --coords or --preset")
    }
}

/// Product lines given inline or from a text file
#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Product as "name:price" (repeatable)
    #[arg(long = "product", value_name = "NAME:PRICE")]
    pub products: Vec<String>,

    /// Text file with one "name:price" per line; malformed lines are skipped
    #[arg(long, value_name = "FILE", conflicts_with = "products")]
    pub products_file: Option<PathBuf>,
}

impl ProductArgs {
    /// Parsed product list, or `None` when no product option was given
    ///
    /// Inline `--product` values must each parse; the file form is lenient.
    pub fn resolve(&self, currency_unit: &str) -> anyhow::Result<Option<Vec<ProductDraft>>> {
        if let Some(path) = &self.products_file {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            return Ok(Some(parse_products_from_text(&text, currency_unit)));
        }

        if self.products.is_empty() {
            return Ok(None);
        }

        let mut drafts = Vec::with_capacity(self.products.len());
        for value in &self.products {
            let mut parsed = parse_products_from_text(value, currency_unit);
            match (parsed.pop(), parsed.is_empty()) {
                (Some(draft), true) => drafts.push(draft),
                _ => bail!("invalid product '{}': expected NAME:PRICE", value),
            }
        }
        Ok(Some(drafts))
    }
}

//! Input validation for every write path
//!
//! The coordinate validator is a pure range check. The remaining helpers
//! validate the write-side drafts before anything reaches storage.

use crate::errors::{Axis, InvalidCoordinate, Result, StallError};
use crate::model::{Coordinate, ProductDraft, StallDraft, StallUpdate};

/// Validate a latitude/longitude pair
///
/// Fails when `lat` is outside [-90, 90] or `lng` outside [-180, 180].
/// NaN is never in range.
pub fn validate(lat: f64, lng: f64) -> std::result::Result<(), InvalidCoordinate> {
    check_axis(Axis::Latitude, lat)?;
    check_axis(Axis::Longitude, lng)
}

fn check_axis(axis: Axis, value: f64) -> std::result::Result<(), InvalidCoordinate> {
    let (min, max) = axis.bounds();
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(InvalidCoordinate {
            axis,
            value,
            min,
            max,
        })
    }
}

/// Validate a stall name (non-empty after trimming)
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(StallError::InvalidName {
            reason: "Name cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Validate each product line: non-empty name, non-negative price
pub fn validate_products(products: &[ProductDraft]) -> Result<()> {
    for (index, product) in products.iter().enumerate() {
        if product.name.trim().is_empty() {
            return Err(StallError::InvalidProduct {
                index,
                reason: "Product name cannot be empty".to_string(),
            });
        }
        if product.price < 0 {
            return Err(StallError::InvalidProduct {
                index,
                reason: format!("Price cannot be negative (got {})", product.price),
            });
        }
    }
    Ok(())
}

/// Validate a registration draft and return its checked coordinate
///
/// Registration additionally requires at least one product.
pub fn validate_draft(draft: &StallDraft) -> Result<Coordinate> {
    validate_name(&draft.name)?;
    let coordinate = Coordinate::new(draft.latitude, draft.longitude)?;
    if draft.products.is_empty() {
        return Err(StallError::EmptyProductList);
    }
    validate_products(&draft.products)?;
    Ok(coordinate)
}

/// Validate a full scalar update and return its checked coordinate
pub fn validate_update(update: &StallUpdate) -> Result<Coordinate> {
    validate_name(&update.name)?;
    Ok(Coordinate::new(update.latitude, update.longitude)?)
}

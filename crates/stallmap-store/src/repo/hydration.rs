//! Hydration layer - builds domain models from SQLite rows
//!
//! Stalls come back in id order, and each stall's products in id order.

use crate::errors::{from_rusqlite, Result};
use rusqlite::{Connection, OptionalExtension, Row};
use stallmap_core::errors::ExError;
use stallmap_core::model::{Coordinate, Product, ProductId, Stall, StallId};
use std::collections::BTreeMap;

struct StallRow {
    id: i64,
    name: String,
    latitude: f64,
    longitude: f64,
    description: Option<String>,
}

fn stall_row(row: &Row<'_>) -> rusqlite::Result<StallRow> {
    Ok(StallRow {
        id: row.get(0)?,
        name: row.get(1)?,
        latitude: row.get(2)?,
        longitude: row.get(3)?,
        description: row.get(4)?,
    })
}

fn product_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: ProductId(row.get(0)?),
        stall_id: StallId(row.get(1)?),
        name: row.get(2)?,
        price: row.get(3)?,
    })
}

fn into_stall(row: StallRow, products: Vec<Product>) -> Result<Stall> {
    let coordinate = Coordinate::new(row.latitude, row.longitude).map_err(|err| {
        ExError::from(err)
            .with_op("hydrate_stall")
            .with_stall_id(row.id)
    })?;

    Ok(Stall {
        id: StallId(row.id),
        name: row.name,
        coordinate,
        description: row.description,
        products,
    })
}

/// Load every stall with its products nested
pub fn load_all_stalls(conn: &Connection) -> Result<Vec<Stall>> {
    let mut stmt = conn
        .prepare("SELECT id, name, latitude, longitude, description FROM stalls ORDER BY id")
        .map_err(from_rusqlite)?;
    let rows = stmt
        .query_map([], stall_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    let mut stmt = conn
        .prepare("SELECT id, stall_id, product_name, price FROM products ORDER BY stall_id, id")
        .map_err(from_rusqlite)?;
    let mut by_stall: BTreeMap<i64, Vec<Product>> = BTreeMap::new();
    for product in stmt.query_map([], product_row).map_err(from_rusqlite)? {
        let product = product.map_err(from_rusqlite)?;
        by_stall.entry(product.stall_id.get()).or_default().push(product);
    }

    rows.into_iter()
        .map(|row| {
            let products = by_stall.remove(&row.id).unwrap_or_default();
            into_stall(row, products)
        })
        .collect()
}

/// Load a single stall, or `None` when the id is unknown
pub fn load_stall(conn: &Connection, stall_id: StallId) -> Result<Option<Stall>> {
    let row = conn
        .query_row(
            "SELECT id, name, latitude, longitude, description FROM stalls WHERE id = ?",
            [stall_id.get()],
            stall_row,
        )
        .optional()
        .map_err(from_rusqlite)?;

    let Some(row) = row else {
        return Ok(None);
    };

    let products = load_products(conn, stall_id)?;
    into_stall(row, products).map(Some)
}

/// Load the products of one stall in insertion order
pub fn load_products(conn: &Connection, stall_id: StallId) -> Result<Vec<Product>> {
    let mut stmt = conn
        .prepare("SELECT id, stall_id, product_name, price FROM products WHERE stall_id = ? ORDER BY id")
        .map_err(from_rusqlite)?;
    let products = stmt
        .query_map([stall_id.get()], product_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(products)
}

//! SQLite repository for stalls and products
//!
//! `StallRepo` owns its connection. Every write takes `&mut self`, so two
//! writes can never be in flight through the same handle, and every
//! multi-row write runs in one transaction.

use crate::db;
use crate::errors::{from_rusqlite, stall_not_found, Result};
use crate::migrations::apply_migrations;
use crate::repo::hydration;
use rusqlite::{Connection, Transaction};
use stallmap_core::errors::{ExError, StallError};
use stallmap_core::model::{ProductDraft, Stall, StallDraft, StallId, StallUpdate};
use stallmap_core::rules::validation;
use std::path::Path;

/// Repository over a single SQLite connection
pub struct StallRepo {
    conn: Connection,
}

fn invalid(op: &str, err: StallError) -> ExError {
    ExError::from(err).with_op(op.to_string())
}

impl StallRepo {
    /// Wrap an open connection, enabling foreign keys and migrating the schema
    pub fn new(mut conn: Connection) -> Result<Self> {
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    /// Open (creating if needed) the database file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(db::open(path)?)
    }

    /// Fresh private in-memory store
    pub fn open_in_memory() -> Result<Self> {
        Self::new(db::open_in_memory()?)
    }

    /// Borrow the underlying connection for read-only inspection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    // ===== Writes =====

    /// Register a new stall with its products
    ///
    /// Validates the name, the coordinate, a non-empty product list and every
    /// product before anything is written. Stall and products are inserted in
    /// one transaction.
    ///
    /// # Errors
    /// * `Validation` - If any part of the draft is invalid
    /// * `Storage` - If the insert fails
    pub fn create_stall(&mut self, draft: &StallDraft) -> Result<StallId> {
        validation::validate_draft(draft).map_err(|e| invalid("create_stall", e))?;

        let tx = self.conn.transaction().map_err(from_rusqlite)?;
        let stall_id = insert_stall(&tx, draft)?;
        tx.commit().map_err(from_rusqlite)?;

        tracing::debug!(
            op = "create_stall",
            stall_id = stall_id.get(),
            product_count = draft.products.len(),
            "stall inserted"
        );
        Ok(stall_id)
    }

    /// Register several stalls in one transaction: all are inserted or none
    ///
    /// # Errors
    /// * `Validation` - If any draft is invalid (field names the draft index)
    /// * `Storage` - If an insert fails
    pub fn create_stalls(&mut self, drafts: &[StallDraft]) -> Result<Vec<StallId>> {
        for (index, draft) in drafts.iter().enumerate() {
            validation::validate_draft(draft).map_err(|e| {
                let err = invalid("create_stalls", e);
                let field = match err.field() {
                    Some(field) => format!("stalls[{}].{}", index, field),
                    None => format!("stalls[{}]", index),
                };
                err.with_field(field)
            })?;
        }

        let tx = self.conn.transaction().map_err(from_rusqlite)?;
        let mut ids = Vec::with_capacity(drafts.len());
        for draft in drafts {
            ids.push(insert_stall(&tx, draft)?);
        }
        tx.commit().map_err(from_rusqlite)?;

        Ok(ids)
    }

    /// Move a stall; other fields and products are untouched
    ///
    /// # Errors
    /// * `Validation` - If the coordinate is out of range (nothing is written)
    /// * `NotFound` - If the stall does not exist
    pub fn update_stall_coordinates(
        &mut self,
        stall_id: StallId,
        latitude: f64,
        longitude: f64,
    ) -> Result<()> {
        let op = "update_stall_coordinates";
        validation::validate(latitude, longitude)
            .map_err(|e| invalid(op, e.into()).with_stall_id(stall_id.get()))?;

        let changed = self
            .conn
            .execute(
                "UPDATE stalls SET latitude = ?1, longitude = ?2 WHERE id = ?3",
                rusqlite::params![latitude, longitude, stall_id.get()],
            )
            .map_err(from_rusqlite)?;

        if changed == 0 {
            return Err(stall_not_found(op, stall_id.get()));
        }
        Ok(())
    }

    /// Replace the scalar fields of a stall; products are untouched
    ///
    /// # Errors
    /// * `Validation` - If the name or coordinate is invalid
    /// * `NotFound` - If the stall does not exist
    pub fn update_stall(&mut self, stall_id: StallId, update: &StallUpdate) -> Result<()> {
        let op = "update_stall";
        validation::validate_update(update)
            .map_err(|e| invalid(op, e).with_stall_id(stall_id.get()))?;

        if update_scalars(&self.conn, stall_id, update)? == 0 {
            return Err(stall_not_found(op, stall_id.get()));
        }
        Ok(())
    }

    /// Swap the product list of a stall in one transaction
    ///
    /// An empty list clears the stall's products.
    ///
    /// # Errors
    /// * `Validation` - If any product is invalid (nothing is written)
    /// * `NotFound` - If the stall does not exist
    pub fn replace_products(&mut self, stall_id: StallId, products: &[ProductDraft]) -> Result<()> {
        let op = "replace_products";
        validation::validate_products(products)
            .map_err(|e| invalid(op, e).with_stall_id(stall_id.get()))?;

        let tx = self.conn.transaction().map_err(from_rusqlite)?;
        if !exists(&tx, stall_id)? {
            return Err(stall_not_found(op, stall_id.get()));
        }
        replace_products_tx(&tx, stall_id, products)?;
        tx.commit().map_err(from_rusqlite)?;
        Ok(())
    }

    /// Scalar update plus product replacement as one transaction
    ///
    /// # Errors
    /// * `Validation` - If the update or any product is invalid
    /// * `NotFound` - If the stall does not exist
    pub fn update_stall_with_products(
        &mut self,
        stall_id: StallId,
        update: &StallUpdate,
        products: &[ProductDraft],
    ) -> Result<()> {
        let op = "update_stall_with_products";
        validation::validate_update(update)
            .and_then(|_| validation::validate_products(products))
            .map_err(|e| invalid(op, e).with_stall_id(stall_id.get()))?;

        let tx = self.conn.transaction().map_err(from_rusqlite)?;
        if update_scalars(&tx, stall_id, update)? == 0 {
            return Err(stall_not_found(op, stall_id.get()));
        }
        replace_products_tx(&tx, stall_id, products)?;
        tx.commit().map_err(from_rusqlite)?;
        Ok(())
    }

    /// Remove a stall and its products
    ///
    /// Unknown ids are a no-op. Returns whether a stall was removed.
    pub fn delete_stall(&mut self, stall_id: StallId) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM stalls WHERE id = ?", [stall_id.get()])
            .map_err(from_rusqlite)?;
        Ok(removed > 0)
    }

    /// Remove every stall (products follow); returns how many were removed
    pub fn delete_all_stalls(&mut self) -> Result<usize> {
        self.conn
            .execute("DELETE FROM stalls", [])
            .map_err(from_rusqlite)
    }

    // ===== Reads =====

    /// Every stall with nested products, in registration order
    pub fn get_all_stalls(&self) -> Result<Vec<Stall>> {
        hydration::load_all_stalls(&self.conn)
    }

    /// A stall by id, or `None`
    pub fn find_stall(&self, stall_id: StallId) -> Result<Option<Stall>> {
        hydration::load_stall(&self.conn, stall_id)
    }

    /// A stall by id
    ///
    /// # Errors
    /// * `NotFound` - If the stall does not exist
    pub fn get_stall_by_id(&self, stall_id: StallId) -> Result<Stall> {
        self.find_stall(stall_id)?
            .ok_or_else(|| stall_not_found("get_stall_by_id", stall_id.get()))
    }

    pub fn stall_exists(&self, stall_id: StallId) -> Result<bool> {
        exists(&self.conn, stall_id)
    }

    pub fn count_stalls(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM stalls", [], |row| row.get(0))
            .map_err(from_rusqlite)?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

fn exists(conn: &Connection, stall_id: StallId) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM stalls WHERE id = ?)",
        [stall_id.get()],
        |row| row.get(0),
    )
    .map_err(from_rusqlite)
}

fn insert_stall(tx: &Transaction<'_>, draft: &StallDraft) -> Result<StallId> {
    tx.execute(
        "INSERT INTO stalls (name, latitude, longitude, description) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![
            draft.name,
            draft.latitude,
            draft.longitude,
            draft.description
        ],
    )
    .map_err(from_rusqlite)?;

    let stall_id = StallId(tx.last_insert_rowid());
    insert_products(tx, stall_id, &draft.products)?;
    Ok(stall_id)
}

fn insert_products(tx: &Transaction<'_>, stall_id: StallId, products: &[ProductDraft]) -> Result<()> {
    let mut stmt = tx
        .prepare("INSERT INTO products (stall_id, product_name, price) VALUES (?1, ?2, ?3)")
        .map_err(from_rusqlite)?;
    for product in products {
        stmt.execute(rusqlite::params![stall_id.get(), product.name, product.price])
            .map_err(from_rusqlite)?;
    }
    Ok(())
}

fn replace_products_tx(
    tx: &Transaction<'_>,
    stall_id: StallId,
    products: &[ProductDraft],
) -> Result<()> {
    tx.execute("DELETE FROM products WHERE stall_id = ?", [stall_id.get()])
        .map_err(from_rusqlite)?;
    insert_products(tx, stall_id, products)
}

fn update_scalars(conn: &Connection, stall_id: StallId, update: &StallUpdate) -> Result<usize> {
    conn.execute(
        "UPDATE stalls SET name = ?1, latitude = ?2, longitude = ?3, description = ?4 WHERE id = ?5",
        rusqlite::params![
            update.name,
            update.latitude,
            update.longitude,
            update.description,
            stall_id.get()
        ],
    )
    .map_err(from_rusqlite)
}

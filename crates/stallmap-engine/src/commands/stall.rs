//! Stall lifecycle commands with boundary logging.
//!
//! Register, move, edit, re-menu and remove stalls, plus the read-side
//! display listing used by the CLI and the map publisher.

use stallmap_core::catalog::{to_display_records, DisplayStall};
use stallmap_core::model::{Coordinate, ProductDraft, StallDraft, StallId, StallUpdate};
use stallmap_core::picker::PickOutcome;
use stallmap_core::{log_op_end, log_op_error, log_op_start};
use stallmap_store::errors::Result;
use stallmap_store::StallRepo;

/// Register a new stall with its products
///
/// ## Errors
///
/// - `Validation`: bad name, coordinate, empty product list or bad product
/// - `Storage`: database error
pub fn register_stall(repo: &mut StallRepo, draft: &StallDraft) -> Result<StallId> {
    let started = log_op_start!(
        "register_stall",
        name = draft.name.as_str(),
        product_count = draft.products.len()
    );

    let stall_id = repo.create_stall(draft).map_err(|e| {
        log_op_error!("register_stall", started, e.clone());
        e
    })?;

    log_op_end!("register_stall", started, stall = stall_id);

    Ok(stall_id)
}

/// Move a stall to a new coordinate
///
/// ## Errors
///
/// - `Validation`: coordinate out of range (the stall is unchanged)
/// - `NotFound`: unknown stall
pub fn move_stall(
    repo: &mut StallRepo,
    stall_id: StallId,
    latitude: f64,
    longitude: f64,
) -> Result<()> {
    let started = log_op_start!("move_stall", stall = stall_id);

    repo.update_stall_coordinates(stall_id, latitude, longitude)
        .map_err(|e| {
            log_op_error!("move_stall", started, e.clone(), stall = stall_id);
            e
        })?;

    log_op_end!("move_stall", started, stall = stall_id);

    Ok(())
}

/// Apply the answer of an interactive pick to a stall
///
/// A cancelled pick writes nothing and returns `None`.
///
/// ## Errors
///
/// - `NotFound`: unknown stall
pub fn apply_pick(
    repo: &mut StallRepo,
    stall_id: StallId,
    outcome: PickOutcome,
) -> Result<Option<Coordinate>> {
    match outcome {
        PickOutcome::Selected(coordinate) => {
            move_stall(
                repo,
                stall_id,
                coordinate.latitude(),
                coordinate.longitude(),
            )?;
            Ok(Some(coordinate))
        }
        PickOutcome::Cancelled => {
            tracing::debug!(op = "apply_pick", stall_id = stall_id.get(), "pick cancelled");
            Ok(None)
        }
    }
}

/// Edit a stall's scalar fields, and its menu when `products` is given
///
/// ## Errors
///
/// - `Validation`: bad name, coordinate or product
/// - `NotFound`: unknown stall
pub fn edit_stall(
    repo: &mut StallRepo,
    stall_id: StallId,
    update: &StallUpdate,
    products: Option<&[ProductDraft]>,
) -> Result<()> {
    let started = log_op_start!(
        "edit_stall",
        stall = stall_id,
        replaces_products = products.is_some()
    );

    let result = match products {
        Some(products) => repo.update_stall_with_products(stall_id, update, products),
        None => repo.update_stall(stall_id, update),
    };
    result.map_err(|e| {
        log_op_error!("edit_stall", started, e.clone(), stall = stall_id);
        e
    })?;

    log_op_end!("edit_stall", started, stall = stall_id);

    Ok(())
}

/// Replace the menu of a stall
///
/// ## Errors
///
/// - `Validation`: bad product line
/// - `NotFound`: unknown stall
pub fn set_products(
    repo: &mut StallRepo,
    stall_id: StallId,
    products: &[ProductDraft],
) -> Result<()> {
    let started = log_op_start!(
        "set_products",
        stall = stall_id,
        product_count = products.len()
    );

    repo.replace_products(stall_id, products).map_err(|e| {
        log_op_error!("set_products", started, e.clone(), stall = stall_id);
        e
    })?;

    log_op_end!("set_products", started, stall = stall_id);

    Ok(())
}

/// Remove a stall; returns whether anything was removed
pub fn remove_stall(repo: &mut StallRepo, stall_id: StallId) -> Result<bool> {
    let started = log_op_start!("remove_stall", stall = stall_id);

    let removed = repo.delete_stall(stall_id).map_err(|e| {
        log_op_error!("remove_stall", started, e.clone(), stall = stall_id);
        e
    })?;

    log_op_end!("remove_stall", started, stall = stall_id, removed = removed);

    Ok(removed)
}

/// Remove every stall; returns how many were removed
pub fn clear_stalls(repo: &mut StallRepo) -> Result<usize> {
    let started = log_op_start!("clear_stalls");

    let count = repo.delete_all_stalls().map_err(|e| {
        log_op_error!("clear_stalls", started, e.clone());
        e
    })?;

    log_op_end!("clear_stalls", started, stall_count = count);

    Ok(count)
}

/// All stalls as display records, in registration order
pub fn list_display_stalls(repo: &StallRepo, currency_unit: &str) -> Result<Vec<DisplayStall>> {
    let stalls = repo.get_all_stalls()?;
    tracing::debug!(op = "list_display_stalls", stall_count = stalls.len());
    Ok(to_display_records(&stalls, currency_unit))
}

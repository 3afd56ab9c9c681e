//! Engine-level write commands.
//!
//! `apply_engine_command` is the single entry point for every mutation of
//! the stall store.

use stallmap_core::model::{ProductDraft, StallDraft, StallId, StallUpdate};
use stallmap_store::errors::Result;
use stallmap_store::seed::SeedImport;
use stallmap_store::StallRepo;
use std::path::PathBuf;

use crate::commands::{seed, stall};

/// Write commands supported by the engine.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Register a new stall with its products.
    RegisterStall { draft: StallDraft },
    /// Move a stall.
    MoveStall {
        stall_id: StallId,
        latitude: f64,
        longitude: f64,
    },
    /// Replace scalar fields; replace the menu too when `products` is set.
    EditStall {
        stall_id: StallId,
        update: StallUpdate,
        products: Option<Vec<ProductDraft>>,
    },
    /// Replace the menu of a stall.
    SetProducts {
        stall_id: StallId,
        products: Vec<ProductDraft>,
    },
    /// Remove one stall (no-op for unknown ids).
    RemoveStall { stall_id: StallId },
    /// Remove every stall.
    ClearStalls,
    /// Import a seed file.
    ImportSeed { path: PathBuf },
}

/// Result of applying an engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommandResult {
    Registered(StallId),
    Updated(StallId),
    Removed { stall_id: StallId, removed: bool },
    Cleared { count: usize },
    SeedImported(SeedImport),
}

/// Apply an engine command against the repository.
pub fn apply_engine_command(cmd: EngineCommand, repo: &mut StallRepo) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::RegisterStall { draft } => {
            stall::register_stall(repo, &draft).map(EngineCommandResult::Registered)
        }
        EngineCommand::MoveStall {
            stall_id,
            latitude,
            longitude,
        } => {
            stall::move_stall(repo, stall_id, latitude, longitude)?;
            Ok(EngineCommandResult::Updated(stall_id))
        }
        EngineCommand::EditStall {
            stall_id,
            update,
            products,
        } => {
            stall::edit_stall(repo, stall_id, &update, products.as_deref())?;
            Ok(EngineCommandResult::Updated(stall_id))
        }
        EngineCommand::SetProducts { stall_id, products } => {
            stall::set_products(repo, stall_id, &products)?;
            Ok(EngineCommandResult::Updated(stall_id))
        }
        EngineCommand::RemoveStall { stall_id } => {
            let removed = stall::remove_stall(repo, stall_id)?;
            Ok(EngineCommandResult::Removed { stall_id, removed })
        }
        EngineCommand::ClearStalls => {
            stall::clear_stalls(repo).map(|count| EngineCommandResult::Cleared { count })
        }
        EngineCommand::ImportSeed { path } => {
            seed::seed_import(repo, &path).map(EngineCommandResult::SeedImported)
        }
    }
}

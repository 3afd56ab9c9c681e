//! Seed import with boundary logging.

use stallmap_core::{log_op_end, log_op_error, log_op_start};
use stallmap_store::errors::Result;
use stallmap_store::seed::{import_seed, SeedImport};
use stallmap_store::StallRepo;
use std::path::Path;

/// Import a seed file in one transaction
///
/// ## Errors
///
/// - `Io`: the file could not be read
/// - `Validation`: the seed or one of its stalls is invalid (nothing is written)
pub fn seed_import(repo: &mut StallRepo, path: &Path) -> Result<SeedImport> {
    let started = log_op_start!("seed_import", path = %path.display());

    let result = import_seed(path, repo).map_err(|e| {
        log_op_error!("seed_import", started, e.clone());
        e
    })?;

    log_op_end!(
        "seed_import",
        started,
        stall_count = result.stall_ids.len(),
        digest = result.digest.as_str()
    );

    Ok(result)
}

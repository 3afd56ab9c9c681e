//! Seed importer orchestration
//!
//! Parses and validates the whole seed before writing, then registers every
//! stall in a single transaction.

use crate::errors::Result;
use crate::repo::StallRepo;
use crate::seed::{compute_seed_digest, parse_seed_file, parse_seed_str, SeedV0};
use stallmap_core::model::StallId;
use std::path::Path;

/// Outcome of a successful import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedImport {
    pub digest: String,
    pub stall_ids: Vec<StallId>,
}

/// Import a seed file
///
/// Returns the seed digest and the ids assigned, in seed order. On any
/// failure nothing is written.
pub fn import_seed(path: &Path, repo: &mut StallRepo) -> Result<SeedImport> {
    let seed = parse_seed_file(path)?;
    import(&seed, repo)
}

/// Import a seed held in memory
pub fn import_seed_str(content: &str, repo: &mut StallRepo) -> Result<SeedImport> {
    let seed = parse_seed_str(content)?;
    import(&seed, repo)
}

fn import(seed: &SeedV0, repo: &mut StallRepo) -> Result<SeedImport> {
    let digest = compute_seed_digest(seed)?;
    let stall_ids = repo.create_stalls(&seed.drafts())?;

    tracing::debug!(
        op = "seed_import",
        stall_count = stall_ids.len(),
        digest = %digest,
        "seed imported"
    );

    Ok(SeedImport { digest, stall_ids })
}

//! Seed parser with validation
//!
//! Parses YAML and validates the schema version and every stall draft

use crate::errors::{io_error, seed_validation, Result};
use crate::seed::format_v0::SeedV0;
use stallmap_core::rules::validation::validate_draft;
use std::fs;
use std::path::Path;

/// Parse a seed file from a path
pub fn parse_seed_file(path: &Path) -> Result<SeedV0> {
    let content = fs::read_to_string(path).map_err(|e| io_error("seed_read", e))?;
    parse_seed_str(&content)
}

/// Parse a seed from a string
pub fn parse_seed_str(content: &str) -> Result<SeedV0> {
    let seed: SeedV0 = serde_yaml::from_str(content)
        .map_err(|e| seed_validation(&format!("YAML parse error: {}", e)))?;

    validate_seed(&seed)?;

    Ok(seed)
}

fn validate_seed(seed: &SeedV0) -> Result<()> {
    if seed.schema_version != 0 {
        return Err(seed_validation(&format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    for (index, stall) in seed.stalls.iter().enumerate() {
        validate_draft(&stall.to_draft()).map_err(|e| {
            seed_validation(&format!("stalls[{}] ({}): {}", index, stall.name, e))
        })?;
    }

    Ok(())
}

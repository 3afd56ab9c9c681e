//! Seed Format v0 schema
//!
//! Defines the YAML structure for seed import

use serde::{Deserialize, Serialize};
use stallmap_core::model::{ProductDraft, StallDraft};

/// Top-level seed file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    /// Stalls to register, in registration order
    #[serde(default)]
    pub stalls: Vec<SeedStall>,
}

/// Stall definition in seed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedStall {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub products: Vec<SeedProduct>,
}

/// Product line in seed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedProduct {
    pub name: String,
    pub price: i64,
}

impl SeedStall {
    pub fn to_draft(&self) -> StallDraft {
        StallDraft {
            name: self.name.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            description: self.description.clone(),
            products: self
                .products
                .iter()
                .map(|p| ProductDraft::new(p.name.clone(), p.price))
                .collect(),
        }
    }
}

impl SeedV0 {
    pub fn drafts(&self) -> Vec<StallDraft> {
        self.stalls.iter().map(SeedStall::to_draft).collect()
    }
}

//! Seed digest canonicalization
//!
//! Computes stable SHA256 digests of seeds. Stall order is kept because it
//! decides the ids stalls receive; YAML layout and quoting are not.

use crate::errors::Result;
use crate::seed::format_v0::SeedV0;
use serde::Serialize;
use sha2::{Digest, Sha256};
use stallmap_core::errors::StallError;

#[derive(Serialize)]
struct CanonicalSeed<'a> {
    schema_version: u32,
    stalls: Vec<CanonicalStall<'a>>,
}

#[derive(Serialize)]
struct CanonicalStall<'a> {
    name: &'a str,
    latitude: String,
    longitude: String,
    description: &'a str,
    products: Vec<(&'a str, i64)>,
}

/// Compute a stable SHA256 hex digest for a seed
pub fn compute_seed_digest(seed: &SeedV0) -> Result<String> {
    let canonical = CanonicalSeed {
        schema_version: seed.schema_version,
        stalls: seed
            .stalls
            .iter()
            .map(|s| CanonicalStall {
                name: &s.name,
                latitude: format!("{:.6}", s.latitude),
                longitude: format!("{:.6}", s.longitude),
                description: s.description.as_deref().unwrap_or(""),
                products: s.products.iter().map(|p| (p.name.as_str(), p.price)).collect(),
            })
            .collect(),
    };

    let json = serde_json::to_string(&canonical).map_err(StallError::from)?;
    Ok(hex::encode(Sha256::digest(json.as_bytes())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::parser::parse_seed_str;

    const SEED: &str = r#"
schema_version: 0
stalls:
  - name: "Crepe Stand"
    latitude: 39.7031
    longitude: 141.1434
    products:
      - { name: Banana, price: 350 }
"#;

    #[test]
    fn test_seed_digest_stable_and_format_independent() {
        let reformatted = r#"
schema_version: 0
stalls:
    -   name: Crepe Stand
        latitude: 39.70310
        longitude: 141.1434
        products:
            - name: Banana
              price: 350
"#;
        let first = compute_seed_digest(&parse_seed_str(SEED).unwrap()).unwrap();
        let second = compute_seed_digest(&parse_seed_str(reformatted).unwrap()).unwrap();

        assert_eq!(first.len(), 64);
        assert_eq!(first, second);
    }

    #[test]
    fn test_seed_digest_tracks_content() {
        let changed = SEED.replace("350", "400");
        let first = compute_seed_digest(&parse_seed_str(SEED).unwrap()).unwrap();
        let second = compute_seed_digest(&parse_seed_str(&changed).unwrap()).unwrap();
        assert_ne!(first, second);
    }
}

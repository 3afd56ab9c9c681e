use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;
use super::product::{Product, ProductDraft};

/// Repository-assigned stall identifier (never reused)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StallId(pub i64);

impl StallId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for StallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A festival stall as read back from the store, with its products nested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stall {
    pub id: StallId,
    pub name: String,
    #[serde(flatten)]
    pub coordinate: Coordinate,
    pub description: Option<String>,
    /// Products in insertion order
    pub products: Vec<Product>,
}

impl Stall {
    pub fn latitude(&self) -> f64 {
        self.coordinate.latitude()
    }

    pub fn longitude(&self) -> f64 {
        self.coordinate.longitude()
    }

    /// Description if present and not blank
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    /// Current products as drafts, e.g. to pre-fill an edit
    pub fn product_drafts(&self) -> Vec<ProductDraft> {
        self.products.iter().map(ProductDraft::from).collect()
    }
}

/// Input for registering a new stall together with its products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StallDraft {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub products: Vec<ProductDraft>,
}

/// Replacement values for a stall's mutable scalar fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StallUpdate {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<&StallDraft> for StallUpdate {
    fn from(draft: &StallDraft) -> Self {
        Self {
            name: draft.name.clone(),
            latitude: draft.latitude,
            longitude: draft.longitude,
            description: draft.description.clone(),
        }
    }
}

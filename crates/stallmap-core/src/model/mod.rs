pub mod coordinate;
pub mod product;
pub mod stall;

pub use coordinate::Coordinate;
pub use product::{Product, ProductDraft, ProductId};
pub use stall::{Stall, StallDraft, StallId, StallUpdate};

//! StallMap Core - festival stall domain kernel
//!
//! This crate provides the storage-independent parts of StallMap:
//! - Stall and Product models with validated coordinates
//! - The coordinate validator and draft validation rules
//! - Display aggregation and lenient free-text product import
//! - Leaflet HTML rendering for visitor, preview and picker pages
//! - Candidate preset locations and the coordinate picker channel
//! - The structured error facility and logging facility shared by all crates

pub mod catalog;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod picker;
pub mod presets;
pub mod render;
pub mod rules;

/// Field and event names used by the logging macros
pub use stallmap_core_types::schema;

// Re-export commonly used types
pub use catalog::{parse_products_from_text, to_display_records, DisplayStall};
pub use errors::{ExError, ExErrorKind, InvalidCoordinate, Result, StallError};
pub use model::{Coordinate, Product, ProductDraft, ProductId, Stall, StallDraft, StallId, StallUpdate};
pub use picker::{spawn_picker, PickOutcome, PickReply, PickerHandle};
pub use render::{render_map, render_picker_page, MapMode, MapOptions, MapView};

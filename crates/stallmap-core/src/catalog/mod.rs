//! Stall aggregation: read-optimized display records and free-text product entry

pub mod display;
pub mod text_import;

pub use display::{
    format_product_label, to_display_record, to_display_records, DisplayProduct, DisplayStall,
};
pub use text_import::parse_products_from_text;

/// Currency suffix used when none is configured
pub const DEFAULT_CURRENCY_UNIT: &str = "円";

//! HTML rendering of stall data into Leaflet map documents
//!
//! Rendering is a pure function of its inputs and never touches storage.

pub mod html;
pub mod map_render;
pub mod picker_page;

pub use map_render::{
    render_map, MapMode, MapOptions, MapView, VenueMarker, DEFAULT_EMPTY_PRODUCTS_TEXT,
    DEFAULT_PRODUCTS_HEADING,
};
pub use picker_page::render_picker_page;

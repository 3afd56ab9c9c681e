use serde::Serialize;

use super::html::{escape_html, json_for_script, leaflet_script, leaflet_stylesheet, map_bootstrap};
use crate::catalog::DisplayStall;
use crate::errors::Result;
use crate::model::Coordinate;
use crate::presets::PresetLocation;

/// Initial viewport of a rendered map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
}

/// Which audience a map is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapMode {
    /// Public map handed to visitors
    #[default]
    Visitor,
    /// Operator map: stall ids in popups, pointer coordinate readout
    Preview,
}

/// Highlighted marker for the venue itself
#[derive(Debug, Clone, PartialEq)]
pub struct VenueMarker {
    pub coordinate: Coordinate,
    pub title: String,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub view: MapView,
    pub title: String,
    pub mode: MapMode,
    pub venue: Option<VenueMarker>,
    /// Appended to asset URLs to defeat browser caching
    pub cache_token: Option<String>,
    /// Heading above the product lines in a stall popup
    pub products_heading: String,
    /// Line shown in a popup when the stall lists no products
    pub empty_products_text: String,
}

/// Default popup heading for the product list
pub const DEFAULT_PRODUCTS_HEADING: &str = "商品・価格";
/// Default popup line for a stall without products
pub const DEFAULT_EMPTY_PRODUCTS_TEXT: &str = "商品情報なし";

impl MapOptions {
    pub fn new(view: MapView, title: impl Into<String>) -> Self {
        Self {
            view,
            title: title.into(),
            mode: MapMode::Visitor,
            venue: None,
            cache_token: None,
            products_heading: DEFAULT_PRODUCTS_HEADING.to_string(),
            empty_products_text: DEFAULT_EMPTY_PRODUCTS_TEXT.to_string(),
        }
    }

    /// Replace the popup heading and the empty-list placeholder
    pub fn with_product_labels(
        mut self,
        heading: impl Into<String>,
        empty_text: impl Into<String>,
    ) -> Self {
        self.products_heading = heading.into();
        self.empty_products_text = empty_text.into();
        self
    }

    pub fn with_mode(mut self, mode: MapMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_venue(mut self, venue: VenueMarker) -> Self {
        self.venue = Some(venue);
        self
    }

    pub fn with_cache_token(mut self, token: impl Into<String>) -> Self {
        self.cache_token = Some(token.into());
        self
    }
}

#[derive(Serialize)]
struct MarkerData {
    lat: f64,
    lng: f64,
    tooltip: String,
    popup: String,
}

const STYLE: &str = r#"<style>
    body { margin: 0; padding: 0; font-family: Arial, sans-serif; }
    #map { height: 100vh; width: 100%; }
    .stall-popup { width: 250px; }
    .stall-popup h3 { color: #2e8b57; margin: 0 0 10px 0; }
    .stall-description { color: #666; margin: 0 0 8px 0; }
    .stall-products { background-color: #f8f9fa; padding: 8px; border-radius: 5px; }
    .stall-products h4 { color: #495057; margin: 0 0 8px 0; }
    .product-line { margin-bottom: 3px; }
    .product-empty { color: #999; }
    .stall-coordinates { color: #888; font-size: 11px; margin: 8px 0 0 0; }
    .coordinate-readout { background: white; padding: 5px 10px; border: 2px solid rgba(0,0,0,0.2); border-radius: 5px; font-size: 12px; }
    #map-legend { position: absolute; bottom: 10px; right: 10px; z-index: 1000; background: white; padding: 6px 10px; border-radius: 5px; font-size: 12px; color: #495057; }
</style>
"#;

const STALL_LAYER: &str = r#"stallMarkers.forEach(function (m) {
    L.marker([m.lat, m.lng])
        .bindPopup(m.popup, {maxWidth: 280})
        .bindTooltip(m.tooltip)
        .addTo(map);
});
"#;

const PRESET_LAYER: &str = r#"presetMarkers.forEach(function (m) {
    L.circleMarker([m.lat, m.lng], {radius: 8, color: '#2e8b57', fillColor: '#3cb371', fillOpacity: 0.8})
        .bindPopup(m.popup)
        .bindTooltip(m.tooltip)
        .addTo(map);
});
"#;

const VENUE_LAYER: &str = r#"venueMarkers.forEach(function (m) {
    L.circleMarker([m.lat, m.lng], {radius: 12, color: '#c0392b', fillColor: '#ff6b35', fillOpacity: 0.9})
        .bindPopup(m.popup, {maxWidth: 200})
        .bindTooltip(m.tooltip)
        .addTo(map);
});
"#;

const PREVIEW_TOOLS: &str = r#"var readout = L.control({position: 'bottomleft'});
readout.onAdd = function () {
    var div = L.DomUtil.create('div', 'coordinate-readout');
    div.textContent = 'Move the pointer over the map';
    return div;
};
readout.addTo(map);

function showReadout(text) {
    document.querySelector('.coordinate-readout').textContent = text;
}

map.on('mousemove', function (e) {
    showReadout(e.latlng.lat.toFixed(6) + ', ' + e.latlng.lng.toFixed(6));
});

map.on('click', function (e) {
    var pair = e.latlng.lat.toFixed(6) + ',' + e.latlng.lng.toFixed(6);
    if (navigator.clipboard && window.isSecureContext) {
        navigator.clipboard.writeText(pair).then(function () {
            showReadout('Copied: ' + pair);
        }, function () {
            showReadout(pair);
        });
    } else {
        showReadout(pair);
    }
});
"#;

/// Render stalls (and optional candidate sites) into a Leaflet HTML document
///
/// Produces one marker per stall at its coordinate. The popup holds the
/// stall name, the description when present, one `"name: price<unit>"` line
/// per product (or a placeholder line when there are none) and the
/// coordinate label with six decimals. Preset locations are drawn as green
/// circle markers so they cannot be mistaken for registered stalls.
///
/// Output depends only on the arguments.
///
/// # Errors
/// * `Serialization` - If marker data cannot be encoded
pub fn render_map(
    options: &MapOptions,
    stalls: &[DisplayStall],
    presets: &[PresetLocation],
) -> Result<String> {
    let token = options.cache_token.as_deref();

    let stall_markers: Vec<MarkerData> = stalls
        .iter()
        .map(|stall| MarkerData {
            lat: stall.latitude(),
            lng: stall.longitude(),
            tooltip: match options.mode {
                MapMode::Visitor => escape_html(&stall.name),
                MapMode::Preview => format!("#{} {}", stall.id, escape_html(&stall.name)),
            },
            popup: stall_popup(stall, options),
        })
        .collect();

    let preset_markers: Vec<MarkerData> = presets
        .iter()
        .map(|preset| MarkerData {
            lat: preset.coordinate.latitude(),
            lng: preset.coordinate.longitude(),
            tooltip: escape_html(&preset.name),
            popup: preset_popup(preset),
        })
        .collect();

    let venue_markers: Vec<MarkerData> = options
        .venue
        .iter()
        .map(|venue| MarkerData {
            lat: venue.coordinate.latitude(),
            lng: venue.coordinate.longitude(),
            tooltip: escape_html(&venue.title),
            popup: format!(
                "<h3 class=\"venue-title\">{}</h3><p>{}</p>",
                escape_html(&venue.title),
                escape_html(&venue.hint)
            ),
        })
        .collect();

    let mut output = String::new();

    output.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    output.push_str("<meta charset=\"utf-8\" />\n");
    output.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n",
    );
    output.push_str(&format!("<title>{}</title>\n", escape_html(&options.title)));
    output.push_str(&leaflet_stylesheet(token));
    output.push_str(STYLE);
    output.push_str("</head>\n<body>\n");
    output.push_str("<div id=\"map\"></div>\n");

    if options.mode == MapMode::Preview {
        output.push_str(
            "<div id=\"map-legend\">Green circles: candidate sites | Blue markers: registered stalls | Click the map to copy coordinates</div>\n",
        );
    }

    output.push_str(&leaflet_script(token));
    output.push_str("<script>\n");
    output.push_str(&map_bootstrap(
        options.view.center.latitude(),
        options.view.center.longitude(),
        options.view.zoom,
    ));

    output.push_str(&format!(
        "var stallMarkers = {};\n",
        json_for_script(&stall_markers)?
    ));
    output.push_str(STALL_LAYER);

    output.push_str(&format!(
        "var presetMarkers = {};\n",
        json_for_script(&preset_markers)?
    ));
    output.push_str(PRESET_LAYER);

    output.push_str(&format!(
        "var venueMarkers = {};\n",
        json_for_script(&venue_markers)?
    ));
    output.push_str(VENUE_LAYER);

    if options.mode == MapMode::Preview {
        output.push_str(PREVIEW_TOOLS);
    }

    output.push_str("</script>\n</body>\n</html>\n");

    Ok(output)
}

fn stall_popup(stall: &DisplayStall, options: &MapOptions) -> String {
    let mut html = String::from("<div class=\"stall-popup\">");
    html.push_str(&format!("<h3>{}</h3>", escape_html(&stall.name)));

    if let Some(description) = stall.description_text() {
        html.push_str(&format!(
            "<p class=\"stall-description\"><em>{}</em></p>",
            escape_html(description)
        ));
    }

    if options.mode == MapMode::Preview {
        html.push_str(&format!("<p class=\"stall-id\">ID: {}</p>", stall.id));
    }

    html.push_str(&format!(
        "<div class=\"stall-products\"><h4>{}</h4>",
        escape_html(&options.products_heading)
    ));
    if stall.products.is_empty() {
        html.push_str(&format!(
            "<div class=\"product-empty\">{}</div>",
            escape_html(&options.empty_products_text)
        ));
    } else {
        for product in &stall.products {
            html.push_str(&format!(
                "<div class=\"product-line\">{}</div>",
                escape_html(&product.label)
            ));
        }
    }
    html.push_str("</div>");

    html.push_str(&format!(
        "<p class=\"stall-coordinates\">{}</p>",
        stall.coordinate_label()
    ));
    html.push_str("</div>");
    html
}

fn preset_popup(preset: &PresetLocation) -> String {
    format!(
        "<div class=\"preset-popup\"><strong>Candidate site: {}</strong><br>{}<br><span class=\"stall-coordinates\">{}</span></div>",
        escape_html(&preset.name),
        escape_html(&preset.description),
        preset.coordinate.label()
    )
}

use super::html::{leaflet_script, leaflet_stylesheet, map_bootstrap};
use super::map_render::MapView;

const STYLE: &str = r#"<style>
    body { margin: 0; padding: 0; font-family: Arial, sans-serif; }
    #map { height: 100vh; width: 100%; }
    .info-box {
        position: absolute; top: 10px; right: 10px; background: white;
        padding: 15px; border-radius: 8px; box-shadow: 0 4px 15px rgba(0,0,0,0.3);
        z-index: 1000; font-size: 14px; max-width: 320px; min-width: 280px;
    }
    .coordinates { font-weight: bold; color: #2c5aa0; margin: 10px 0; }
    .copy-btn {
        background: #4CAF50; color: white; border: none; padding: 12px 16px;
        border-radius: 4px; cursor: pointer; width: 100%; font-weight: bold;
    }
    .copy-btn:disabled { background: #ccc; cursor: not-allowed; }
    .status { margin-top: 10px; padding: 8px; background: #f0f0f0; border-radius: 4px; font-size: 12px; }
</style>
"#;

const INFO_BOX: &str = r#"<div class="info-box">
    <div>Click the map to choose the stall position</div>
    <div class="coordinates" id="coordinates">No position selected</div>
    <button class="copy-btn" id="copyBtn" disabled onclick="copySelection()">Copy coordinates</button>
    <div class="status" id="status">Paste the copied pair back into the terminal</div>
</div>
"#;

const PICKER_SCRIPT: &str = r#"var marker = null;
var selected = null;

map.on('click', function (e) {
    selected = e.latlng.lat.toFixed(6) + ',' + e.latlng.lng.toFixed(6);
    if (marker) {
        marker.setLatLng(e.latlng);
    } else {
        marker = L.marker(e.latlng).addTo(map);
    }
    document.getElementById('coordinates').textContent = selected;
    document.getElementById('copyBtn').disabled = false;
});

function copySelection() {
    if (!selected) {
        return;
    }
    var status = document.getElementById('status');
    if (navigator.clipboard && window.isSecureContext) {
        navigator.clipboard.writeText(selected).then(function () {
            status.textContent = 'Copied: ' + selected;
        }, function () {
            status.textContent = 'Copy manually: ' + selected;
        });
    } else {
        status.textContent = 'Copy manually: ' + selected;
    }
}
"#;

/// Standalone page for choosing a coordinate by clicking the map
///
/// The selected position is shown (and copied) as `"lat,lng"` with six
/// decimals, the same text `Coordinate::parse_pair` accepts.
pub fn render_picker_page(view: &MapView, cache_token: Option<&str>) -> String {
    let mut output = String::new();

    output.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    output.push_str("<meta charset=\"utf-8\" />\n");
    output.push_str("<title>Choose stall position</title>\n");
    output.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n",
    );
    output.push_str(&leaflet_stylesheet(cache_token));
    output.push_str(STYLE);
    output.push_str("</head>\n<body>\n");
    output.push_str("<div id=\"map\"></div>\n");
    output.push_str(INFO_BOX);
    output.push_str(&leaflet_script(cache_token));
    output.push_str("<script>\n");
    output.push_str(&map_bootstrap(
        view.center.latitude(),
        view.center.longitude(),
        view.zoom,
    ));
    output.push_str(PICKER_SCRIPT);
    output.push_str("</script>\n</body>\n</html>\n");

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinate;

    #[test]
    fn test_picker_page_centres_on_view() {
        let view = MapView {
            center: Coordinate::new(39.7033, 141.1436).unwrap(),
            zoom: 17,
        };
        let html = render_picker_page(&view, Some("1700000000000"));

        assert!(html.contains("setView([39.703300, 141.143600], 17)"));
        assert!(html.contains("leaflet.js?v=1700000000000"));
        assert!(html.contains("toFixed(6) + ',' +"));
        assert!(html.contains("id=\"copyBtn\""));
    }
}

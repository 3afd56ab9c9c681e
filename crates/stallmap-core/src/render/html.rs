//! Small helpers shared by the HTML renderers

use serde::Serialize;

use crate::errors::Result;

pub const LEAFLET_VERSION: &str = "1.9.4";

const TILE_LAYER: &str = "L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {\n    attribution: '&copy; OpenStreetMap contributors',\n    maxZoom: 19\n}).addTo(map);\n";

/// Escape text for use in HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Serialize a value as a JavaScript literal safe to inline in `<script>`
///
/// `</` is written as `<\/` so embedded text can never close the script
/// element early.
pub fn json_for_script<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)?;
    Ok(json.replace("</", "<\\/"))
}

fn versioned(url: &str, cache_token: Option<&str>) -> String {
    match cache_token {
        Some(token) if !token.is_empty() => format!("{}?v={}", url, escape_html(token)),
        _ => url.to_string(),
    }
}

/// `<link>` for the Leaflet stylesheet
pub fn leaflet_stylesheet(cache_token: Option<&str>) -> String {
    let url = format!(
        "https://unpkg.com/leaflet@{}/dist/leaflet.css",
        LEAFLET_VERSION
    );
    format!(
        "<link rel=\"stylesheet\" href=\"{}\" />\n",
        versioned(&url, cache_token)
    )
}

/// `<script>` loading the Leaflet library
pub fn leaflet_script(cache_token: Option<&str>) -> String {
    let url = format!("https://unpkg.com/leaflet@{}/dist/leaflet.js", LEAFLET_VERSION);
    format!(
        "<script src=\"{}\"></script>\n",
        versioned(&url, cache_token)
    )
}

/// Map construction plus the OpenStreetMap tile layer
pub fn map_bootstrap(latitude: f64, longitude: f64, zoom: u8) -> String {
    let mut js = format!(
        "var map = L.map('map').setView([{:.6}, {:.6}], {});\n",
        latitude, longitude, zoom
    );
    js.push_str(TILE_LAYER);
    js
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Fish" & 'Chips'</b>"#),
            "&lt;b&gt;&quot;Fish&quot; &amp; &#39;Chips&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("たこ焼き"), "たこ焼き");
    }

    #[test]
    fn test_json_for_script_neutralises_closing_tags() {
        let json = json_for_script(&vec!["</script><script>alert(1)"]).unwrap();
        assert!(!json.contains("</script>"));
        assert!(json.contains("<\\/script>"));
    }

    #[test]
    fn test_cache_token_is_appended() {
        assert!(leaflet_script(Some("1700000000000")).contains("leaflet.js?v=1700000000000"));
        assert!(!leaflet_script(None).contains("?v="));
        assert!(!leaflet_stylesheet(Some("")).contains("?v="));
    }
}

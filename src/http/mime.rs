//! MIME type detection module
//!
//! Returns the Content-Type for a served file based on its extension.
//! The fixed table wins over the generic registry because browsers are strict
//! about manifests, module scripts and geographic JSON.

use std::path::Path;

/// Content type used when neither the table nor the registry knows the extension
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Extension (lowercase, with leading dot) to Content-Type
pub const EXTENSION_TYPES: &[(&str, &str)] = &[
    (".html", "text/html"),
    (".css", "text/css"),
    (".js", "application/javascript"),
    (".mjs", "application/javascript"),
    (".json", "application/json"),
    (".geojson", "application/json"),
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
    (".jpeg", "image/jpeg"),
    (".svg", "image/svg+xml"),
    (".ico", "image/x-icon"),
    (".webmanifest", "application/manifest+json"),
];

/// Look up an extension in the fixed table
///
/// The leading dot is optional and the match is case-insensitive.
pub fn lookup_extension(extension: &str) -> Option<&'static str> {
    let wanted = extension.strip_prefix('.').unwrap_or(extension);
    EXTENSION_TYPES
        .iter()
        .find(|(ext, _)| ext[1..].eq_ignore_ascii_case(wanted))
        .map(|&(_, content_type)| content_type)
}

/// Get MIME Content-Type for a file path
///
/// Order: fixed table, then the `mime_guess` registry, then `application/octet-stream`.
pub fn get_content_type(path: &Path) -> &'static str {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(lookup_extension)
        .or_else(|| mime_guess::from_path(path).first_raw())
        .unwrap_or(FALLBACK_CONTENT_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_types() {
        assert_eq!(get_content_type(Path::new("index.html")), "text/html");
        assert_eq!(get_content_type(Path::new("css/app.css")), "text/css");
        assert_eq!(get_content_type(Path::new("app.js")), "application/javascript");
        assert_eq!(get_content_type(Path::new("lib/mod.mjs")), "application/javascript");
        assert_eq!(get_content_type(Path::new("data.json")), "application/json");
        assert_eq!(get_content_type(Path::new("countries.geojson")), "application/json");
        assert_eq!(get_content_type(Path::new("icon.png")), "image/png");
        assert_eq!(get_content_type(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(get_content_type(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(get_content_type(Path::new("map.svg")), "image/svg+xml");
        assert_eq!(get_content_type(Path::new("favicon.ico")), "image/x-icon");
        assert_eq!(
            get_content_type(Path::new("manifest.webmanifest")),
            "application/manifest+json"
        );
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert_eq!(
            get_content_type(Path::new("Manifest.WEBMANIFEST")),
            "application/manifest+json"
        );
        assert_eq!(get_content_type(Path::new("WORLD.GeoJSON")), "application/json");
        assert_eq!(lookup_extension(".MJS"), Some("application/javascript"));
        assert_eq!(lookup_extension("svg"), Some("image/svg+xml"));
    }

    #[test]
    fn test_registry_fallback() {
        assert_eq!(get_content_type(Path::new("notes.txt")), "text/plain");
        assert_eq!(lookup_extension(".txt"), None);
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(
            get_content_type(Path::new("blob.qqzz9")),
            FALLBACK_CONTENT_TYPE
        );
        assert_eq!(get_content_type(Path::new("Makefile")), FALLBACK_CONTENT_TYPE);
        assert_eq!(get_content_type(Path::new(".bashrc")), FALLBACK_CONTENT_TYPE);
    }
}

//! Development header rules
//!
//! CORS headers for every response and a no-cache rule for the service worker script.

use hyper::header::{
    HeaderMap, HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL,
};

/// Cache-Control value for paths matching a no-cache suffix
pub const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// CORS headers appended to every response, in order
pub const CORS_HEADERS: [(HeaderName, &str); 3] = [
    (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
    (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
];

/// Append the CORS header triple
pub fn append_cors_headers(headers: &mut HeaderMap) {
    for (name, value) in CORS_HEADERS {
        headers.append(name, HeaderValue::from_static(value));
    }
}

/// Whether `path` ends with one of `suffixes`
///
/// Plain suffix match with no segment boundary: `/foosw.js` matches `sw.js`.
pub fn is_no_cache_path(path: &str, suffixes: &[String]) -> bool {
    suffixes
        .iter()
        .any(|suffix| !suffix.is_empty() && path.ends_with(suffix.as_str()))
}

/// Append `Cache-Control: no-cache, no-store, must-revalidate`
pub fn append_no_cache(headers: &mut HeaderMap) {
    headers.append(CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suffixes() -> Vec<String> {
        vec!["sw.js".to_string()]
    }

    #[test]
    fn test_cors_headers_exact_values() {
        let mut headers = HeaderMap::new();
        append_cors_headers(&mut headers);
        assert_eq!(headers.len(), 3);
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-methods"], "GET, POST, OPTIONS");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    }

    #[test]
    fn test_no_cache_suffix_match() {
        assert!(is_no_cache_path("/sw.js", &suffixes()));
        assert!(is_no_cache_path("/app/sw.js", &suffixes()));
        // literal suffix, no segment boundary
        assert!(is_no_cache_path("/foosw.js", &suffixes()));
        assert!(!is_no_cache_path("/sw.js.map", &suffixes()));
        assert!(!is_no_cache_path("/sw-register.js", &suffixes()));
        assert!(!is_no_cache_path("/", &suffixes()));
    }

    #[test]
    fn test_empty_suffix_never_matches() {
        assert!(!is_no_cache_path("/index.html", &[String::new()]));
        assert!(!is_no_cache_path("/sw.js", &[]));
    }

    #[test]
    fn test_append_no_cache() {
        let mut headers = HeaderMap::new();
        append_no_cache(&mut headers);
        assert_eq!(headers["cache-control"], NO_CACHE);
    }
}

//! Response hooks
//!
//! The static responder is generic; development behavior is plugged in through
//! two hooks applied by the router: one finalizes headers, one records the request.

use crate::config::HttpConfig;
use crate::http::headers;
use crate::logger::{self, AccessLogEntry};
use hyper::HeaderMap;

/// Called on every response just before it is handed to hyper
pub trait HeaderHook: Send + Sync {
    /// `request_path` is the raw URI path, without the query string
    fn finalize_headers(&self, request_path: &str, headers: &mut HeaderMap);
}

/// Called once per handled request
pub trait AccessLog: Send + Sync {
    fn log_request(&self, entry: &AccessLogEntry);
}

/// CORS on every response, no-cache on service worker scripts
#[derive(Debug, Clone)]
pub struct DevHeaders {
    pub enable_cors: bool,
    pub no_cache_suffixes: Vec<String>,
}

impl DevHeaders {
    pub fn from_config(http: &HttpConfig) -> Self {
        Self {
            enable_cors: http.enable_cors,
            no_cache_suffixes: http.no_cache_suffixes.clone(),
        }
    }
}

impl HeaderHook for DevHeaders {
    fn finalize_headers(&self, request_path: &str, headers: &mut HeaderMap) {
        if self.enable_cors {
            headers::append_cors_headers(headers);
        }
        if headers::is_no_cache_path(request_path, &self.no_cache_suffixes) {
            headers::append_no_cache(headers);
        }
    }
}

/// Writes one formatted line per request through the logger
#[derive(Debug, Clone)]
pub struct FormattedAccessLog {
    pub format: String,
}

impl AccessLog for FormattedAccessLog {
    fn log_request(&self, entry: &AccessLogEntry) {
        logger::log_access(entry, &self.format);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev_headers() -> DevHeaders {
        DevHeaders {
            enable_cors: true,
            no_cache_suffixes: vec!["sw.js".to_string()],
        }
    }

    #[test]
    fn test_cors_on_every_path() {
        for path in ["/", "/index.html", "/missing.xyz", "/sw.js"] {
            let mut headers = HeaderMap::new();
            dev_headers().finalize_headers(path, &mut headers);
            assert_eq!(headers["access-control-allow-origin"], "*");
            assert_eq!(headers["access-control-allow-methods"], "GET, POST, OPTIONS");
            assert_eq!(headers["access-control-allow-headers"], "Content-Type");
        }
    }

    #[test]
    fn test_no_cache_only_for_sw() {
        let mut headers = HeaderMap::new();
        dev_headers().finalize_headers("/sw.js", &mut headers);
        assert_eq!(headers["cache-control"], "no-cache, no-store, must-revalidate");

        let mut headers = HeaderMap::new();
        dev_headers().finalize_headers("/app.js", &mut headers);
        assert!(headers.get("cache-control").is_none());
    }

    #[test]
    fn test_cors_disabled() {
        let hook = DevHeaders {
            enable_cors: false,
            ..dev_headers()
        };
        let mut headers = HeaderMap::new();
        hook.finalize_headers("/sw.js", &mut headers);
        assert!(headers.get("access-control-allow-origin").is_none());
        assert!(headers.get("cache-control").is_some());
    }
}

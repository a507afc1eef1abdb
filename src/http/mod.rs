//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from path resolution:
//! content types, development headers, cache validation, response bodies and builders.

pub mod body;
pub mod cache;
pub mod headers;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use body::ResponseBody;
pub use response::{
    build_304_response, build_405_response, build_error_response,
    build_file_response, build_html_response, build_options_response, build_redirect_response,
};

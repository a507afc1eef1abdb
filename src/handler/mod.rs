//! Request handler module
//!
//! Responsible for request dispatch and static file serving.
//! Development behavior (CORS, no-cache, access log) is plugged in through hooks.

pub mod hooks;
pub mod listing;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;

// Server context module
// Immutable per-process state shared by every connection

use std::io;
use std::path::PathBuf;

use super::types::{Config, HttpConfig, PerformanceConfig};
use crate::handler::hooks::{AccessLog, DevHeaders, FormattedAccessLog, HeaderHook};

/// Everything a request needs, built once at startup and shared through `Arc`
pub struct ServerContext {
    /// Canonical root directory
    pub root: PathBuf,
    pub http: HttpConfig,
    pub performance: PerformanceConfig,
    pub header_hook: Box<dyn HeaderHook>,
    /// `None` when access logging is disabled
    pub access_log: Option<Box<dyn AccessLog>>,
}

impl ServerContext {
    /// Build the context from loaded configuration
    ///
    /// Fails if the root directory does not exist or is not a directory.
    pub fn from_config(config: &Config) -> io::Result<Self> {
        let root = std::fs::canonicalize(&config.server.root).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("Root directory '{}' is not accessible: {e}", config.server.root),
            )
        })?;
        if !root.is_dir() {
            return Err(io::Error::other(format!(
                "Root '{}' is not a directory",
                root.display()
            )));
        }

        let access_log: Option<Box<dyn AccessLog>> = if config.logging.access_log {
            Some(Box::new(FormattedAccessLog {
                format: config.logging.access_log_format.clone(),
            }))
        } else {
            None
        };

        Ok(Self::new(
            root,
            config.http.clone(),
            config.performance.clone(),
            access_log,
        ))
    }

    /// Build a context around an already canonical root with the default header hook
    pub fn new(
        root: PathBuf,
        http: HttpConfig,
        performance: PerformanceConfig,
        access_log: Option<Box<dyn AccessLog>>,
    ) -> Self {
        Self {
            header_hook: Box::new(DevHeaders::from_config(&http)),
            root,
            http,
            performance,
            access_log,
        }
    }
}

// Configuration module entry point
// Loads configuration once at startup and freezes it into the server context

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::ServerContext;
pub use types::{Config, HttpConfig, PerformanceConfig};

/// Config file looked up in the working directory (extension optional)
pub const DEFAULT_CONFIG_FILE: &str = "devserve";

impl Config {
    /// Load configuration from defaults, `devserve.toml`, and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// `PORT`, `HOST` and `DEVSERVE_ROOT` override everything else.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("DEVSERVE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("server.root", ".")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "simple")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", 30)?
            .set_default(
                "http.server_name",
                concat!("devserve/", env!("CARGO_PKG_VERSION")),
            )?
            .set_default("http.enable_cors", true)?
            .set_default("http.no_cache_suffixes", vec!["sw.js"])?
            .set_default("http.index_files", vec!["index.html", "index.htm"])?
            .set_default("http.directory_listing", true)?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("server.host", std::env::var("HOST").ok())?
            .set_override_option("server.root", std::env::var("DEVSERVE_ROOT").ok())?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        let host = self.server.host.trim_start_matches('[').trim_end_matches(']');
        let ip: std::net::IpAddr = match host {
            "localhost" => std::net::Ipv4Addr::LOCALHOST.into(),
            other => other
                .parse()
                .map_err(|e| format!("Invalid host '{}': {e}", self.server.host))?,
        };
        Ok(SocketAddr::new(ip, self.server.port))
    }
}

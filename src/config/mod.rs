// Configuration module entry point
// Loads server, logging and icon settings

mod state;
mod types;

use std::net::SocketAddr;

use crate::favicon::{FaviconError, FaviconOptions, IconSource, MaxAge};

// Re-export public types
pub use state::AppState;
pub use types::{Config, FaviconConfig, LoggingConfig, PerformanceConfig, ServerConfig};

/// Config file used when none is given (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from the default file
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional. `FAVICON__SECTION__KEY` environment variables
    /// override it, e.g. `FAVICON__SERVER__PORT=9000`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("FAVICON")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Icon source named by `favicon.source`
    pub fn icon_source(&self) -> Result<IconSource, FaviconError> {
        IconSource::from_value(self.favicon.source.as_ref())
    }

    /// Responder options from `favicon.max_age`
    pub fn favicon_options(&self) -> Result<FaviconOptions, FaviconError> {
        let max_age = match &self.favicon.max_age {
            Some(value) => MaxAge::from_value(value)?,
            None => None,
        };
        Ok(FaviconOptions { max_age })
    }
}

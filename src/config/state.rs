// Application state module
// Holds the loaded configuration and the icon responder shared by all connections

use std::sync::atomic::AtomicUsize;

use super::types::Config;
use crate::favicon::{Favicon, FaviconError, IconReader};
use crate::logger;

/// Application state
pub struct AppState<R = crate::favicon::FsReader> {
    pub config: Config,
    pub favicon: Favicon<R>,
    /// Connections currently being served
    pub active_connections: AtomicUsize,
}

impl AppState {
    /// Build the state, validating the icon settings
    pub fn new(config: Config) -> Result<Self, FaviconError> {
        let favicon = Favicon::new(config.icon_source()?, &config.favicon_options()?)?;
        Ok(Self::with_favicon(config, favicon))
    }
}

impl<R: IconReader> AppState<R> {
    /// Build the state around an existing responder
    pub fn with_favicon(config: Config, favicon: Favicon<R>) -> Self {
        match favicon.path() {
            Some(path) => logger::log_icon_source(&path.display().to_string(), favicon.max_age()),
            None => logger::log_icon_source("in-memory icon", favicon.max_age()),
        }

        Self {
            config,
            favicon,
            active_connections: AtomicUsize::new(0),
        }
    }
}

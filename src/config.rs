//! Environment-driven server configuration.

use crate::{Error, Result};
use std::path::PathBuf;

/// Port the server binds when `SPEAKSCORE_PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to bind on all interfaces.
    pub port: u16,
    /// Directory of UI files served for everything but the transcription route.
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Read configuration from `SPEAKSCORE_PORT` and `SPEAKSCORE_STATIC_DIR`,
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("SPEAKSCORE_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                Error::configuration(format!("SPEAKSCORE_PORT must be a port number, got {raw:?}"))
            })?,
            Err(_) => DEFAULT_PORT,
        };
        let static_dir = std::env::var("SPEAKSCORE_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));
        Ok(Self { port, static_dir })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            static_dir: PathBuf::from("static"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_and_static_dir() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.static_dir, PathBuf::from("static"));
    }
}

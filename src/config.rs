//! Server configuration from environment variables.

use std::path::PathBuf;

/// Settings for the web binary. Every field has a default so the app runs with no env.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    /// `HOST`, e.g. 0.0.0.0 so the app is reachable on a VPS.
    pub host: String,
    /// `PORT`
    pub port: u16,
    /// `STORE_DIR`: where tournaments are written.
    pub store_dir: PathBuf,
    /// `INACTIVITY_HOURS`: unfinished tournaments idle this long are pruned.
    pub inactivity_hours: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            store_dir: PathBuf::from("data"),
            inactivity_hours: 12,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source. Unparseable values fall back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            store_dir: lookup("STORE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_dir),
            inactivity_hours: lookup("INACTIVITY_HOURS")
                .and_then(|h| h.parse().ok())
                .unwrap_or(defaults.inactivity_hours),
        }
    }
}

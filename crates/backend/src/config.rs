use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a port number, got {0:?}")]
    InvalidPort(String),
}

/// Server settings, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    /// Directory holding `velocity.geojson`, served under `/data`.
    pub data_dir: PathBuf,
    /// Built frontend bundle (`index.html`, `assets/`).
    pub dist_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let data_dir = PathBuf::from(lookup("DATA_DIR").unwrap_or_else(|| "data".to_string()));
        let dist_dir = PathBuf::from(lookup("DIST_DIR").unwrap_or_else(|| "dist".to_string()));
        Ok(Config {
            port,
            data_dir,
            dist_dir,
        })
    }
}

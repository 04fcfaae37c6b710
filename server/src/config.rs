//! Relay configuration parsed from environment variables.

use std::num::ParseIntError;
use std::path::PathBuf;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("invalid PORT {value:?}: {source}")]
    InvalidPort { value: String, source: ParseIntError },
    #[error("failed to bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },
    #[error("server failed: {0}")]
    Serve(std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `STATIC_DIR`: default `public`
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::InvalidPort`] if `PORT` is set but not a port number.
    pub fn from_env() -> Result<Self, RelayError> {
        let port = parse_port(std::env::var("PORT").ok().as_deref())?;
        let static_dir = static_dir(std::env::var("STATIC_DIR").ok().as_deref());
        Ok(Self { port, static_dir })
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, RelayError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(value) => value
            .parse::<u16>()
            .map_err(|source| RelayError::InvalidPort { value: value.to_owned(), source }),
    }
}

fn static_dir(raw: Option<&str>) -> PathBuf {
    match raw.map(str::trim) {
        None | Some("") => PathBuf::from(DEFAULT_STATIC_DIR),
        Some(dir) => PathBuf::from(dir),
    }
}

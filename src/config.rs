//! Server configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LAYOUTS_DIR: &str = "layouts";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory holding `layout-<name>.json` files.
    pub layouts_dir: PathBuf,
    /// Front-end assets served for any path no API route claims.
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `LAYOUTS_DIR`: default `layouts`
    /// - `STATIC_DIR`: no static assets when absent
    ///
    /// # Errors
    ///
    /// `ConfigError::Invalid` if `PORT` is not a port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an injectable variable source.
    /// Empty values count as unset.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = parse_port(var("PORT").as_deref())?;
        let layouts_dir = var("LAYOUTS_DIR").map_or_else(|| PathBuf::from(DEFAULT_LAYOUTS_DIR), PathBuf::from);
        let static_dir = var("STATIC_DIR").map(PathBuf::from);

        Ok(Self { port, layouts_dir, static_dir })
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_PORT);
    };
    raw.trim()
        .parse::<u16>()
        .map_err(|_| ConfigError::Invalid { var: "PORT", value: raw.to_owned() })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

//! Server configuration from environment variables.
//!
//! All settings have defaults except the upstream endpoint, which must be
//! set when `TABLESTATE_MODE=remote`:
//!
//! - `TABLESTATE_ADDR` - listen address (default `127.0.0.1:8350`)
//! - `TABLESTATE_MODE` - `local` or `remote` (default `local`)
//! - `TABLESTATE_UPSTREAM` - row endpoint URL for remote mode
//! - `TABLESTATE_ROWS` - generated row count (default `1000`)
//! - `TABLESTATE_SEED` - seed for reproducible data (default random)
//! - `TABLESTATE_DELAY_MS` - artificial delay on `/rows` (default none)
//! - `TABLESTATE_LOG` - log level (default `info`)

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use log::LevelFilter;

/// Where pages of rows come from, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceMode {
    /// Sort and slice the in-process row store directly.
    Local,
    /// Fetch each page from an external row endpoint.
    Remote {
        /// Full URL of the endpoint, e.g. `http://127.0.0.1:8350/rows`.
        upstream: String,
    },
}

/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub mode: SourceMode,
    pub row_count: usize,
    pub seed: Option<u64>,
    pub fetch_delay: Option<Duration>,
    pub log_level: LevelFilter,
}

/// Errors raised while reading the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable holds a value that does not parse.
    #[error("Invalid value for {key}: {value:?}")]
    Invalid {
        /// The environment variable name.
        key: &'static str,
        /// The offending value.
        value: String,
    },

    /// Remote mode was selected without an upstream endpoint.
    #[error("TABLESTATE_UPSTREAM must be set when TABLESTATE_MODE=remote")]
    MissingUpstream,
}

impl ConfigError {
    fn invalid(key: &'static str, value: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            value: value.into(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8350)),
            mode: SourceMode::Local,
            row_count: 1000,
            seed: None,
            fetch_delay: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl ServerConfig {
    /// Builds the configuration from `TABLESTATE_*` environment variables,
    /// starting from the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(addr) = env::var("TABLESTATE_ADDR") {
            config.addr = addr
                .parse()
                .map_err(|_| ConfigError::invalid("TABLESTATE_ADDR", &addr))?;
        }

        if let Ok(mode) = env::var("TABLESTATE_MODE") {
            config.mode = match mode.as_str() {
                "local" => SourceMode::Local,
                "remote" => {
                    let upstream =
                        env::var("TABLESTATE_UPSTREAM").map_err(|_| ConfigError::MissingUpstream)?;
                    SourceMode::Remote { upstream }
                }
                _ => return Err(ConfigError::invalid("TABLESTATE_MODE", &mode)),
            };
        }

        if let Ok(rows) = env::var("TABLESTATE_ROWS") {
            config.row_count = rows
                .parse()
                .map_err(|_| ConfigError::invalid("TABLESTATE_ROWS", &rows))?;
        }

        if let Ok(seed) = env::var("TABLESTATE_SEED") {
            config.seed = Some(
                seed.parse()
                    .map_err(|_| ConfigError::invalid("TABLESTATE_SEED", &seed))?,
            );
        }

        if let Ok(delay) = env::var("TABLESTATE_DELAY_MS") {
            let millis: u64 = delay
                .parse()
                .map_err(|_| ConfigError::invalid("TABLESTATE_DELAY_MS", &delay))?;
            config.fetch_delay = Some(Duration::from_millis(millis));
        }

        if let Ok(level) = env::var("TABLESTATE_LOG") {
            config.log_level = level
                .parse()
                .map_err(|_| ConfigError::invalid("TABLESTATE_LOG", &level))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.addr, SocketAddr::from(([127, 0, 0, 1], 8350)));
        assert_eq!(config.mode, SourceMode::Local);
        assert_eq!(config.row_count, 1000);
        assert_eq!(config.seed, None);
        assert_eq!(config.fetch_delay, None);
        assert_eq!(config.log_level, LevelFilter::Info);
    }
}

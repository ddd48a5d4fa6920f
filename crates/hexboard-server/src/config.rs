//! Server configuration read from the environment.

use hexboard_core::BoardShape;
use std::net::SocketAddr;
use thiserror::Error;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SERVER_ADDR {value:?} is not a socket address: {source}")]
    InvalidAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("{var} {value:?} is not a board dimension: {source}")]
    InvalidDimension {
        var: &'static str,
        value: String,
        source: std::num::ParseIntError,
    },
}

/// Settings fixed at start-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Shape of the first board every connection gets
    pub shape: BoardShape,
}

impl ServerConfig {
    /// Read `SERVER_ADDR`, `BOARD_LENGTH` and `BOARD_WIDTH`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the config from any variable source; unset variables take defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = lookup("SERVER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.into());
        let addr = value
            .parse()
            .map_err(|source| ConfigError::InvalidAddr { value, source })?;

        let standard = BoardShape::standard();
        let length = dimension(&lookup, "BOARD_LENGTH", standard.length())?;
        let width = dimension(&lookup, "BOARD_WIDTH", standard.width())?;

        Ok(Self {
            addr,
            shape: BoardShape::new(length, width),
        })
    }
}

fn dimension<F>(lookup: &F, var: &'static str, default: u16) -> Result<u16, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidDimension { var, value, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.shape, BoardShape::standard());
    }

    #[test]
    fn test_overrides_are_clamped() {
        let config = config(&[
            ("SERVER_ADDR", "127.0.0.1:9000"),
            ("BOARD_LENGTH", "3"),
            ("BOARD_WIDTH", " 8 "),
        ])
        .unwrap();
        assert_eq!(config.addr.port(), 9000);
        assert_eq!(config.shape, BoardShape::new(3, 2));
    }

    #[test]
    fn test_bad_values() {
        assert!(matches!(
            config(&[("SERVER_ADDR", "nowhere")]),
            Err(ConfigError::InvalidAddr { .. })
        ));
        assert!(matches!(
            config(&[("BOARD_WIDTH", "-1")]),
            Err(ConfigError::InvalidDimension {
                var: "BOARD_WIDTH",
                ..
            })
        ));
    }
}

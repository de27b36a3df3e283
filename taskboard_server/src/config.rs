use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:./taskboard.db?mode=rwc";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_PRINCIPAL_HEADER: &str = "x-principal-id";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("TASKBOARD_BIND `{value}` is not a socket address: {source}")]
    Bind {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("TASKBOARD_PRINCIPAL_HEADER `{0}` is not a valid header name")]
    PrincipalHeader(String),

    #[error("TASKBOARD_MAX_CONNECTIONS `{0}` is not a positive integer")]
    MaxConnections(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub bind: SocketAddr,
    pub principal_header: String,
    /// Pool size for file-backed databases; the driver default when unset.
    pub max_connections: Option<u32>,
}

impl Config {
    /// Read the configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset variables fall back to
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_raw = lookup("TASKBOARD_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw.parse().map_err(|source| ConfigError::Bind {
            value: bind_raw.clone(),
            source,
        })?;

        let principal_header = lookup("TASKBOARD_PRINCIPAL_HEADER")
            .unwrap_or_else(|| DEFAULT_PRINCIPAL_HEADER.to_string())
            .to_ascii_lowercase();
        if axum::http::HeaderName::from_bytes(principal_header.as_bytes()).is_err() {
            return Err(ConfigError::PrincipalHeader(principal_header));
        }

        let max_connections = match lookup("TASKBOARD_MAX_CONNECTIONS") {
            None => None,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(max) if max > 0 => Some(max),
                _ => return Err(ConfigError::MaxConnections(raw)),
            },
        };

        Ok(Self {
            database_url,
            bind,
            principal_header,
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_in(&[])).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.principal_header, "x-principal-id");
        assert_eq!(config.max_connections, None);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_in(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("TASKBOARD_BIND", "0.0.0.0:8080"),
            ("TASKBOARD_PRINCIPAL_HEADER", "X-Auth-User"),
            ("TASKBOARD_MAX_CONNECTIONS", "8"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.principal_header, "x-auth-user");
        assert_eq!(config.max_connections, Some(8));
    }

    #[test]
    fn test_bad_bind_address() {
        let err = Config::from_lookup(lookup_in(&[("TASKBOARD_BIND", "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::Bind { .. }));
    }

    #[test]
    fn test_bad_header_name() {
        let err = Config::from_lookup(lookup_in(&[("TASKBOARD_PRINCIPAL_HEADER", "x user")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::PrincipalHeader(_)));
    }

    #[test]
    fn test_bad_max_connections() {
        for raw in ["0", "-1", "many"] {
            let err = Config::from_lookup(lookup_in(&[("TASKBOARD_MAX_CONNECTIONS", raw)]))
                .unwrap_err();
            assert!(
                matches!(&err, ConfigError::MaxConnections(value) if value == raw),
                "{raw} should be rejected"
            );
        }
    }
}

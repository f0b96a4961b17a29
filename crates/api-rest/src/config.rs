//! REST server configuration, resolved once at startup.

use api_shared::{AuthError, Credentials};
use std::net::SocketAddr;

pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, thiserror::Error)]
pub enum ServerConfigError {
    #[error("invalid listen address '{addr}': {source}")]
    InvalidAddr {
        addr: String,
        source: std::net::AddrParseError,
    },
    #[error(transparent)]
    Auth(#[from] AuthError),
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    rest_addr: SocketAddr,
    credentials: Option<Credentials>,
}

impl ServerConfig {
    pub fn new(rest_addr: SocketAddr, credentials: Option<Credentials>) -> Self {
        Self {
            rest_addr,
            credentials,
        }
    }

    /// Build a configuration from raw values of `TRENDS_REST_ADDR`, `TRENDS_API_USER` and
    /// `TRENDS_API_PASSWORD`.
    pub fn from_env_values(
        rest_addr: Option<String>,
        user: Option<String>,
        password: Option<String>,
    ) -> Result<Self, ServerConfigError> {
        let addr = rest_addr
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_REST_ADDR.into());
        let rest_addr = addr
            .parse()
            .map_err(|source| ServerConfigError::InvalidAddr {
                addr: addr.clone(),
                source,
            })?;
        let credentials = Credentials::from_env_values(user, password)?;

        Ok(Self::new(rest_addr, credentials))
    }

    pub fn rest_addr(&self) -> SocketAddr {
        self.rest_addr
    }

    /// `None` means the data API is served without authentication.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ServerConfig::from_env_values(None, None, None).unwrap();
        assert_eq!(cfg.rest_addr().to_string(), DEFAULT_REST_ADDR);
        assert!(cfg.credentials().is_none());
    }

    #[test]
    fn test_rejects_bad_address() {
        let err = ServerConfig::from_env_values(Some("localhost".into()), None, None).unwrap_err();
        assert!(matches!(err, ServerConfigError::InvalidAddr { .. }));
    }

    #[test]
    fn test_rejects_half_configured_credentials() {
        let err =
            ServerConfig::from_env_values(None, None, Some("secret".into())).unwrap_err();
        assert!(matches!(err, ServerConfigError::Auth(AuthError::IncompleteConfig)));
    }
}

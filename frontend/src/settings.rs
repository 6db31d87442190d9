//! Front-end settings loaded via OrthoConfig.
//!
//! Values come from `FRONTEND_*` environment variables, configuration files
//! and command-line flags; anything unset falls back to the defaults below.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Errors raised when a configured value cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The backend URL does not parse or cannot carry paths.
    #[error("invalid backend url '{value}': {reason}")]
    BackendUrl {
        /// Configured value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The bind address is not `host:port`.
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        /// Configured value.
        value: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Where to listen and which backend to talk to.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FRONTEND")]
pub struct FrontendSettings {
    /// Root URL of the booking backend.
    pub backend_url: Option<String>,
    /// Per-call timeout for backend requests, in seconds.
    #[ortho_config(default = 5)]
    pub request_timeout_secs: u64,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
}

impl FrontendSettings {
    /// Parsed backend URL, `http://localhost:8000` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BackendUrl`] for unparsable URLs and for
    /// URLs such as `mailto:` that cannot have paths joined onto them.
    pub fn backend_url(&self) -> Result<Url, SettingsError> {
        let value = self.backend_url.as_deref().unwrap_or(DEFAULT_BACKEND_URL);
        let url = Url::parse(value).map_err(|err| SettingsError::BackendUrl {
            value: value.to_owned(),
            reason: err.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(SettingsError::BackendUrl {
                value: value.to_owned(),
                reason: "not a base URL".to_owned(),
            });
        }
        Ok(url)
    }

    /// Backend request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Listening address, `0.0.0.0:5000` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value is not `host:port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }
}

//! Reqwest-backed adapter for the remote booking backend.
//!
//! This adapter owns transport details only: appending paths to the base URL, the request
//! timeout, JSON encoding and decoding, and folding every failure into a
//! `{success: false, message}` envelope.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::ports::{BackendMethod, BackendRequest, BackendTransport};
use crate::domain::{BACKEND_UNREACHABLE, failure_envelope};

#[derive(Debug, thiserror::Error)]
enum TransportFailure {
    #[error("{}", BACKEND_UNREACHABLE)]
    Unreachable(#[source] reqwest::Error),
    #[error("{0}")]
    Request(#[source] reqwest::Error),
    #[error("invalid backend path: {0}")]
    Path(#[from] url::ParseError),
}

impl From<reqwest::Error> for TransportFailure {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::Unreachable(error)
        } else {
            Self::Request(error)
        }
    }
}

/// Backend transport performing one HTTP call per request.
#[derive(Debug, Clone)]
pub struct HttpBackendTransport {
    client: Client,
    base_url: Url,
}

impl HttpBackendTransport {
    /// Build a transport rooted at `base_url` with a per-call `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Append `path` to the base URL, keeping any prefix the base carries.
    fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{path}"))
    }

    async fn send(&self, request: &BackendRequest) -> Result<Value, TransportFailure> {
        let url = self.endpoint(&request.path)?;
        let builder = match request.method {
            BackendMethod::Get => self.client.get(url),
            BackendMethod::Post => {
                let builder = self.client.post(url);
                match &request.payload {
                    Some(payload) => builder.json(payload),
                    None => builder,
                }
            }
        };
        let response = builder.send().await?;
        debug!(
            path = %request.path,
            status = response.status().as_u16(),
            "backend responded"
        );
        // Failures arrive as JSON envelopes with 4xx statuses, so the body is
        // decoded whatever the status.
        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl BackendTransport for HttpBackendTransport {
    async fn call(&self, request: BackendRequest) -> Value {
        match self.send(&request).await {
            Ok(body) => body,
            Err(failure) => {
                warn!(
                    path = %request.path,
                    method = %request.method,
                    error = ?failure,
                    "backend call failed"
                );
                failure_envelope(failure.to_string())
            }
        }
    }
}

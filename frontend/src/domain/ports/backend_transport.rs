//! Driven port for calls to the remote booking backend.
//!
//! Outbound adapters implement this port to reach the backend over the
//! network. The contract is deliberately infallible: every failure comes back
//! as a `{success: false, message}` envelope so callers handle one shape.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

/// HTTP method used for a backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMethod {
    /// Read a collection or resource.
    Get,
    /// Submit a JSON payload.
    Post,
}

impl fmt::Display for BackendMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
        })
    }
}

/// A single call against the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendRequest {
    /// HTTP method.
    pub method: BackendMethod,
    /// Path and query, starting with `/api/`.
    pub path: String,
    /// JSON body for POST calls.
    pub payload: Option<Value>,
}

impl BackendRequest {
    /// A GET call for `path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: BackendMethod::Get,
            path: path.into(),
            payload: None,
        }
    }

    /// A POST call sending `payload` to `path`.
    pub fn post(path: impl Into<String>, payload: Value) -> Self {
        Self {
            method: BackendMethod::Post,
            path: path.into(),
            payload: Some(payload),
        }
    }
}

/// Port for performing one backend call.
///
/// Implementations make a single attempt with a bounded timeout and return
/// the parsed JSON body whatever the HTTP status.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendTransport: Send + Sync {
    /// Perform `request` and return the response body or a failure envelope.
    async fn call(&self, request: BackendRequest) -> Value;
}

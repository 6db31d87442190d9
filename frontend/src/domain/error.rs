//! Domain-level error type.
//!
//! Errors are transport agnostic. The HTTP adapter maps them onto status
//! codes and bodies; page handlers mostly avoid them altogether because
//! remote and validation failures are reported to users as flash messages.

use serde::{Deserialize, Serialize};

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// A collaborator (renderer, backend) could not serve the request.
    ServiceUnavailable,
    /// An unexpected error occurred inside the application.
    InternalError,
}

/// Domain error payload.
///
/// # Examples
/// ```
/// use frontend::domain::{Error, ErrorCode};
///
/// let err = Error::invalid_request("seats must not be empty");
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// assert_eq!(err.to_string(), "seats must not be empty");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl Error {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier of the request that produced the error.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach a correlation identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    ///
    /// Captures the trace identifier of the current request, when one is in
    /// scope, so the redacted response can still be correlated with logs.
    pub fn internal(message: impl Into<String>) -> Self {
        let error = Self::new(ErrorCode::InternalError, message);
        match TraceId::current() {
            Some(id) => error.with_trace_id(id.to_string()),
            None => error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
    #[case(Error::unauthorized("no"), ErrorCode::Unauthorized)]
    #[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
    #[case(Error::internal("boom"), ErrorCode::InternalError)]
    fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
        assert_eq!(error.code(), expected);
    }

    #[test]
    fn serialises_snake_case_code_and_omits_missing_trace_id() {
        let value = serde_json::to_value(Error::invalid_request("bad")).expect("serialise");
        assert_eq!(value, json!({ "code": "invalid_request", "message": "bad" }));
    }

    #[tokio::test]
    async fn internal_errors_capture_scoped_trace_id() {
        let trace_id: TraceId = "00000000-0000-0000-0000-000000000001"
            .parse()
            .expect("valid uuid");
        let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
        assert_eq!(
            error.trace_id(),
            Some("00000000-0000-0000-0000-000000000001")
        );
        let value = serde_json::to_value(&error).expect("serialise");
        assert_eq!(
            value.get("traceId").and_then(Value::as_str),
            Some("00000000-0000-0000-0000-000000000001")
        );
    }

    #[test]
    fn internal_errors_outside_a_request_have_no_trace_id() {
        assert!(Error::internal("boom").trace_id().is_none());
    }
}

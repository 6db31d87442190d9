//! Result shapes for remote backend calls.
//!
//! The backend answers action endpoints with a `{success, message?, ...}`
//! envelope and collection endpoints with a bare JSON array. Callers decode
//! into [`ActionResult`] or [`ListResult`] and pattern-match instead of
//! probing raw JSON.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::warn;

use super::catalogue::Record;

/// Message used when the backend cannot be reached or times out.
pub const BACKEND_UNREACHABLE: &str = "backend unreachable";

/// Build a `{success: false, message}` envelope.
///
/// # Examples
/// ```
/// use frontend::domain::failure_envelope;
/// use serde_json::json;
///
/// assert_eq!(
///     failure_envelope("invalid booking data"),
///     json!({ "success": false, "message": "invalid booking data" })
/// );
/// ```
pub fn failure_envelope(message: impl Into<String>) -> Value {
    json!({ "success": false, "message": message.into() })
}

/// Outcome of an action-style backend call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Whether the backend accepted the action.
    pub success: bool,
    /// Optional human-readable explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Remaining response fields, such as the `user` object on login.
    #[serde(flatten)]
    pub data: Record,
}

impl ActionResult {
    /// Local failure that never reached the backend.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: Record::new(),
        }
    }

    /// Decode a backend response leniently.
    ///
    /// A missing or non-boolean `success` counts as failure, a non-string
    /// `message` is dropped, and a response that is not an object at all
    /// becomes a failure.
    pub fn decode(value: Value) -> Self {
        let Value::Object(mut data) = value else {
            warn!("backend returned a non-object action response");
            return Self::failure("unexpected backend response");
        };
        let success = data
            .remove("success")
            .and_then(|flag| flag.as_bool())
            .unwrap_or(false);
        let message = match data.remove("message") {
            Some(Value::String(text)) => Some(text),
            _ => None,
        };
        Self {
            success,
            message,
            data,
        }
    }

    /// The backend's message, or `fallback` when it sent none.
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| fallback.to_owned())
    }
}

/// Outcome of decoding a collection response.
#[derive(Debug, Clone, PartialEq)]
pub enum ListResult<T> {
    /// The response was a list whose items all decoded.
    Ok(Vec<T>),
    /// The response was an envelope, a scalar, or held undecodable items.
    Malformed,
}

impl<T: DeserializeOwned> ListResult<T> {
    /// Decode a backend response into a typed list.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::{ListResult, Movie};
    /// use serde_json::json;
    ///
    /// let ok: ListResult<Movie> = ListResult::decode(json!([{ "id": 1, "name": "Dune" }]));
    /// assert_eq!(ok.into_items().len(), 1);
    ///
    /// let failed: ListResult<Movie> = ListResult::decode(json!({ "success": false }));
    /// assert!(failed.is_malformed());
    /// ```
    pub fn decode(value: Value) -> Self {
        let Value::Array(items) = value else {
            return Self::Malformed;
        };
        items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()
            .map_or(Self::Malformed, Self::Ok)
    }
}

impl<T> ListResult<T> {
    /// Whether decoding failed.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed)
    }

    /// Items of a well-formed list; a malformed response is an empty list.
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Ok(items) => items,
            Self::Malformed => Vec::new(),
        }
    }
}

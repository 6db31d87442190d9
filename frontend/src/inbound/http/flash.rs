//! One-shot notices carried in the session until the next rendered page.

use serde::{Deserialize, Serialize};

/// Severity of a flash message; doubles as its CSS class suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    /// Confirmation of a completed action.
    Success,
    /// A rejected action or failed call.
    Error,
}

/// A notice queued for the next page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    /// Severity.
    pub kind: FlashKind,
    /// Text shown to the user.
    pub message: String,
}

impl Flash {
    /// A success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    /// An error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialises_kind_in_lowercase() {
        assert_eq!(
            serde_json::to_value(Flash::error("Please login first")).expect("encodes"),
            json!({ "kind": "error", "message": "Please login first" })
        );
    }
}

//! API response envelopes
//!
//! The attendance API answers commands with `{ "msg": "..." }` and reports
//! failures with the same field. Some handlers use `message` instead.

use serde::{Deserialize, Serialize};

/// Confirmation payload of check-in/check-out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(alias = "message")]
    pub msg: String,
}

/// Error body returned with a non-2xx status
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// The structured message, if the server sent a non-empty one
    pub fn into_message(self) -> Option<String> {
        let non_blank = |m: &String| !m.trim().is_empty();
        self.msg.filter(non_blank).or(self.message.filter(non_blank))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_prefers_msg() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"msg":"Already checked in","message":"other"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Already checked in"));
    }

    #[test]
    fn blank_error_body_has_no_message() {
        let body: ErrorBody = serde_json::from_str(r#"{"msg":"  "}"#).unwrap();
        assert_eq!(body.into_message(), None);
    }

    #[test]
    fn blank_msg_falls_through_to_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"msg":"","message":"Employee ID is required"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Employee ID is required"));
    }
}

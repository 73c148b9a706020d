//! Client error types

use reqwest::StatusCode;
use shared::ErrorBody;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server rejected the request with a structured message
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// No session token to attach to an authenticated call
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Session persistence failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Build an error from a non-success response.
    ///
    /// A JSON body carrying `msg`/`message` wins over the status mapping.
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        if let Some(message) = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(ErrorBody::into_message)
        {
            return ClientError::Api {
                status: status.as_u16(),
                message,
            };
        }

        let text = body.to_string();
        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(text),
            StatusCode::NOT_FOUND => ClientError::NotFound(text),
            StatusCode::BAD_REQUEST => ClientError::Validation(text),
            _ => ClientError::Internal(text),
        }
    }

    /// The server's own message, when it sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => Some(message),
            _ => None,
        }
    }

    /// HTTP status the error came with, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            ClientError::Unauthorized => Some(StatusCode::UNAUTHORIZED.as_u16()),
            _ => None,
        }
    }

    /// Whether the request never got an answer from the server
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Http(e) if e.status().is_none())
    }

    /// Human-readable message for the UI: the server's message, else `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::NotAuthenticated => self.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side error types for calls against the wellness API.

use serde::Deserialize;

/// Error returned by the API client and the typed API modules.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success status passed through from the backend.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The access token could not be refreshed; the session has been cleared.
    #[error("Session expired")]
    SessionExpired,

    /// The backend answered 2xx but with `success: false`.
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Unexpected response body: {0}")]
    Decode(String),

    /// Request failed client-side validation and was not sent.
    #[error("Invalid request: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Minimal view of an error body; the backend puts a human message here.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// Build a status error from a non-success response body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_default();
        ApiError::Status { status, message }
    }

    /// True for a 401 that reached the caller (i.e. after the retry path).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401, .. } | ApiError::SessionExpired)
    }

    /// Message suitable for showing to the user, or `fallback` when the
    /// backend did not provide one.
    pub fn user_message(&self, fallback: &str) -> String {
        let message = match self {
            ApiError::Status { message, .. } | ApiError::Rejected(message) => message.as_str(),
            _ => "",
        };

        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message.to_string()
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Result type alias for API calls
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_reads_message_field() {
        let err = ApiError::from_status(400, r#"{"success":false,"message":"Phone already registered"}"#);
        assert!(matches!(err, ApiError::Status { status: 400, .. }));
        assert_eq!(err.user_message("Something went wrong"), "Phone already registered");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ApiError::from_status(500, "<html>Bad Gateway</html>");
        assert_eq!(err.user_message("Something went wrong"), "Something went wrong");

        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.user_message("Try again later"), "Try again later");
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(ApiError::SessionExpired.is_unauthorized());
        assert!(ApiError::from_status(401, "").is_unauthorized());
        assert!(!ApiError::from_status(403, "").is_unauthorized());
    }
}

//! Error taxonomy shared by the backend transport and the views.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here is retried. Every failure ends up as a dismissible notice in
//! the initiating view, so errors are `Clone` and comparable to live inside
//! reactive state.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failures surfaced by the hosted backend or the transport in front of it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The request never produced a response (network, CORS, aborted fetch).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The auth-state subscription could not be registered.
    #[error("auth subscription failed: {0}")]
    Subscribe(String),

    /// Browser-only transport invoked outside the browser.
    #[error("backend not available outside the browser")]
    Unavailable,
}

impl ServiceError {
    /// Build a status error from a response body, preferring the backend's own message.
    pub fn from_status(status: u16, body: &str) -> Self {
        Self::Status { status, message: status_message(status, body) }
    }

    /// HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors reported to a view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    /// An operation needed a signed-in user and there was none.
    #[error("Not authenticated")]
    Unauthenticated,

    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A local precondition failed before any request was made.
    #[error("{0}")]
    Validation(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Errors raised while reading backend configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing config value: {var}")]
    Missing { var: String },

    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
}

/// Pull a human-readable message out of an error body.
///
/// The auth, rest, and storage endpoints disagree on the field name, so each
/// known one is tried before falling back to the raw text.
fn status_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error_description", "msg", "error"] {
            if let Some(text) = value.get(key).and_then(serde_json::Value::as_str) {
                if !text.is_empty() {
                    return text.to_owned();
                }
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() { format!("request failed: {status}") } else { trimmed.to_owned() }
}

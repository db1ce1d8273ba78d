//! Error taxonomy for calls to the exam API and local validation.
//!
//! Every error is caught at the component boundary that issued the call and
//! turned into a single [`crate::application::Alert`]; see
//! [`AppError::user_message`]. A missing credential is not an error: services
//! return `Ok(None)` for it instead.

use serde_json::Value;

/// Alert text for a create-exam form with empty fields.
pub const VALIDATION_MESSAGE: &str = "All fields are required!";

/// Alert text when the API could not be reached.
pub const TRANSPORT_MESSAGE: &str = "Error, please try again in a few seconds!";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// One or more required fields are empty. The request was never sent.
    #[error("validation failed: {message}")]
    Validation { message: String, fields: Vec<String> },

    /// The API answered with an error status and a human-readable body.
    #[error("server responded with {status}: {message}")]
    Server { status: u16, message: String },

    /// No usable response was received (connect failure, timeout, bad body).
    #[error("transport error: {reason}")]
    Transport { reason: String },
}

impl AppError {
    pub fn validation(fields: Vec<String>) -> Self {
        Self::Validation {
            message: VALIDATION_MESSAGE.to_string(),
            fields,
        }
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// Builds a server error from a raw response body.
    ///
    /// A JSON string body is unquoted; a JSON object contributes its `message`
    /// or `error` field; anything else is shown as-is.
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<Value>(body) {
            Ok(Value::String(text)) => text,
            Ok(Value::Object(map)) => map
                .get("message")
                .or_else(|| map.get("error"))
                .and_then(message_text)
                .unwrap_or_else(|| body.to_string()),
            _ => body.to_string(),
        };

        Self::server(status, message)
    }

    /// The text shown to the user for this error.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Validation { message, .. } => message,
            Self::Server { message, .. } => message,
            Self::Transport { .. } => TRANSPORT_MESSAGE,
        }
    }
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Object(inner) => inner
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        Self::transport(e.to_string())
    }
}

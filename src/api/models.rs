use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard response wrapper used by every endpoint of the merchant API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

/// Error body returned with non-2xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
    pub status: Option<u16>,
}

/// Comprehensive error type for API operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 400 Bad Request
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// 401 Unauthorized
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// 403 Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Deserialization error
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}

impl ApiError {
    /// Map a non-2xx status and its body to an error.
    ///
    /// The JSON `message` field is preferred over the raw body when present.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|err| err.message.or(err.error))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| body.to_string());

        match status {
            400 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            500..=599 => ApiError::ServerError(status, message),
            _ => ApiError::HttpError(status, message),
        }
    }

    /// HTTP status that produced this error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::BadRequest(_) => Some(400),
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::ServerError(code, _) | ApiError::HttpError(code, _) => Some(*code),
            ApiError::RequestError(_) | ApiError::DeserializationError(_) => None,
        }
    }

    /// User-facing notification text, keyed by HTTP status
    pub fn notification(&self) -> String {
        let text = match self {
            ApiError::BadRequest(msg) => return format!("Bad Request: {}", fallback(msg)),
            ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::ServerError(_, msg)
            | ApiError::HttpError(_, msg)
            | ApiError::RequestError(msg)
            | ApiError::DeserializationError(msg) => msg,
        };
        fallback(text).to_string()
    }
}

fn fallback(msg: &str) -> &str {
    if msg.trim().is_empty() {
        "An unexpected error occurred"
    } else {
        msg
    }
}

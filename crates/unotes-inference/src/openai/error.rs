//! OpenAI-specific error handling.

use unotes_core::Error;

/// Upstream failure classes, derived from HTTP status and error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorCode {
    /// Invalid authentication credentials.
    AuthenticationError,
    /// Rate limit or quota exceeded.
    RateLimitExceeded,
    /// Model not found or not available.
    ModelNotFound,
    /// Prompt plus requested output exceeds the context window.
    ContextLengthExceeded,
    /// Server error.
    ServerError,
    /// Unknown error.
    Unknown,
}

impl UpstreamErrorCode {
    /// Determine error code from HTTP status, error type and error code.
    ///
    /// OpenAI reports most request errors with type `invalid_request_error` and
    /// puts the specific reason (`context_length_exceeded`, `model_not_found`)
    /// in `code`, so both are checked.
    pub fn from_response(status: u16, error_type: &str, code: Option<&str>) -> Self {
        let code = code.unwrap_or("");
        let either = |needle: &str| error_type.contains(needle) || code.contains(needle);

        match status {
            401 => Self::AuthenticationError,
            _ if either("context_length") => Self::ContextLengthExceeded,
            429 => Self::RateLimitExceeded,
            _ if either("insufficient_quota") => Self::RateLimitExceeded,
            404 => Self::ModelNotFound,
            _ if either("model_not_found") => Self::ModelNotFound,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    /// Whether a caller could reasonably retry. Informational only; nothing here retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimitExceeded | Self::ServerError)
    }
}

/// Convert an upstream failure into the core error, keeping the message.
pub fn to_unotes_error(code: UpstreamErrorCode, message: &str) -> Error {
    let message = match code {
        UpstreamErrorCode::AuthenticationError => format!("Authentication failed: {}", message),
        UpstreamErrorCode::RateLimitExceeded => format!("Rate limit exceeded: {}", message),
        UpstreamErrorCode::ModelNotFound => format!("Model not found: {}", message),
        UpstreamErrorCode::ContextLengthExceeded => format!("Context too long: {}", message),
        UpstreamErrorCode::ServerError => format!("Server error: {}", message),
        UpstreamErrorCode::Unknown => message.to_string(),
    };
    Error::UpstreamInvocation(message)
}

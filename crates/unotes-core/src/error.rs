//! Error types for the unotes tutor service.

use thiserror::Error;

use crate::models::Mode;

/// Result type alias using the unotes Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for tutor orchestration.
#[derive(Error, Debug)]
pub enum Error {
    /// No explicit mode and nothing to infer one from.
    #[error("Cannot determine AI mode. Provide either mode, userQuestion, or imageUrl.")]
    AmbiguousMode,

    /// The resolved mode is missing one of its mandatory inputs.
    #[error("{mode} requires {field}")]
    MissingRequiredField { mode: Mode, field: &'static str },

    /// An explicit `mode` value outside the known set.
    #[error("Invalid mode: {0}")]
    InvalidMode(String),

    /// The model call failed (network, auth, quota, malformed response).
    #[error("Upstream invocation error: {0}")]
    UpstreamInvocation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// True for failures the caller can only fix by sending a different request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::AmbiguousMode | Error::MissingRequiredField { .. } | Error::InvalidMode(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::UpstreamInvocation(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_ambiguous_mode() {
        let err = Error::AmbiguousMode;
        assert_eq!(
            err.to_string(),
            "Cannot determine AI mode. Provide either mode, userQuestion, or imageUrl."
        );
    }

    #[test]
    fn test_error_display_missing_field() {
        let err = Error::MissingRequiredField {
            mode: Mode::Auto,
            field: "imageUrl",
        };
        assert_eq!(err.to_string(), "AUTO_MODE requires imageUrl");
    }

    #[test]
    fn test_error_display_invalid_mode() {
        let err = Error::InvalidMode("SUMMARY_MODE".to_string());
        assert_eq!(err.to_string(), "Invalid mode: SUMMARY_MODE");
    }

    #[test]
    fn test_error_display_upstream() {
        let err = Error::UpstreamInvocation("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Upstream invocation error: quota exceeded");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("missing API key".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing API key");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(Error::AmbiguousMode.is_client_error());
        assert!(Error::InvalidMode("x".into()).is_client_error());
        assert!(Error::MissingRequiredField {
            mode: Mode::Chat,
            field: "userQuestion"
        }
        .is_client_error());

        assert!(!Error::UpstreamInvocation("boom".into()).is_client_error());
        assert!(!Error::Config("bad".into()).is_client_error());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}

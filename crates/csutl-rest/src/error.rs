//! Error types for REST API operations

use csutl_auth::AuthError;
use csutl_stats::StatsError;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Caller supplied a structurally invalid input
    #[error("Invalid argument ({field}): {message}")]
    InvalidArgument {
        /// Offending input
        field: &'static str,
        /// Human-readable reason
        message: String,
    },

    /// Credentials could not be resolved for a signed request
    #[error("Configuration error: {0}")]
    Configuration(#[from] AuthError),

    /// Response envelope reported a failure
    #[error("API error: status={status}, message={message}")]
    ApiStatus {
        /// `status` field from the response
        status: String,
        /// `message` field from the response
        message: String,
    },

    /// Response could not be parsed into the expected structure
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure reported by a non-HTTP transport
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Broad classification of a [`RestError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid input from the caller
    InvalidArgument,
    /// Missing credentials
    Configuration,
    /// Exchange rejected the request or answered with something unparseable
    ApiStatus,
    /// Network or transport failure
    Transport,
}

impl RestError {
    /// Create an invalid argument error
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::ApiStatus { .. } | Self::MalformedResponse(_) => ErrorKind::ApiStatus,
            Self::Http(_) | Self::Transport(_) => ErrorKind::Transport,
        }
    }
}

impl From<StatsError> for RestError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::InvalidArgument { field, message } => Self::InvalidArgument { field, message },
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(RestError::invalid("path", "empty").kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            RestError::from(AuthError::EnvVarNotSet("COINSPOT_API_KEY".into())).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            RestError::MalformedResponse("not json".into()).kind(),
            ErrorKind::ApiStatus
        );
        assert_eq!(RestError::Transport("refused".into()).kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_api_status_display() {
        let err = RestError::ApiStatus {
            status: "error".into(),
            message: "invalid coin".into(),
        };
        let text = err.to_string();
        assert!(text.contains("status=error"));
        assert!(text.contains("invalid coin"));
    }

    #[test]
    fn test_stats_error_maps_to_invalid_argument() {
        let err = RestError::from(StatsError::InvalidArgument {
            field: "pstdev_index",
            message: "population standard deviation is zero".into(),
        });
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("pstdev_index"));
    }
}

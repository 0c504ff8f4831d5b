//! Error types for statistics computation

/// Errors raised while summarizing a price series
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    /// Input cannot be summarized, or a derived value would divide by zero
    #[error("Invalid argument ({field}): {message}")]
    InvalidArgument {
        /// Value that could not be computed
        field: &'static str,
        /// Human-readable reason
        message: String,
    },
}

impl StatsError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            message: message.into(),
        }
    }

    /// Name of the value that could not be computed
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidArgument { field, .. } => field,
        }
    }
}

/// Result type for statistics operations
pub type StatsResult<T> = Result<T, StatsError>;

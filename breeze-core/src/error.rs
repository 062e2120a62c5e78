//! Error types for the breeze channel stack.

/// Error type for channel configuration and transport factory operations.
///
/// Every failure in this stack is a synchronous, local precondition
/// violation raised at the call site. Nothing here is retryable: callers
/// fix the argument, or obtain a new factory, and call again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChannelError {
    /// An argument failed validation (empty name, zero size limit, wrong
    /// address kind).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation exists on the shared builder contract but has no
    /// meaning for this transport kind.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// The transport factory has already been closed.
    #[error("the transport factory is closed")]
    FactoryClosed,
}

impl ChannelError {
    /// Create an invalid-argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create an unsupported-operation error.
    #[must_use]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedOperation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChannelError::invalid_argument("name must not be empty");
        assert_eq!(err.to_string(), "invalid argument: name must not be empty");

        let err = ChannelError::FactoryClosed;
        assert_eq!(err.to_string(), "the transport factory is closed");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(ChannelError::FactoryClosed, ChannelError::FactoryClosed);
        assert_ne!(
            ChannelError::invalid_argument("a"),
            ChannelError::unsupported("a")
        );
    }
}

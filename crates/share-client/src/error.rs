//! Error taxonomy for remote store operations

use thiserror::Error;

/// Errors returned by [`ShareClient`](crate::ShareClient) implementations
#[derive(Error, Debug)]
pub enum ShareError {
    /// Share or path does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Handle or credentials are unusable (surfaced upward unmodified)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The requested byte range no longer exists on the remote object
    #[error("InvalidRange: requested {length} bytes at offset {offset}, file has {actual} bytes")]
    RangeInvalid { offset: u64, length: u64, actual: u64 },

    /// Local I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network, timeout or any other failure worth retrying later
    #[error("{0}")]
    Transient(#[from] anyhow::Error),
}

impl ShareError {
    /// Whether this error means the requested range is gone (file truncated or rotated)
    ///
    /// Backends that only report a message are matched on the wording remote
    /// stores use for this condition.
    pub fn is_range_invalid(&self) -> bool {
        match self {
            Self::RangeInvalid { .. } => true,
            Self::NotFound(_) | Self::Configuration(_) => false,
            Self::Io(e) => message_indicates_invalid_range(&e.to_string()),
            Self::Transient(e) => message_indicates_invalid_range(&e.to_string()),
        }
    }

    /// Convenience for building transient errors from a message
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient(anyhow::anyhow!(message.into()))
    }
}

fn message_indicates_invalid_range(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("invalidrange")
        || lower.contains("invalid range")
        || lower.contains("range not satisfiable")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_range_invalid() {
        let err = ShareError::RangeInvalid {
            offset: 10,
            length: 5,
            actual: 3,
        };
        assert!(err.is_range_invalid());
        assert!(err.to_string().starts_with("InvalidRange"));
    }

    #[test]
    fn test_message_range_invalid() {
        assert!(ShareError::transient("HTTP 416 Range Not Satisfiable").is_range_invalid());
        assert!(ShareError::transient("The range specified is invalid: InvalidRange").is_range_invalid());
        assert!(!ShareError::transient("connection reset by peer").is_range_invalid());
    }

    #[test]
    fn test_other_errors_are_not_range_errors() {
        assert!(!ShareError::NotFound("x".into()).is_range_invalid());
        assert!(!ShareError::Configuration("bad key".into()).is_range_invalid());
    }
}

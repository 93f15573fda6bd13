use thiserror::Error;

use crate::chat::SessionId;

/// Errors from the durable storage slot and the session list codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The stored blob is not a valid session list.
    #[error("malformed session data: {0}")]
    Parse(String),

    #[error("storage I/O error: {0}")]
    Io(String),

    #[error("failed to encode session data: {0}")]
    Encode(String),
}

/// Errors from a call to the remote assistant.
///
/// Every variant is presented to the user the same way; the distinction
/// only matters for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssistantError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("client setup failed: {0}")]
    Client(String),
}

/// Rejected submissions and lifecycle calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("a message is already being sent")]
    SubmissionInFlight,

    #[error("trip '{0}' not found")]
    UnknownSession(SessionId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Parse("expected value at line 1".to_string());
        assert_eq!(
            err.to_string(),
            "malformed session data: expected value at line 1"
        );
    }

    #[test]
    fn test_assistant_error_display() {
        let err = AssistantError::Status {
            status: 500,
            body: "Failed to initialize agent".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: Failed to initialize agent");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::UnknownSession(SessionId::new("abc123"));
        assert_eq!(err.to_string(), "trip 'abc123' not found");
    }
}

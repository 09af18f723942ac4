//! Domain error types.

use thiserror::Error;

/// Failure to hand an encoded message to a connection's send queue
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessagePushError {
    /// No send queue is registered for the connection
    #[error("client '{0}' is not registered")]
    ClientNotFound(String),

    /// The send queue exists but its receiving half is gone
    #[error("failed to push message: {0}")]
    PushFailed(String),
}

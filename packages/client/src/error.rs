//! Error types for the terminal client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection could not be opened or was lost
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Request the server would never accept (retrying cannot help)
    #[error("Protocol error: {0}")]
    Protocol(String),
}

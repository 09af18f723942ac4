//! UseCase のエラー型

use thiserror::Error;

/// Reasons a usecase declines to act on a connection.
///
/// None of these reach the client; the router logs them and drops the message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The connection has not completed LOGIN
    #[error("connection has not logged in")]
    NotLoggedIn,
}

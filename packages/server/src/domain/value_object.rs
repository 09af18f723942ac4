//! Value objects.

use std::fmt;

use uuid::Uuid;

/// Identity of one accepted connection.
///
/// Generated by the server at accept time; never derived from client input, so
/// two connections using the same nickname remain distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

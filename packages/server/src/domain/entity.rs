//! Per-connection state.

use super::value_object::ConnectionId;

/// Metadata attached to one connection.
///
/// Owned by the connection's own worker and handed to the router by `&mut`,
/// so no other connection can ever mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionAttributes {
    /// Nickname from LOGIN; `None` until the connection has logged in
    pub nickname: Option<String>,
    /// Peer address recorded at login
    pub remote_address: Option<String>,
    /// Unix timestamp (milliseconds) of the last successful flower shower
    pub last_flower_time: Option<i64>,
}

/// A connection as seen by the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSession {
    pub id: ConnectionId,
    /// Textual peer address known from accept time
    pub peer_address: String,
    pub attributes: ConnectionAttributes,
}

impl ConnectionSession {
    /// Create an anonymous session with empty attributes
    pub fn new(id: ConnectionId, peer_address: impl Into<String>) -> Self {
        Self {
            id,
            peer_address: peer_address.into(),
            attributes: ConnectionAttributes::default(),
        }
    }

    pub fn nickname(&self) -> Option<&str> {
        self.attributes.nickname.as_deref()
    }

    /// Whether LOGIN has completed for this connection
    pub fn is_authenticated(&self) -> bool {
        self.attributes.nickname.is_some()
    }

    /// Record a successful LOGIN
    pub fn authenticate(&mut self, nickname: impl Into<String>) {
        self.attributes.nickname = Some(nickname.into());
        self.attributes.remote_address = Some(self.peer_address.clone());
    }
}

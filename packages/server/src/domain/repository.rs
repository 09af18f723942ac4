//! OnlineRegistry trait 定義
//!
//! ログイン済み接続の集合へのインターフェース。
//! UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。

use async_trait::async_trait;

use super::value_object::ConnectionId;

/// The set of connections that completed LOGIN and have not left yet.
///
/// Implementations synchronize internally; callers never lock.
#[async_trait]
pub trait OnlineRegistry: Send + Sync {
    /// Add a connection (no-op if present) and return the size afterwards
    async fn add(&self, id: ConnectionId) -> usize;

    /// Remove a connection (no-op if absent) and return the size afterwards
    async fn remove(&self, id: &ConnectionId) -> usize;

    async fn contains(&self, id: &ConnectionId) -> bool;

    /// Current number of members
    async fn size(&self) -> usize;

    /// Point-in-time copy of the members, safe to iterate while others mutate
    async fn snapshot(&self) -> Vec<ConnectionId>;
}

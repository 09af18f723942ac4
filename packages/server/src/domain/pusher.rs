//! MessagePusher trait 定義
//!
//! ルーターが接続ごとの送信キューへメッセージを積むためのインターフェース。
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, value_object::ConnectionId};

/// Per-connection outbound queue. Unbounded, so enqueueing never blocks, and
/// FIFO, so per-connection order matches the order the router pushed.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Delivery of encoded messages to individual connections
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register the send queue of a newly accepted connection
    async fn register_client(&self, client_id: ConnectionId, sender: PusherChannel);

    /// Drop the send queue of a closed connection
    async fn unregister_client(&self, client_id: &ConnectionId);

    /// Enqueue one encoded message for a single connection
    async fn push_to(&self, client_id: &ConnectionId, content: &str)
    -> Result<(), MessagePushError>;
}

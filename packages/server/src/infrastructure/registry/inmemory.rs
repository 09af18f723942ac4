//! InMemory OnlineRegistry 実装
//!
//! ドメイン層が定義する OnlineRegistry trait の具体的な実装。
//! `HashSet` を Mutex で保護し、ログイン済み接続の集合として使用します。

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, OnlineRegistry};

/// インメモリ OnlineRegistry 実装
///
/// Every operation takes the lock once, so `add`/`remove` and the size they
/// report are atomic with respect to each other.
#[derive(Debug, Default)]
pub struct InMemoryOnlineRegistry {
    members: Mutex<HashSet<ConnectionId>>,
}

impl InMemoryOnlineRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OnlineRegistry for InMemoryOnlineRegistry {
    async fn add(&self, id: ConnectionId) -> usize {
        let mut members = self.members.lock().await;
        if members.insert(id) {
            tracing::debug!("Connection '{}' added to online registry", id);
        }
        members.len()
    }

    async fn remove(&self, id: &ConnectionId) -> usize {
        let mut members = self.members.lock().await;
        if members.remove(id) {
            tracing::debug!("Connection '{}' removed from online registry", id);
        }
        members.len()
    }

    async fn contains(&self, id: &ConnectionId) -> bool {
        self.members.lock().await.contains(id)
    }

    async fn size(&self) -> usize {
        self.members.lock().await.len()
    }

    async fn snapshot(&self) -> Vec<ConnectionId> {
        self.members.lock().await.iter().copied().collect()
    }
}

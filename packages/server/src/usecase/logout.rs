//! UseCase: ログアウト（切断）処理

use std::sync::Arc;

use hanami_shared::{protocol::Message, time::Clock};

use crate::domain::{ConnectionSession, MessagePusher, OnlineRegistry, policy::notice};

use super::{broadcast::broadcast_each, error::SessionError};

/// ログアウトのユースケース
pub struct LogoutUseCase {
    registry: Arc<dyn OnlineRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl LogoutUseCase {
    pub fn new(
        registry: Arc<dyn OnlineRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            clock,
        }
    }

    /// ログアウトを実行
    ///
    /// Removes the connection from the registry first, then tells the remaining
    /// members `<nickname> left` with the post-departure online count. The
    /// departing connection is not sent its own notice.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 残りのオンライン数
    /// * `Err(SessionError::NotLoggedIn)` - 未ログインの接続（何もしない）
    pub async fn execute(&self, session: &ConnectionSession) -> Result<usize, SessionError> {
        let nickname = session.nickname().ok_or(SessionError::NotLoggedIn)?;

        let online_count = self.registry.remove(&session.id).await;
        let left = notice::left(nickname);
        let delivered = broadcast_each(
            self.registry.as_ref(),
            self.message_pusher.as_ref(),
            |_| Message::system(self.clock.now_millis(), online_count, left.clone()),
        )
        .await;

        tracing::info!(
            "'{}' logged out ({} online, announced to {})",
            nickname,
            online_count,
            delivered
        );
        Ok(online_count)
    }
}

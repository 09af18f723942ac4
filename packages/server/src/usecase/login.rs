//! UseCase: ログイン処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LoginUseCase::execute() メソッド
//! - ニックネーム設定、オンライン登録、SYSTEM 通知のブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：最初の参加者、後から参加する参加者
//! - 異常系：空のニックネーム
//! - エッジケース：ログイン済み接続からの再ログイン

use std::sync::Arc;

use hanami_shared::{protocol::Message, time::Clock};

use crate::domain::{ConnectionSession, MessagePusher, OnlineRegistry, policy::notice};

use super::{broadcast::broadcast_each, error::SessionError};

/// ログインのユースケース
pub struct LoginUseCase {
    registry: Arc<dyn OnlineRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl LoginUseCase {
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

    /// ログインを実行
    ///
    /// Marks the session as authenticated, adds it to the online registry and
    /// announces it to every member: the new connection is told it is connected,
    /// everyone else that `<nickname> joined`. Any decoded nickname is accepted,
    /// blank ones included.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - オンライン数（追加後）
    pub async fn execute(
        &self,
        session: &mut ConnectionSession,
        nickname: String,
    ) -> Result<usize, SessionError> {
        session.authenticate(nickname.as_str());
        let online_count = self.registry.add(session.id).await;

        let self_id = session.id;
        let joined = notice::joined(&nickname);
        let delivered = broadcast_each(
            self.registry.as_ref(),
            self.message_pusher.as_ref(),
            |recipient| {
                let content = if *recipient == self_id {
                    notice::connected()
                } else {
                    joined.clone()
                };
                Message::system(self.clock.now_millis(), online_count, content)
            },
        )
        .await;

        tracing::info!(
            "'{}' logged in from {} ({} online, announced to {})",
            nickname,
            session.peer_address,
            online_count,
            delivered
        );

        Ok(online_count)
    }
}

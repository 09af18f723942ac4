//! UseCase: チャット送信処理

use std::sync::Arc;

use hanami_shared::{protocol::Message, time::Clock};

use crate::domain::{ConnectionSession, MessagePusher, OnlineRegistry, SELF_LABEL};

use super::{broadcast::broadcast_each, error::SessionError};

/// チャット送信のユースケース
pub struct ChatUseCase {
    registry: Arc<dyn OnlineRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ChatUseCase {
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

    /// チャットをブロードキャスト
    ///
    /// Every online member gets a copy stamped with the current server time.
    /// The originator sees itself as `you`, everyone else sees its nickname.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 配信できた宛先数
    /// * `Err(SessionError::NotLoggedIn)` - 未ログインの接続
    pub async fn execute(
        &self,
        session: &ConnectionSession,
        content: Option<String>,
    ) -> Result<usize, SessionError> {
        let nickname = session.nickname().ok_or(SessionError::NotLoggedIn)?;
        let self_id = session.id;

        let delivered = broadcast_each(
            self.registry.as_ref(),
            self.message_pusher.as_ref(),
            |recipient| {
                let sender = if *recipient == self_id {
                    SELF_LABEL
                } else {
                    nickname
                };
                Message::chat(self.clock.now_millis(), sender, content.clone())
            },
        )
        .await;

        tracing::debug!("Chat from '{}' delivered to {} clients", nickname, delivered);
        Ok(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{START_TIME, TestHarness, drain};

    #[tokio::test]
    async fn test_chat_relabels_sender_per_recipient() {
        // テスト項目: 送信者本人には you、他の参加者にはニックネームで届く
        // given (前提条件):
        let harness = TestHarness::new();
        let login = harness.login_usecase();
        let usecase = harness.chat_usecase();
        let (mut alice, mut alice_rx) = harness.connect("10.0.0.1:1000").await;
        let (mut bob, mut bob_rx) = harness.connect("10.0.0.2:2000").await;
        login.execute(&mut alice, "Alice".to_string()).await.unwrap();
        login.execute(&mut bob, "Bob".to_string()).await.unwrap();
        drain(&mut alice_rx);
        drain(&mut bob_rx);
        harness.clock.advance(1_234);

        // when (操作):
        let result = usecase
            .execute(&alice, Some("hello".to_string()))
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(2));
        assert_eq!(
            drain(&mut alice_rx),
            vec![Message::chat(START_TIME + 1_234, "you", Some("hello".to_string()))]
        );
        assert_eq!(
            drain(&mut bob_rx),
            vec![Message::chat(START_TIME + 1_234, "Alice", Some("hello".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_anonymous_chat_is_rejected() {
        // テスト項目: 未ログインの接続からのチャットは誰にも届かない
        // given (前提条件):
        let harness = TestHarness::new();
        let login = harness.login_usecase();
        let usecase = harness.chat_usecase();
        let (mut alice, mut alice_rx) = harness.connect("10.0.0.1:1000").await;
        let (stranger, mut stranger_rx) = harness.connect("10.0.0.9:9000").await;
        login.execute(&mut alice, "Alice".to_string()).await.unwrap();
        drain(&mut alice_rx);

        // when (操作):
        let result = usecase
            .execute(&stranger, Some("psst".to_string()))
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(SessionError::NotLoggedIn));
        assert!(drain(&mut alice_rx).is_empty());
        assert!(drain(&mut stranger_rx).is_empty());
    }
}

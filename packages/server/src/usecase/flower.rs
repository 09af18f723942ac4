//! UseCase: フラワー送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendFlowerUseCase::execute() メソッド
//! - 10 秒間のレート制限と、送信者本人 / 他の参加者ごとの文言
//!
//! ### どのような状況を想定しているか
//! - 正常系：初回送信、クールダウン経過後の再送信
//! - 異常系：クールダウン中の再送信（本人のみに拒否通知）
//! - エッジケース：未ログインの接続

use std::sync::Arc;

use hanami_shared::{protocol::Message, time::Clock};

use crate::domain::{
    ConnectionSession, FlowerDecision, MessagePusher, OnlineRegistry, SELF_LABEL,
    check_flower_cooldown, policy::notice,
};

use super::{broadcast::broadcast_each, error::SessionError};

/// Result of a flower request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowerOutcome {
    /// Broadcast to `recipients` clients
    Showered { recipients: usize },
    /// Rejected by the rate limit; only the originator was told
    Throttled { remaining_secs: i64 },
}

/// フラワー送信のユースケース
pub struct SendFlowerUseCase {
    registry: Arc<dyn OnlineRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendFlowerUseCase {
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

    /// Send a flower shower, subject to the per-connection cooldown.
    ///
    /// A throttled request leaves `last_flower_time` untouched and reaches no one
    /// but the originator.
    pub async fn execute(
        &self,
        session: &mut ConnectionSession,
    ) -> Result<FlowerOutcome, SessionError> {
        let nickname = session
            .nickname()
            .ok_or(SessionError::NotLoggedIn)?
            .to_string();
        let now = self.clock.now_millis();

        if let FlowerDecision::Throttled { remaining_secs } =
            check_flower_cooldown(session.attributes.last_flower_time, now)
        {
            let rejection =
                Message::notice(now, SELF_LABEL, notice::flower_throttled(remaining_secs));
            if let Err(e) = self
                .message_pusher
                .push_to(&session.id, &rejection.to_wire())
                .await
            {
                tracing::warn!("Failed to push flower rejection to '{}': {}", session.id, e);
            }
            tracing::debug!(
                "Flower from '{}' throttled, {}s remaining",
                nickname,
                remaining_secs
            );
            return Ok(FlowerOutcome::Throttled { remaining_secs });
        }

        session.attributes.last_flower_time = Some(now);

        let self_id = session.id;
        let from_others = notice::flower_from(&nickname);
        let recipients = broadcast_each(
            self.registry.as_ref(),
            self.message_pusher.as_ref(),
            |recipient| {
                let timestamp = self.clock.now_millis();
                if *recipient == self_id {
                    Message::flower(timestamp, SELF_LABEL, Some(notice::flower_from_you()))
                } else {
                    Message::flower(timestamp, nickname.as_str(), Some(from_others.clone()))
                }
            },
        )
        .await;

        tracing::info!("'{}' sent flowers to {} clients", nickname, recipients);
        Ok(FlowerOutcome::Showered { recipients })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::FLOWER_COOLDOWN_MILLIS,
        usecase::test_support::{START_TIME, TestHarness, drain},
    };
    use hanami_shared::protocol::Command;

    async fn two_logged_in(
        harness: &TestHarness,
    ) -> (
        ConnectionSession,
        tokio::sync::mpsc::UnboundedReceiver<String>,
        ConnectionSession,
        tokio::sync::mpsc::UnboundedReceiver<String>,
    ) {
        let login = harness.login_usecase();
        let (mut alice, mut alice_rx) = harness.connect("10.0.0.1:1000").await;
        let (mut bob, mut bob_rx) = harness.connect("10.0.0.2:2000").await;
        login.execute(&mut alice, "Alice".to_string()).await.unwrap();
        login.execute(&mut bob, "Bob".to_string()).await.unwrap();
        drain(&mut alice_rx);
        drain(&mut bob_rx);
        (alice, alice_rx, bob, bob_rx)
    }

    #[tokio::test]
    async fn test_first_flower_is_broadcast() {
        // テスト項目: 初回のフラワーは全員に届き、文言が宛先ごとに異なる
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = harness.flower_usecase();
        let (mut alice, mut alice_rx, _bob, mut bob_rx) = two_logged_in(&harness).await;

        // when (操作):
        let result = usecase.execute(&mut alice).await;

        // then (期待する結果):
        assert_eq!(result, Ok(FlowerOutcome::Showered { recipients: 2 }));
        assert_eq!(alice.attributes.last_flower_time, Some(START_TIME));
        assert_eq!(
            drain(&mut alice_rx),
            vec![Message::flower(
                START_TIME,
                "you",
                Some("you sent everyone a shower of flowers".to_string())
            )]
        );
        assert_eq!(
            drain(&mut bob_rx),
            vec![Message::flower(
                START_TIME,
                "Alice",
                Some("Alice sent a shower of flowers".to_string())
            )]
        );
    }

    #[tokio::test]
    async fn test_second_flower_within_cooldown_only_reaches_sender() {
        // テスト項目: 10 秒以内の再送信は本人にだけ拒否通知が届く
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = harness.flower_usecase();
        let (mut alice, mut alice_rx, _bob, mut bob_rx) = two_logged_in(&harness).await;
        usecase.execute(&mut alice).await.unwrap();
        drain(&mut alice_rx);
        drain(&mut bob_rx);
        harness.clock.advance(3_500);

        // when (操作):
        let result = usecase.execute(&mut alice).await;

        // then (期待する結果):
        assert_eq!(result, Ok(FlowerOutcome::Throttled { remaining_secs: 7 }));
        assert_eq!(alice.attributes.last_flower_time, Some(START_TIME));

        let alice_received = drain(&mut alice_rx);
        assert_eq!(alice_received.len(), 1);
        assert_eq!(alice_received[0].command, Command::System);
        assert_eq!(alice_received[0].sender, "you");
        assert!(
            alice_received[0]
                .content
                .as_deref()
                .unwrap()
                .contains("7 seconds")
        );
        assert!(drain(&mut bob_rx).is_empty());
    }

    #[tokio::test]
    async fn test_flower_allowed_again_after_cooldown() {
        // テスト項目: クールダウン経過後は再びブロードキャストされる
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = harness.flower_usecase();
        let (mut alice, mut alice_rx, _bob, mut bob_rx) = two_logged_in(&harness).await;
        usecase.execute(&mut alice).await.unwrap();
        drain(&mut alice_rx);
        drain(&mut bob_rx);
        harness.clock.advance(FLOWER_COOLDOWN_MILLIS);

        // when (操作):
        let result = usecase.execute(&mut alice).await;

        // then (期待する結果):
        assert_eq!(result, Ok(FlowerOutcome::Showered { recipients: 2 }));
        assert_eq!(
            alice.attributes.last_flower_time,
            Some(START_TIME + FLOWER_COOLDOWN_MILLIS)
        );
        assert_eq!(drain(&mut bob_rx).len(), 1);
    }

    #[tokio::test]
    async fn test_cooldown_is_per_connection() {
        // テスト項目: レート制限は接続ごとに独立している
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = harness.flower_usecase();
        let (mut alice, _alice_rx, mut bob, _bob_rx) = two_logged_in(&harness).await;
        usecase.execute(&mut alice).await.unwrap();

        // when (操作):
        let result = usecase.execute(&mut bob).await;

        // then (期待する結果):
        assert_eq!(result, Ok(FlowerOutcome::Showered { recipients: 2 }));
    }

    #[tokio::test]
    async fn test_anonymous_flower_is_rejected() {
        // テスト項目: 未ログインの接続はフラワーを送れず、状態も変わらない
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = harness.flower_usecase();
        let (mut stranger, mut stranger_rx) = harness.connect("10.0.0.9:9000").await;

        // when (操作):
        let result = usecase.execute(&mut stranger).await;

        // then (期待する結果):
        assert_eq!(result, Err(SessionError::NotLoggedIn));
        assert_eq!(stranger.attributes.last_flower_time, None);
        assert!(drain(&mut stranger_rx).is_empty());
    }
}

//! Session router: the entry points the transport layer calls.
//!
//! ```text
//! on_connect(peer, queue) -> session          (anonymous)
//! on_text(&mut session, frame)                decode -> dispatch by command
//! on_disconnect(session)                      logout + drop queue
//! ```
//!
//! Nothing here returns an error to the transport: malformed frames, commands
//! from anonymous connections and server-only commands are logged and dropped.

use std::sync::Arc;

use hanami_shared::protocol::{Command, decode};

use crate::domain::{ConnectionId, ConnectionSession, MessagePusher, PusherChannel};

use super::{
    chat::ChatUseCase,
    flower::{FlowerOutcome, SendFlowerUseCase},
    login::LoginUseCase,
    logout::LogoutUseCase,
};

/// What the router did with one inbound frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Dropped without side effects
    Ignored,
    LoggedIn { online_count: usize },
    Chatted { recipients: usize },
    Flower(FlowerOutcome),
}

/// Per-connection state machine over the four protocol commands
pub struct MessageRouter {
    login_usecase: Arc<LoginUseCase>,
    chat_usecase: Arc<ChatUseCase>,
    send_flower_usecase: Arc<SendFlowerUseCase>,
    logout_usecase: Arc<LogoutUseCase>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl MessageRouter {
    pub fn new(
        login_usecase: Arc<LoginUseCase>,
        chat_usecase: Arc<ChatUseCase>,
        send_flower_usecase: Arc<SendFlowerUseCase>,
        logout_usecase: Arc<LogoutUseCase>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            login_usecase,
            chat_usecase,
            send_flower_usecase,
            logout_usecase,
            message_pusher,
        }
    }

    /// Accept a new connection.
    ///
    /// Registers its send queue and returns an anonymous session; nothing is
    /// broadcast until the connection logs in.
    pub async fn on_connect(
        &self,
        peer_address: impl Into<String>,
        sender: PusherChannel,
    ) -> ConnectionSession {
        let session = ConnectionSession::new(ConnectionId::generate(), peer_address);
        self.message_pusher
            .register_client(session.id, sender)
            .await;
        tracing::info!(
            "Connection '{}' accepted from {}",
            session.id,
            session.peer_address
        );
        session
    }

    /// Handle one inbound text frame
    pub async fn on_text(&self, session: &mut ConnectionSession, text: &str) -> RouteOutcome {
        let Some(message) = decode(text) else {
            return RouteOutcome::Ignored;
        };
        let command = message.command;

        let result = match command {
            Command::Login => self
                .login_usecase
                .execute(session, message.sender)
                .await
                .map(|online_count| RouteOutcome::LoggedIn { online_count }),
            Command::Chat => self
                .chat_usecase
                .execute(session, message.content)
                .await
                .map(|recipients| RouteOutcome::Chatted { recipients }),
            Command::Flower => self
                .send_flower_usecase
                .execute(session)
                .await
                .map(RouteOutcome::Flower),
            Command::System => Ok(RouteOutcome::Ignored),
        };

        result.unwrap_or_else(|e| {
            tracing::debug!(
                "Ignored {} from connection '{}': {}",
                command,
                session.id,
                e
            );
            RouteOutcome::Ignored
        })
    }

    /// Handle a closed connection
    pub async fn on_disconnect(&self, session: ConnectionSession) {
        if let Err(e) = self.logout_usecase.execute(&session).await {
            tracing::debug!("Connection '{}' closed before login: {}", session.id, e);
        }
        self.message_pusher.unregister_client(&session.id).await;
        tracing::info!("Connection '{}' closed", session.id);
    }
}

//! WebSocket connection handlers.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{
        ConnectInfo, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use crate::{domain::ConnectionSession, ui::state::AppState, usecase::MessageRouter};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, peer))
}

/// Spawns a task that drains the connection's send queue into the WebSocket.
///
/// Frames queued by broadcasts from any connection reach this client in the
/// order they were pushed. The task ends when the queue is dropped or the
/// socket refuses a write.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Feed inbound text frames to the router until the client goes away
async fn receive_loop(
    receiver: &mut SplitStream<WebSocket>,
    router: &MessageRouter,
    session: &mut ConnectionSession,
) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("WebSocket error on '{}': {}", session.id, e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                tracing::debug!("Received from '{}': {}", session.id, text.as_str());
                let outcome = router.on_text(session, text.as_str()).await;
                tracing::debug!("Routed frame from '{}': {:?}", session.id, outcome);
            }
            Message::Close(_) => {
                tracing::info!("Connection '{}' requested close", session.id);
                break;
            }
            Message::Ping(_) => {
                tracing::debug!("Received ping");
            }
            _ => {}
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, peer: SocketAddr) {
    let (sender, mut receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();
    let mut session = state.router.on_connect(peer.to_string(), tx).await;

    let mut send_task = pusher_loop(rx, sender);

    // If either direction finishes, the connection is over
    tokio::select! {
        _ = receive_loop(&mut receiver, &state.router, &mut session) => {}
        _ = &mut send_task => {}
    };
    send_task.abort();

    state.router.on_disconnect(session).await;
}

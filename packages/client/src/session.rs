//! One WebSocket session: connect, log in, then pump frames both ways.

use futures_util::{SinkExt, StreamExt};
use hanami_shared::{protocol::Message as ChatMessage, time::current_timestamp_millis};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::error::ClientError;

use super::{
    formatter::MessageFormatter,
    input::{InputAction, parse_input},
    ui::redisplay_prompt,
};

/// Run one session until the user quits or the connection drops.
///
/// Returns `Ok(())` when the user ended it (`/quit`, Ctrl+C, Ctrl+D) and
/// `ClientError::ConnectionError` when the connection was refused or lost.
pub async fn run_client_session(
    url: &str,
    nickname: &str,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");
    println!(
        "\nYou are '{}'. Type messages and press Enter to send, /flower to send flowers, /quit to exit.\n",
        nickname
    );

    let (mut write, mut read) = ws_stream.split();

    let login = ChatMessage::login(current_timestamp_millis(), nickname);
    write
        .send(Message::Text(login.to_wire().into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    // Spawn a task to handle incoming messages
    let nickname_for_read = nickname.to_string();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    print!("{}", MessageFormatter::format_frame(text.as_str()));
                    redisplay_prompt(&nickname_for_read);
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt(&nickname_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    // Forward typed lines; true means the socket refused a write
    let write_loop = async {
        while let Some(line) = input_rx.recv().await {
            let now = current_timestamp_millis();
            match parse_input(&line, nickname, now) {
                InputAction::Send(message) => {
                    if let Err(e) = write.send(Message::Text(message.to_wire().into())).await {
                        tracing::warn!("Failed to send message: {}", e);
                        return true;
                    }
                    print!("{}", MessageFormatter::format_sent_confirmation(now));
                    redisplay_prompt(nickname);
                }
                InputAction::Quit => break,
                InputAction::Skip => {}
            }
        }
        write.close().await.ok();
        false
    };

    tokio::select! {
        _ = &mut read_task => {
            Err(ClientError::ConnectionError("Connection lost".to_string()))
        }
        write_error = write_loop => {
            read_task.abort();
            if write_error {
                Err(ClientError::ConnectionError("Connection lost".to_string()))
            } else {
                Ok(())
            }
        }
    }
}

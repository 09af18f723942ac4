//! Client-side decisions, kept free of I/O.

use hanami_shared::protocol::truncate_sender;

use crate::error::ClientError;

/// Normalize a nickname the way the server will store it.
///
/// Blank nicknames and ones containing `[` or `]` are refused: the server
/// cannot decode a LOGIN header carrying them. Long names are cut with the
/// wire truncation rule so the prompt shows what others see.
pub fn prepare_nickname(raw: &str) -> Result<String, ClientError> {
    let nickname = raw.trim();
    if nickname.is_empty() {
        return Err(ClientError::Protocol(
            "nickname must not be blank".to_string(),
        ));
    }
    if nickname.contains(['[', ']']) {
        return Err(ClientError::Protocol(format!(
            "nickname '{}' must not contain '[' or ']'",
            nickname
        )));
    }
    Ok(truncate_sender(nickname))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `current_attempt` - Reconnection attempts made so far
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(current_attempt: u32, max_attempts: u32) -> bool {
    current_attempt < max_attempts
}

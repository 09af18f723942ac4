//! Inbound decode / outbound encode for the server.
//!
//! `decode` never fails loudly: anything that is not a client command comes back
//! as `None` and is logged, so a malformed frame can never take down a
//! connection's worker.

use super::{
    error::DecodeError,
    message::{Command, Message},
};

/// Decode a client frame.
///
/// Returns `None` for empty input, malformed headers, unknown commands and the
/// server-only `SYSTEM` command. Client-supplied FLOWER content is dropped; the
/// router writes its own per recipient.
pub fn decode(text: &str) -> Option<Message> {
    match Message::parse(text) {
        Ok(message) if message.command == Command::System => {
            tracing::warn!("Rejected server-only command from client: {}", text);
            None
        }
        Ok(mut message) => {
            if message.command == Command::Flower {
                message.content = None;
            }
            Some(message)
        }
        Err(DecodeError::Empty) => None,
        Err(e) => {
            tracing::warn!("Failed to decode message {:?}: {}", text, e);
            None
        }
    }
}

/// Encode a message to its wire text.
pub fn encode(message: &Message) -> String {
    message.to_wire()
}

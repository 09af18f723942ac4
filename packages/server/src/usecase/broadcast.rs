//! Per-recipient fan-out over a registry snapshot.

use hanami_shared::protocol::{Message, encode};

use crate::domain::{ConnectionId, MessagePusher, OnlineRegistry};

/// Send a freshly built message to every member of a registry snapshot.
///
/// `build` is called once per recipient so each one can get its own sender
/// label, content and timestamp. A failed push is logged and skipped; it never
/// stops delivery to the remaining recipients.
///
/// # Returns
///
/// The number of recipients whose queue accepted the message
pub(crate) async fn broadcast_each<F>(
    registry: &dyn OnlineRegistry,
    message_pusher: &dyn MessagePusher,
    mut build: F,
) -> usize
where
    F: FnMut(&ConnectionId) -> Message + Send,
{
    let mut delivered = 0;
    for recipient in registry.snapshot().await {
        let message = build(&recipient);
        let text = encode(&message);
        match message_pusher.push_to(&recipient, &text).await {
            Ok(()) => delivered += 1,
            Err(e) => {
                tracing::warn!(
                    "Failed to push {} to client '{}': {}",
                    message.command,
                    recipient,
                    e
                );
            }
        }
    }
    delivered
}

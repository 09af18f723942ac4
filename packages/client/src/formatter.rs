//! Message formatting utilities for client display.

use hanami_shared::{
    protocol::{Command, Message},
    time::timestamp_to_clock_time,
};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Render one frame received from the server.
    ///
    /// Frames that do not parse are shown verbatim.
    pub fn format_frame(text: &str) -> String {
        match Message::parse(text) {
            Ok(message) => Self::format_message(&message),
            Err(_) => Self::format_raw_message(text),
        }
    }

    pub fn format_message(message: &Message) -> String {
        let time = timestamp_to_clock_time(message.timestamp);
        let content = message.content.as_deref().unwrap_or("");
        match message.command {
            Command::Chat => format!("\n[{}] {}: {}\n", time, message.sender, content),
            Command::Flower => {
                let text = match message.content.as_deref() {
                    Some(text) => text.to_string(),
                    None => format!("{} sent a shower of flowers", message.sender),
                };
                format!("\n[{}] ✿ {} ✿\n", time, text)
            }
            Command::System => match message.online_count {
                Some(count) => format!("\n[{}] * {} ({} online)\n", time, content, count),
                None => format!("\n[{}] * {}\n", time, content),
            },
            Command::Login => format!("\n[{}] {} logged in\n", time, message.sender),
        }
    }

    /// Format a confirmation line after sending
    pub fn format_sent_confirmation(sent_at: i64) -> String {
        format!("sent at {}\n", timestamp_to_clock_time(sent_at))
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }
}

//! Hanami chat protocol.
//!
//! One protocol unit per WebSocket text frame:
//!
//! ```text
//! [CMD][TIME][SENDER]( - CONTENT)?
//! ```
//!
//! - `message`: the `Message` value object and the full tokenizer
//! - `codec`: the inbound decode / outbound encode entry points used by the server
//! - `error`: decode errors

pub mod codec;
pub mod error;
pub mod message;

pub use codec::{decode, encode};
pub use error::DecodeError;
pub use message::{Command, Message, truncate_sender};

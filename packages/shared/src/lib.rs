//! Code shared by the Hanami server and client.
//!
//! - `protocol`: the `[CMD][TIME][SENDER] - CONTENT` wire format
//! - `time`: clock abstraction and timestamp formatting
//! - `logger`: tracing subscriber setup

pub mod logger;
pub mod protocol;
pub mod time;

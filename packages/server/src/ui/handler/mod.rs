//! Request handlers.

mod http;
mod websocket;

pub use http::{health_check, online_status};
pub use websocket::websocket_handler;

//! Hanami broadcast chat server.
//!
//! Clients log in with a nickname over a WebSocket and exchange chat and
//! "flower" broadcasts using the text protocol in `hanami_shared::protocol`.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

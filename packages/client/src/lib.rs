//! Terminal client for the Hanami broadcast chat server.

mod domain;
pub mod error;
mod formatter;
mod input;
mod runner;
mod session;
mod ui;

pub use runner::run_client;

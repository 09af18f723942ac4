//! Hanami broadcast chat server.
//!
//! Every logged-in connection receives every chat line, join/leave notice and
//! flower shower.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hanami-server
//! cargo run --bin hanami-server -- --host 0.0.0.0 --port 3000 --static-dir public
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use hanami_server::{
    infrastructure::{message_pusher::WebSocketMessagePusher, registry::InMemoryOnlineRegistry},
    ui::Server,
    usecase::{ChatUseCase, LoginUseCase, LogoutUseCase, MessageRouter, SendFlowerUseCase},
};
use hanami_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "hanami-server")]
#[command(about = "Broadcast chat server over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Directory of static files served for unmatched paths
    #[arg(short = 's', long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. OnlineRegistry
    // 2. MessagePusher
    // 3. UseCases
    // 4. MessageRouter
    // 5. Server

    // 1. Create OnlineRegistry (in-memory)
    let registry = Arc::new(InMemoryOnlineRegistry::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let clock = Arc::new(SystemClock);
    let login_usecase = Arc::new(LoginUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let chat_usecase = Arc::new(ChatUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let send_flower_usecase = Arc::new(SendFlowerUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let logout_usecase = Arc::new(LogoutUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        clock,
    ));

    // 4. Create MessageRouter
    let router = Arc::new(MessageRouter::new(
        login_usecase,
        chat_usecase,
        send_flower_usecase,
        logout_usecase,
        message_pusher,
    ));

    // 5. Create and run the server
    let server = Server::new(router, registry).with_static_dir(args.static_dir);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

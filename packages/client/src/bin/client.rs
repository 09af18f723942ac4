//! Terminal chat client for the Hanami server.
//!
//! Logs in with a nickname, then sends each typed line as chat. `/flower` sends
//! everyone a shower of flowers and `/quit` exits. Automatically reconnects on
//! disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hanami-client -- --nickname Alice
//! cargo run --bin hanami-client -- -n Bob -u ws://127.0.0.1:3000/im
//! ```

use clap::Parser;
use hanami_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hanami-client")]
#[command(about = "Terminal client for the Hanami broadcast chat server", long_about = None)]
struct Args {
    /// Nickname shown to other participants
    #[arg(short = 'n', long)]
    nickname: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/im")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = hanami_client::run_client(args.url, args.nickname).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}

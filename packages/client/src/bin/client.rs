//! CLI chat client for the multi-room relay.
//!
//! Connects to the relay, joins a room and sends stdin lines as chat
//! messages. `/users [room]` requests a roster, `/join <room>` switches
//! rooms. Automatically reconnects on disconnection (max 5 attempts with
//! 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin banter-client -- --username Alice
//! cargo run --bin banter-client -- -n Bob -r abc123
//! ```

use clap::Parser;

use banter_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "banter-client")]
#[command(about = "CLI chat client for the multi-room relay", long_about = None)]
struct Args {
    /// Display name for your messages
    #[arg(short = 'n', long)]
    username: String,

    /// Room to join on connect
    #[arg(short = 'r', long, default_value = "lobby")]
    room: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = banter_client::run_client(args.url, args.username, args.room).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}

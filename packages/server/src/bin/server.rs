//! Multi-room WebSocket chat relay.
//!
//! Clients join named rooms over a single WebSocket connection and
//! exchange messages relayed to every member of the room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin banter-server
//! cargo run --bin banter-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use banter_server::{
    infrastructure::{pusher::ChannelPusher, registry::InMemoryRoomRegistry},
    ui::Server,
    usecase::{GetUsersUseCase, JoinRoomUseCase, LeaveRoomUseCase, SendMessageUseCase},
};
use banter_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "banter-server")]
#[command(about = "Multi-room WebSocket chat relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Wire dependencies in order: clock, registry, pusher, use cases,
    // server.
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let registry = Arc::new(InMemoryRoomRegistry::new(clock.clone()));
    tracing::info!("room registry ready, default room seeded");

    let pusher = Arc::new(ChannelPusher::new());

    let leave_room = Arc::new(LeaveRoomUseCase::new(
        registry.clone(),
        pusher.clone(),
        clock.clone(),
    ));
    let join_room = Arc::new(JoinRoomUseCase::new(
        registry.clone(),
        pusher.clone(),
        leave_room.clone(),
        clock.clone(),
    ));
    let send_message = Arc::new(SendMessageUseCase::new(
        registry.clone(),
        pusher.clone(),
        clock.clone(),
    ));
    let get_users = Arc::new(GetUsersUseCase::new(registry.clone(), pusher.clone()));

    let server = Server::new(
        join_room,
        send_message,
        get_users,
        leave_room,
        registry,
        pusher,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

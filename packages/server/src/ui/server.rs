//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    domain::{OutboundPusher, RoomRegistry},
    usecase::{GetUsersUseCase, JoinRoomUseCase, LeaveRoomUseCase, SendMessageUseCase},
};

use super::{
    handler::{get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// The chat relay server: WebSocket gateway plus HTTP read API.
pub struct Server {
    join_room: Arc<JoinRoomUseCase>,
    send_message: Arc<SendMessageUseCase>,
    get_users: Arc<GetUsersUseCase>,
    leave_room: Arc<LeaveRoomUseCase>,
    registry: Arc<dyn RoomRegistry>,
    pusher: Arc<dyn OutboundPusher>,
}

impl Server {
    pub fn new(
        join_room: Arc<JoinRoomUseCase>,
        send_message: Arc<SendMessageUseCase>,
        get_users: Arc<GetUsersUseCase>,
        leave_room: Arc<LeaveRoomUseCase>,
        registry: Arc<dyn RoomRegistry>,
        pusher: Arc<dyn OutboundPusher>,
    ) -> Self {
        Self {
            join_room,
            send_message,
            get_users,
            leave_room,
            registry,
            pusher,
        }
    }

    /// Build the axum router over the shared application state.
    ///
    /// Exposed separately from [`Server::run`] so integration tests can
    /// serve the exact same routes on an ephemeral port.
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            join_room: self.join_room,
            send_message: self.send_message,
            get_users: self.get_users,
            leave_room: self.leave_room,
            registry: self.registry,
            pusher: self.pusher,
        });

        Router::new()
            .route("/ws", get(websocket_handler))
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room}", get(get_room_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the relay until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the given address
    /// or if serving fails.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("chat relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

//! Shared application state for the axum handlers.

use std::sync::Arc;

use crate::domain::{OutboundPusher, RoomRegistry};
use crate::usecase::{GetUsersUseCase, JoinRoomUseCase, LeaveRoomUseCase, SendMessageUseCase};

pub struct AppState {
    pub join_room: Arc<JoinRoomUseCase>,
    pub send_message: Arc<SendMessageUseCase>,
    pub get_users: Arc<GetUsersUseCase>,
    pub leave_room: Arc<LeaveRoomUseCase>,
    /// For the HTTP read API.
    pub registry: Arc<dyn RoomRegistry>,
    /// For per-connection queue registration in the gateway.
    pub pusher: Arc<dyn OutboundPusher>,
}

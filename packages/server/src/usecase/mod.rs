//! Use-case layer: the join/send/getUsers/leave operations of the relay.
//!
//! Each use case takes the registry and pusher through their domain
//! traits and is composed in the server binary. All room mutation and the
//! matching broadcast happen under the room's lock, so for any one room
//! the log order equals the delivery order every member observes.

mod error;
mod get_users;
mod join_room;
mod leave_room;
mod send_message;
mod session;

pub use error::{GetUsersError, SendMessageError};
pub use get_users::GetUsersUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use send_message::SendMessageUseCase;
pub use session::{Membership, Session};

//! Domain layer: rooms, members, messages and the interfaces the use-case
//! layer depends on (registry, outbound pusher).

pub mod entity;
pub mod pusher;
pub mod registry;
pub mod value_object;

pub use entity::{MESSAGE_LOG_CAPACITY, Member, Message, Room};
pub use pusher::{OUTBOUND_QUEUE_CAPACITY, OutboundPusher, OutboundQueue, PushError};
#[cfg(test)]
pub use pusher::MockOutboundPusher;
pub use registry::{RoomHandle, RoomRegistry};
pub use value_object::{
    ConnectionId, DEFAULT_ROOM, MessageBody, MessageId, RoomName, Username, ValidationError,
};

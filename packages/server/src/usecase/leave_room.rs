//! UseCase: leaving a room, explicitly (room switch) or implicitly
//! (disconnect).

use std::sync::Arc;

use banter_shared::protocol::ServerEvent;
use banter_shared::time::Clock;

use crate::domain::{Message, OutboundPusher, RoomRegistry};

use super::session::Session;

pub struct LeaveRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
    pusher: Arc<dyn OutboundPusher>,
    clock: Arc<dyn Clock>,
}

impl LeaveRoomUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        pusher: Arc<dyn OutboundPusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            pusher,
            clock,
        }
    }

    /// Tear down the session's membership, if any.
    ///
    /// Side effects on the room: remove the member record, append and
    /// broadcast the leave notice, broadcast the updated user count to the
    /// remaining members, then destroy the room if it is now empty and not
    /// the default. Returns `true` when a membership was actually torn
    /// down; the second invocation for an already-cleaned session is a
    /// no-op producing no events.
    pub async fn execute(&self, session: &mut Session) -> bool {
        let Some(membership) = session.take_membership() else {
            return false;
        };

        let Some(handle) = self.registry.get(&membership.room).await else {
            tracing::warn!(
                "room '{}' already gone while '{}' was leaving it",
                membership.room,
                session.connection()
            );
            return false;
        };

        let now_empty = {
            let mut room = handle.lock().await;
            let Some(username) = room.remove_member(session.connection()) else {
                // Cleanup already ran for this connection.
                return false;
            };

            let notice = Message::system(
                format!("{username} has left the chat."),
                membership.room.clone(),
                self.clock.now_millis(),
            );
            let message_event = ServerEvent::Message {
                message: (&notice).into(),
            };
            room.push_message(notice);

            let remaining = room.member_connections();
            self.pusher
                .broadcast(remaining.clone(), &message_event.to_json())
                .await;
            let count_event = ServerEvent::UserCount {
                count: room.member_count(),
            };
            self.pusher.broadcast(remaining, &count_event.to_json()).await;

            room.is_empty()
        };

        if now_empty {
            self.registry.remove_if_empty(&membership.room).await;
        }

        tracing::info!(
            "connection '{}' left room '{}'",
            session.connection(),
            membership.room
        );
        true
    }
}

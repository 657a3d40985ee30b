//! UseCase: sending a chat message to the session's current room.

use std::sync::Arc;

use banter_shared::protocol::ServerEvent;
use banter_shared::time::Clock;

use crate::domain::{Message, MessageBody, OutboundPusher, RoomRegistry};

use super::error::SendMessageError;
use super::session::Session;

pub struct SendMessageUseCase {
    registry: Arc<dyn RoomRegistry>,
    pusher: Arc<dyn OutboundPusher>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
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

    /// Append a message to the current room's log and broadcast it to every
    /// member, the sender included. Each recipient derives authorship by
    /// comparing the sender name with its own.
    ///
    /// Errors signal dropped commands (unjoined session, blank text); the
    /// gateway ignores them without surfacing anything to the client.
    pub async fn execute(&self, session: &Session, text: String) -> Result<(), SendMessageError> {
        let Some(membership) = session.membership() else {
            return Err(SendMessageError::NotJoined);
        };
        let body = MessageBody::new(text).map_err(|_| SendMessageError::EmptyMessage)?;

        let handle = self
            .registry
            .get(&membership.room)
            .await
            .ok_or_else(|| SendMessageError::RoomMissing(membership.room.to_string()))?;

        let mut room = handle.lock().await;
        let message = Message::user(
            &membership.username,
            body,
            membership.room.clone(),
            self.clock.now_millis(),
        );
        let event = ServerEvent::Message {
            message: (&message).into(),
        };
        tracing::debug!(
            "message {} from '{}' in room '{}'",
            message.id,
            membership.username,
            membership.room
        );
        room.push_message(message);
        self.pusher
            .broadcast(room.member_connections(), &event.to_json())
            .await;

        Ok(())
    }
}

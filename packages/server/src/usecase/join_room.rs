//! UseCase: joining a room.

use std::sync::Arc;

use banter_shared::protocol::{MessageDto, ServerEvent};
use banter_shared::time::Clock;

use crate::domain::{Member, Message, OutboundPusher, RoomName, RoomRegistry, Username};

use super::leave_room::LeaveRoomUseCase;
use super::session::Session;

pub struct JoinRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
    pusher: Arc<dyn OutboundPusher>,
    leave: Arc<LeaveRoomUseCase>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        pusher: Arc<dyn OutboundPusher>,
        leave: Arc<LeaveRoomUseCase>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            pusher,
            leave,
            clock,
        }
    }

    /// Join `room_name` as `username`, leaving the current room first.
    ///
    /// Order of side effects: full leave cycle for the previous room (if
    /// any), resolve/create the target room, add the member record, replay
    /// the room history privately to this session, append and broadcast the
    /// join notice, broadcast the updated user count.
    ///
    /// Rejoining the room the session is already in still runs the full
    /// cycle, duplicate leave/join notices included. That mirrors the
    /// original relay and compatibility tests rely on it.
    pub async fn execute(&self, session: &mut Session, room_name: RoomName, username: Username) {
        self.leave.execute(session).await;

        // The room's last member can leave between resolve and lock, at
        // which point the registry deletes the room and closes it. A
        // member record added through such a stale handle would strand
        // this session in an unregistered room, so re-check under the
        // lock and resolve again on a closed room.
        let mut room = loop {
            let handle = self.registry.resolve_or_create(&room_name).await;
            let room = handle.lock_owned().await;
            if !room.is_closed() {
                break room;
            }
        };

        room.add_member(Member {
            connection: session.connection().clone(),
            username: username.clone(),
        });

        let replay = ServerEvent::RoomHistory {
            messages: room.history().iter().map(MessageDto::from).collect(),
        };
        if let Err(e) = self
            .pusher
            .push_to(session.connection(), &replay.to_json())
            .await
        {
            tracing::warn!(
                "failed to replay history to connection '{}': {}",
                session.connection(),
                e
            );
        }

        let notice = Message::system(
            format!("{username} has joined the chat."),
            room_name.clone(),
            self.clock.now_millis(),
        );
        let message_event = ServerEvent::Message {
            message: (&notice).into(),
        };
        room.push_message(notice);

        let members = room.member_connections();
        self.pusher
            .broadcast(members.clone(), &message_event.to_json())
            .await;
        let count_event = ServerEvent::UserCount {
            count: room.member_count(),
        };
        self.pusher.broadcast(members, &count_event.to_json()).await;
        drop(room);

        session.set_membership(room_name.clone(), username.clone());
        tracing::info!(
            "'{}' joined room '{}' on connection '{}'",
            username,
            room_name,
            session.connection()
        );
    }
}

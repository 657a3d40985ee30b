//! Room, member and message entities.

use std::collections::VecDeque;

use banter_shared::protocol::SYSTEM_SENDER;

use super::value_object::{ConnectionId, MessageBody, MessageId, RoomName, Username};

/// Maximum number of messages retained per room; the oldest entry is
/// evicted first once the cap is reached.
pub const MESSAGE_LOG_CAPACITY: usize = 100;

/// One chat or system message. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub sender: String,
    pub text: String,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
    pub room: RoomName,
}

impl Message {
    /// A message sent by a user.
    pub fn user(sender: &Username, body: MessageBody, room: RoomName, timestamp: i64) -> Self {
        Self {
            id: MessageId::generate(),
            sender: sender.as_str().to_string(),
            text: body.into_string(),
            timestamp,
            room,
        }
    }

    /// A server-generated notice (welcome, join, leave).
    pub fn system(text: impl Into<String>, room: RoomName, timestamp: i64) -> Self {
        Self {
            id: MessageId::generate(),
            sender: SYSTEM_SENDER.to_string(),
            text: text.into(),
            timestamp,
            room,
        }
    }
}

/// Membership of one connection in a room.
#[derive(Debug, Clone)]
pub struct Member {
    pub connection: ConnectionId,
    pub username: Username,
}

/// Per-room state: member table in insertion order and the bounded
/// message log. All mutation goes through the registry's per-room lock.
#[derive(Debug)]
pub struct Room {
    pub name: RoomName,
    members: Vec<Member>,
    messages: VecDeque<Message>,
    /// Unix epoch milliseconds at creation.
    pub created_at: i64,
    closed: bool,
}

impl Room {
    /// Create a room seeded with its system welcome message.
    pub fn new(name: RoomName, now_millis: i64) -> Self {
        let welcome = Message::system(Self::welcome_text(&name), name.clone(), now_millis);
        let mut messages = VecDeque::with_capacity(MESSAGE_LOG_CAPACITY);
        messages.push_back(welcome);
        Self {
            name,
            members: Vec::new(),
            messages,
            created_at: now_millis,
            closed: false,
        }
    }

    /// Mark the room as deleted from the registry. A handle resolved
    /// before the deletion still reaches the object; locking it and
    /// finding the flag set tells the holder to resolve again.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn welcome_text(name: &RoomName) -> String {
        if name.is_default() {
            "Welcome to the public lobby!".to_string()
        } else {
            format!("Welcome to room {name}!")
        }
    }

    /// Insert a member record. Idempotent when the connection is already a
    /// member; normal flow never hits that case.
    pub fn add_member(&mut self, member: Member) {
        if self
            .members
            .iter()
            .any(|m| m.connection == member.connection)
        {
            return;
        }
        self.members.push(member);
    }

    /// Remove the member record for a connection, returning the display
    /// name it was registered under.
    pub fn remove_member(&mut self, connection: &ConnectionId) -> Option<Username> {
        let position = self
            .members
            .iter()
            .position(|m| &m.connection == connection)?;
        Some(self.members.remove(position).username)
    }

    /// Append a message, evicting from the front while over capacity.
    pub fn push_message(&mut self, message: Message) {
        self.messages.push_back(message);
        while self.messages.len() > MESSAGE_LOG_CAPACITY {
            self.messages.pop_front();
        }
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Display names in insertion order.
    pub fn member_names(&self) -> Vec<String> {
        self.members
            .iter()
            .map(|m| m.username.as_str().to_string())
            .collect()
    }

    /// Connection ids of every current member, for broadcast fan-out.
    pub fn member_connections(&self) -> Vec<ConnectionId> {
        self.members.iter().map(|m| m.connection.clone()).collect()
    }

    /// Snapshot of the message log for replay to a newly joined session.
    pub fn history(&self) -> Vec<Message> {
        self.messages.iter().cloned().collect()
    }
}

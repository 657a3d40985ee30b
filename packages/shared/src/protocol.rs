//! JSON wire protocol between the relay server and its clients.
//!
//! Commands flow client -> server, events flow server -> client. Both are
//! externally tagged through a `type` field so either side can dispatch on
//! a single parse.

use serde::{Deserialize, Serialize};

/// Sender name reserved for server-generated notices.
pub const SYSTEM_SENDER: &str = "System";

/// A chat message as it appears on the wire and in room history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: String,
    pub sender: String,
    pub text: String,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
    #[serde(rename = "roomId")]
    pub room_id: String,
}

impl MessageDto {
    /// Whether this message was generated by the server rather than a user.
    pub fn is_system(&self) -> bool {
        self.sender == SYSTEM_SENDER
    }
}

/// Commands a client may issue over its connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientCommand {
    /// Join a room, leaving the current one first if any.
    Join { room: String, username: String },
    /// Send a chat message to the current room.
    SendMessage { text: String },
    /// Request the member name list of a room (current room if omitted).
    GetUsers {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        room: Option<String>,
    },
}

/// Events the server delivers to connections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Full history replay, sent once to a session right after it joins.
    RoomHistory { messages: Vec<MessageDto> },
    /// One chat or system message, broadcast to every member of its room.
    Message { message: MessageDto },
    /// Updated member count, broadcast after any join or leave.
    UserCount { count: usize },
    /// Member name list, sent to the requester of a getUsers command.
    UserList { users: Vec<String> },
}

impl ServerEvent {
    /// Serialize the event for the wire.
    ///
    /// Infallible: every variant is a plain struct of strings and integers.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("server event serialization cannot fail")
    }
}

//! Conversions between domain entities and wire/API DTOs.

use serde::Serialize;

use banter_shared::protocol::MessageDto;
use banter_shared::time::millis_to_rfc3339;

use crate::domain::{Message, Room};

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.to_string(),
            sender: message.sender.clone(),
            text: message.text.clone(),
            timestamp: message.timestamp,
            room_id: message.room.as_str().to_string(),
        }
    }
}

impl From<Message> for MessageDto {
    fn from(message: Message) -> Self {
        (&message).into()
    }
}

/// Room summary for `GET /api/rooms`.
#[derive(Debug, Serialize)]
pub struct RoomSummaryDto {
    pub name: String,
    pub users: Vec<String>,
    #[serde(rename = "messageCount")]
    pub message_count: usize,
}

/// Room detail for `GET /api/rooms/{room}`.
#[derive(Debug, Serialize)]
pub struct RoomDetailDto {
    pub name: String,
    pub users: Vec<String>,
    #[serde(rename = "messageCount")]
    pub message_count: usize,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl RoomSummaryDto {
    pub fn from_room(room: &Room) -> Self {
        Self {
            name: room.name.as_str().to_string(),
            users: room.member_names(),
            message_count: room.history().len(),
        }
    }
}

impl RoomDetailDto {
    pub fn from_room(room: &Room) -> Self {
        Self {
            name: room.name.as_str().to_string(),
            users: room.member_names(),
            message_count: room.history().len(),
            created_at: millis_to_rfc3339(room.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::{MessageBody, RoomName, Username};

    #[test]
    fn domain_message_converts_to_wire_dto() {
        let alice = Username::new("Alice").unwrap();
        let message = Message::user(
            &alice,
            MessageBody::new("hi").unwrap(),
            RoomName::default_room(),
            1700000000000,
        );

        let dto: MessageDto = (&message).into();

        assert_eq!(dto.id, message.id.to_string());
        assert_eq!(dto.sender, "Alice");
        assert_eq!(dto.text, "hi");
        assert_eq!(dto.timestamp, 1700000000000);
        assert_eq!(dto.room_id, "lobby");
    }

    #[test]
    fn room_detail_formats_created_at_as_rfc3339() {
        // 2023-01-01 00:00:00 UTC
        let room = Room::new(RoomName::new("abc123").unwrap(), 1672531200000);

        let dto = RoomDetailDto::from_room(&room);

        assert_eq!(dto.name, "abc123");
        assert!(dto.created_at.starts_with("2023-01-01T00:00:00"));
        assert_eq!(dto.message_count, 1);
    }
}

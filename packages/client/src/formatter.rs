//! Formatting of server events for terminal display.

use banter_shared::protocol::{MessageDto, ServerEvent};
use banter_shared::time::millis_to_rfc3339;

/// Event formatter for client display.
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format any server event. `me` is the local username, used to mark
    /// the user's own messages and roster entry.
    pub fn format_event(event: &ServerEvent, me: &str) -> String {
        match event {
            ServerEvent::RoomHistory { messages } => Self::format_history(messages, me),
            ServerEvent::Message { message } => Self::format_message(message, me),
            ServerEvent::UserCount { count } => Self::format_user_count(*count),
            ServerEvent::UserList { users } => Self::format_user_list(users, me),
        }
    }

    /// Format the history replay received right after joining a room.
    pub fn format_history(messages: &[MessageDto], me: &str) -> String {
        let mut output = String::new();
        output.push_str("\n\n============================================================\n");
        output.push_str("Room history:\n");

        if messages.is_empty() {
            output.push_str("(no messages yet)\n");
        } else {
            for message in messages {
                if message.is_system() {
                    output.push_str(&format!("* {}\n", message.text));
                } else {
                    let suffix = if message.sender == me { " (you)" } else { "" };
                    output.push_str(&format!(
                        "{}{}: {}\n",
                        message.sender, suffix, message.text
                    ));
                }
            }
        }

        output.push_str("============================================================\n");
        output
    }

    /// Format one live message. System notices render as a single line,
    /// chat messages with sender and timestamp.
    pub fn format_message(message: &MessageDto, me: &str) -> String {
        let timestamp = millis_to_rfc3339(message.timestamp);
        if message.is_system() {
            format!("\n* {} ({})\n", message.text, timestamp)
        } else {
            let suffix = if message.sender == me { " (you)" } else { "" };
            format!(
                "\n@{}{}: {}\n  sent at {}\n",
                message.sender, suffix, message.text, timestamp
            )
        }
    }

    /// Format a user count update.
    pub fn format_user_count(count: usize) -> String {
        format!("\n= {} user(s) in the room\n", count)
    }

    /// Format the roster reply to a `/users` command.
    pub fn format_user_list(users: &[String], me: &str) -> String {
        let mut output = String::new();
        output.push_str("\nUsers:\n");

        if users.is_empty() {
            output.push_str("(no users)\n");
        } else {
            for user in users {
                let suffix = if user == me { " (you)" } else { "" };
                output.push_str(&format!("  {}{}\n", user, suffix));
            }
        }

        output
    }

    /// Format a frame that did not parse as a server event.
    pub fn format_raw(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}

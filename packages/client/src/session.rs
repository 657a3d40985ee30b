//! One WebSocket session: join, REPL loop, event display.

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use banter_shared::protocol::{ClientCommand, ServerEvent};

use crate::error::ClientError;
use crate::formatter::MessageFormatter;
use crate::ui::redisplay_prompt;

/// Map one line of input to a command.
///
/// `/join <room>` switches rooms, `/users [room]` requests a roster,
/// anything else is sent verbatim as a chat message. `None` means a
/// usage error the caller should report locally.
fn parse_input(line: &str, username: &str) -> Option<ClientCommand> {
    if let Some(rest) = line.strip_prefix("/join") {
        let room = rest.trim();
        if room.is_empty() {
            return None;
        }
        Some(ClientCommand::Join {
            room: room.to_string(),
            username: username.to_string(),
        })
    } else if let Some(rest) = line.strip_prefix("/users") {
        let room = rest.trim();
        Some(ClientCommand::GetUsers {
            room: (!room.is_empty()).then(|| room.to_string()),
        })
    } else {
        Some(ClientCommand::SendMessage {
            text: line.to_string(),
        })
    }
}

/// Run one client session until the user exits or the connection drops.
///
/// Returns `Ok(())` on a normal user exit; a lost connection surfaces as
/// `ClientError::Connection` so the runner can decide to reconnect.
pub async fn run_client_session(
    url: &str,
    username: &str,
    room: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::Connection(e.to_string()))?;

    tracing::info!("Connected to chat relay");
    println!("\nYou are '{}' in room '{}'.", username, room);
    println!("Commands: /users [room], /join <room>. Press Ctrl+C to exit.\n");

    let (mut write, mut read) = ws_stream.split();

    // Enter the starting room before anything else happens.
    let join = ClientCommand::Join {
        room: room.to_string(),
        username: username.to_string(),
    };
    write
        .send(Message::Text(serde_json::to_string(&join)?.into()))
        .await
        .map_err(|e| ClientError::Connection(e.to_string()))?;

    // Incoming events: parse, format, print, restore the prompt.
    let username_for_read = username.to_string();
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<ServerEvent>(&text) {
                        Ok(event) => MessageFormatter::format_event(&event, &username_for_read),
                        Err(_) => MessageFormatter::format_raw(&text),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&username_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // rustyline is synchronous, so it gets a dedicated thread feeding a
    // channel.
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    let prompt_name = username.to_string();
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", prompt_name);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Outgoing commands: map each line and push it onto the socket.
    let username_for_write = username.to_string();
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(line) = input_rx.recv().await {
            let Some(command) = parse_input(&line, &username_for_write) else {
                println!("Usage: /join <room>");
                redisplay_prompt(&username_for_write);
                continue;
            };

            let json = match serde_json::to_string(&command) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize command: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send command: {}", e);
                write_error = true;
                break;
            }
        }

        write_error
    });

    // If any one of the tasks completes, abort the other.
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            if read_result.unwrap_or(false) {
                return Err(Box::new(ClientError::Connection(
                    "Connection lost".to_string(),
                )));
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            if write_result.unwrap_or(false) {
                return Err(Box::new(ClientError::Connection(
                    "Connection lost".to_string(),
                )));
            }
        }
    }

    Ok(())
}

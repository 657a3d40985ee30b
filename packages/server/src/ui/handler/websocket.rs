//! WebSocket gateway: one relay session per connection.
//!
//! Each accepted socket gets a fresh `ConnectionId`, a bounded outbound
//! queue registered with the pusher, and two tasks: a writer draining the
//! queue into the socket, and a reader dispatching parsed commands to the
//! use cases. When either side ends, the session is cleaned up exactly as
//! if the client had sent a leave.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::{Mutex, mpsc};

use banter_shared::protocol::ClientCommand;

use crate::{
    domain::{ConnectionId, OUTBOUND_QUEUE_CAPACITY, RoomName, Username},
    ui::state::AppState,
    usecase::Session,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns the task that drains the connection's outbound queue into the
/// WebSocket sink. Ends when the queue closes or the socket write fails.
fn writer_loop(
    mut rx: mpsc::Receiver<String>,
    mut sink: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if sink.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection = ConnectionId::generate();
    tracing::info!("connection '{}' opened", connection);

    let (tx, rx) = mpsc::channel(OUTBOUND_QUEUE_CAPACITY);
    state.pusher.register(connection.clone(), tx).await;

    let (sink, mut stream) = socket.split();

    // The reader task and the post-disconnect cleanup both mutate the
    // session, so it lives behind a lock shared between them.
    let session = Arc::new(Mutex::new(Session::new(connection.clone())));

    let mut recv_task = {
        let state = state.clone();
        let session = session.clone();
        let connection = connection.clone();
        tokio::spawn(async move {
            while let Some(msg) = stream.next().await {
                let msg = match msg {
                    Ok(msg) => msg,
                    Err(e) => {
                        tracing::debug!("connection '{}' socket error: {}", connection, e);
                        break;
                    }
                };

                match msg {
                    Message::Text(text) => {
                        dispatch_command(&state, &session, &text).await;
                    }
                    Message::Close(_) => {
                        tracing::info!("connection '{}' requested close", connection);
                        break;
                    }
                    // Ping/pong is answered by axum itself.
                    _ => {}
                }
            }
        })
    };

    let mut send_task = writer_loop(rx, sink);

    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Disconnect cleanup carries the same side effects as an explicit
    // leave; leaving twice is a silent no-op, so this is safe even if the
    // client already left.
    {
        let mut session = session.lock().await;
        state.leave_room.execute(&mut session).await;
    }
    state.pusher.unregister(&connection).await;

    tracing::info!("connection '{}' closed", connection);
}

/// Parse one text frame and route it to the matching use case.
///
/// Precondition violations never terminate the connection: malformed
/// JSON, blank names and commands sent in the wrong state are logged and
/// dropped.
async fn dispatch_command(state: &AppState, session: &Mutex<Session>, text: &str) {
    let command = match serde_json::from_str::<ClientCommand>(text) {
        Ok(command) => command,
        Err(e) => {
            tracing::warn!("dropping malformed command: {}", e);
            return;
        }
    };

    match command {
        ClientCommand::Join { room, username } => {
            let (room, username) = match (RoomName::new(room), Username::new(username)) {
                (Ok(room), Ok(username)) => (room, username),
                _ => {
                    tracing::warn!("dropping join with blank room or username");
                    return;
                }
            };
            let mut session = session.lock().await;
            state.join_room.execute(&mut session, room, username).await;
        }
        ClientCommand::SendMessage { text } => {
            let session = session.lock().await;
            if let Err(e) = state.send_message.execute(&session, text).await {
                tracing::debug!("dropping sendMessage: {}", e);
            }
        }
        ClientCommand::GetUsers { room } => {
            let room = match room {
                Some(name) => match RoomName::new(name) {
                    Ok(room) => Some(room),
                    Err(_) => {
                        tracing::warn!("dropping getUsers with blank room name");
                        return;
                    }
                },
                None => None,
            };
            let session = session.lock().await;
            if let Err(e) = state.get_users.execute(&session, room).await {
                tracing::debug!("dropping getUsers: {}", e);
            }
        }
    }
}

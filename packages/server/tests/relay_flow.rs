//! End-to-end relay flows driven through the use-case layer, with one
//! outbound queue standing in for each client connection.

use std::sync::Arc;

use tokio::sync::mpsc;

use banter_server::domain::{
    ConnectionId, DEFAULT_ROOM, OUTBOUND_QUEUE_CAPACITY, OutboundPusher, RoomName, RoomRegistry,
    Username,
};
use banter_server::infrastructure::{pusher::ChannelPusher, registry::InMemoryRoomRegistry};
use banter_server::usecase::{
    GetUsersUseCase, JoinRoomUseCase, LeaveRoomUseCase, SendMessageUseCase, Session,
};
use banter_shared::protocol::ServerEvent;
use banter_shared::time::FixedClock;

struct Relay {
    registry: Arc<InMemoryRoomRegistry>,
    pusher: Arc<ChannelPusher>,
    join_room: JoinRoomUseCase,
    send_message: SendMessageUseCase,
    get_users: GetUsersUseCase,
    leave_room: Arc<LeaveRoomUseCase>,
}

fn relay() -> Relay {
    let clock: Arc<FixedClock> = Arc::new(FixedClock::new(1_700_000_000_000));
    let registry = Arc::new(InMemoryRoomRegistry::new(clock.clone()));
    let pusher = Arc::new(ChannelPusher::new());
    let leave_room = Arc::new(LeaveRoomUseCase::new(
        registry.clone(),
        pusher.clone(),
        clock.clone(),
    ));
    Relay {
        join_room: JoinRoomUseCase::new(
            registry.clone(),
            pusher.clone(),
            leave_room.clone(),
            clock.clone(),
        ),
        send_message: SendMessageUseCase::new(registry.clone(), pusher.clone(), clock),
        get_users: GetUsersUseCase::new(registry.clone(), pusher.clone()),
        leave_room,
        registry,
        pusher,
    }
}

struct Client {
    session: Session,
    rx: mpsc::Receiver<String>,
}

impl Client {
    async fn connect(pusher: &ChannelPusher) -> Self {
        let connection = ConnectionId::generate();
        let (tx, rx) = mpsc::channel(OUTBOUND_QUEUE_CAPACITY);
        pusher.register(connection.clone(), tx).await;
        Self {
            session: Session::new(connection),
            rx,
        }
    }

    async fn next_event(&mut self) -> ServerEvent {
        let payload = self.rx.recv().await.expect("expected a queued event");
        serde_json::from_str(&payload).expect("valid server event")
    }

    fn no_pending_events(&mut self) -> bool {
        self.rx.try_recv().is_err()
    }
}

fn room(name: &str) -> RoomName {
    RoomName::new(name).unwrap()
}

fn user(name: &str) -> Username {
    Username::new(name).unwrap()
}

#[tokio::test]
async fn lobby_conversation_between_two_clients() {
    let relay = relay();
    let mut alice = Client::connect(&relay.pusher).await;
    let mut bob = Client::connect(&relay.pusher).await;

    // Alice joins the lobby: private history replay, then her own join
    // notice and the new member count.
    relay
        .join_room
        .execute(&mut alice.session, room(DEFAULT_ROOM), user("Alice"))
        .await;

    match alice.next_event().await {
        ServerEvent::RoomHistory { messages } => {
            assert_eq!(messages.len(), 1);
            assert!(messages[0].is_system());
            assert_eq!(messages[0].text, "Welcome to the public lobby!");
        }
        other => panic!("expected roomHistory, got {other:?}"),
    }
    match alice.next_event().await {
        ServerEvent::Message { message } => {
            assert_eq!(message.text, "Alice has joined the chat.");
        }
        other => panic!("expected join notice, got {other:?}"),
    }
    assert_eq!(alice.next_event().await, ServerEvent::UserCount { count: 1 });

    // Bob joins: his replay already contains Alice's join notice, and
    // Alice sees his arrival.
    relay
        .join_room
        .execute(&mut bob.session, room(DEFAULT_ROOM), user("Bob"))
        .await;

    match bob.next_event().await {
        ServerEvent::RoomHistory { messages } => {
            assert_eq!(messages.len(), 2);
            assert_eq!(messages[1].text, "Alice has joined the chat.");
        }
        other => panic!("expected roomHistory, got {other:?}"),
    }
    match bob.next_event().await {
        ServerEvent::Message { message } => {
            assert_eq!(message.text, "Bob has joined the chat.");
        }
        other => panic!("expected join notice, got {other:?}"),
    }
    assert_eq!(bob.next_event().await, ServerEvent::UserCount { count: 2 });

    match alice.next_event().await {
        ServerEvent::Message { message } => {
            assert_eq!(message.text, "Bob has joined the chat.");
        }
        other => panic!("expected join notice, got {other:?}"),
    }
    assert_eq!(alice.next_event().await, ServerEvent::UserCount { count: 2 });

    // A chat message reaches both members, the sender included, as the
    // same event.
    relay
        .send_message
        .execute(&alice.session, "Hello everyone!".to_string())
        .await
        .unwrap();

    let to_alice = alice.next_event().await;
    let to_bob = bob.next_event().await;
    assert_eq!(to_alice, to_bob);
    match to_alice {
        ServerEvent::Message { message } => {
            assert_eq!(message.sender, "Alice");
            assert_eq!(message.text, "Hello everyone!");
            assert_eq!(message.room_id, DEFAULT_ROOM);
        }
        other => panic!("expected chat message, got {other:?}"),
    }

    // The roster lists members in join order, answered to the requester
    // only.
    let users = relay.get_users.execute(&bob.session, None).await.unwrap();
    assert_eq!(users, vec!["Alice", "Bob"]);
    assert_eq!(
        bob.next_event().await,
        ServerEvent::UserList {
            users: vec!["Alice".to_string(), "Bob".to_string()]
        }
    );

    // Bob leaves: only Alice is notified.
    assert!(relay.leave_room.execute(&mut bob.session).await);

    match alice.next_event().await {
        ServerEvent::Message { message } => {
            assert_eq!(message.text, "Bob has left the chat.");
        }
        other => panic!("expected leave notice, got {other:?}"),
    }
    assert_eq!(alice.next_event().await, ServerEvent::UserCount { count: 1 });
    assert!(bob.no_pending_events());
}

#[tokio::test]
async fn room_switch_announces_departure_to_the_old_room() {
    let relay = relay();
    let mut alice = Client::connect(&relay.pusher).await;
    let mut bob = Client::connect(&relay.pusher).await;

    relay
        .join_room
        .execute(&mut alice.session, room(DEFAULT_ROOM), user("Alice"))
        .await;
    relay
        .join_room
        .execute(&mut bob.session, room(DEFAULT_ROOM), user("Bob"))
        .await;
    for _ in 0..5 {
        // 3 own join events + 2 for Bob's arrival.
        alice.next_event().await;
    }
    for _ in 0..3 {
        bob.next_event().await;
    }

    relay
        .join_room
        .execute(&mut bob.session, room("abc123"), user("Bob"))
        .await;

    match alice.next_event().await {
        ServerEvent::Message { message } => {
            assert_eq!(message.text, "Bob has left the chat.");
        }
        other => panic!("expected leave notice, got {other:?}"),
    }
    assert_eq!(alice.next_event().await, ServerEvent::UserCount { count: 1 });

    // Bob's replay comes from the fresh room, not the lobby.
    match bob.next_event().await {
        ServerEvent::RoomHistory { messages } => {
            assert_eq!(messages.len(), 1);
            assert_eq!(messages[0].text, "Welcome to room abc123!");
        }
        other => panic!("expected roomHistory, got {other:?}"),
    }
}

#[tokio::test]
async fn private_room_is_destroyed_when_its_last_member_leaves() {
    let relay = relay();
    let mut alice = Client::connect(&relay.pusher).await;

    relay
        .join_room
        .execute(&mut alice.session, room("abc123"), user("Alice"))
        .await;
    relay
        .send_message
        .execute(&alice.session, "leaving a trace".to_string())
        .await
        .unwrap();
    assert!(relay.registry.get(&room("abc123")).await.is_some());

    assert!(relay.leave_room.execute(&mut alice.session).await);

    // The emptied room is gone; the default room survives regardless.
    assert!(relay.registry.get(&room("abc123")).await.is_none());
    assert!(relay.registry.get(&room(DEFAULT_ROOM)).await.is_some());

    // Recreating the room starts from a clean log: the earlier trace
    // message must not resurface.
    let mut second = Client::connect(&relay.pusher).await;
    relay
        .join_room
        .execute(&mut second.session, room("abc123"), user("Alice"))
        .await;

    match second.next_event().await {
        ServerEvent::RoomHistory { messages } => {
            assert_eq!(messages.len(), 1);
            assert_eq!(messages[0].text, "Welcome to room abc123!");
        }
        other => panic!("expected roomHistory, got {other:?}"),
    }
}

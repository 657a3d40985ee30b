//! UseCase: querying the member name list of a room.

use std::sync::Arc;

use banter_shared::protocol::ServerEvent;

use crate::domain::{OutboundPusher, RoomName, RoomRegistry};

use super::error::GetUsersError;
use super::session::Session;

pub struct GetUsersUseCase {
    registry: Arc<dyn RoomRegistry>,
    pusher: Arc<dyn OutboundPusher>,
}

impl GetUsersUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, pusher: Arc<dyn OutboundPusher>) -> Self {
        Self { registry, pusher }
    }

    /// Reply to the requesting session only with the member list of the
    /// given room (or the session's current room when omitted).
    ///
    /// An unknown room yields an empty list, not a failure. With no
    /// explicit room and no joined room the command is dropped.
    pub async fn execute(
        &self,
        session: &Session,
        room: Option<RoomName>,
    ) -> Result<Vec<String>, GetUsersError> {
        let target = room
            .or_else(|| session.membership().map(|m| m.room.clone()))
            .ok_or(GetUsersError::NoRoom)?;

        let users = match self.registry.get(&target).await {
            Some(handle) => handle.lock().await.member_names(),
            None => Vec::new(),
        };

        let event = ServerEvent::UserList {
            users: users.clone(),
        };
        if let Err(e) = self
            .pusher
            .push_to(session.connection(), &event.to_json())
            .await
        {
            tracing::warn!(
                "failed to send user list to connection '{}': {}",
                session.connection(),
                e
            );
        }

        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    use banter_shared::time::FixedClock;

    use crate::domain::{
        ConnectionId, DEFAULT_ROOM, Member, OUTBOUND_QUEUE_CAPACITY, Username,
    };
    use crate::infrastructure::pusher::ChannelPusher;
    use crate::infrastructure::registry::InMemoryRoomRegistry;

    fn fixtures() -> (Arc<InMemoryRoomRegistry>, Arc<ChannelPusher>, GetUsersUseCase) {
        let clock: Arc<FixedClock> = Arc::new(FixedClock::new(1000));
        let registry = Arc::new(InMemoryRoomRegistry::new(clock));
        let pusher = Arc::new(ChannelPusher::new());
        let usecase = GetUsersUseCase::new(registry.clone(), pusher.clone());
        (registry, pusher, usecase)
    }

    async fn joined_session(
        registry: &InMemoryRoomRegistry,
        pusher: &ChannelPusher,
        room: &str,
        username: &str,
    ) -> (Session, mpsc::Receiver<String>) {
        let connection = ConnectionId::generate();
        let (tx, rx) = mpsc::channel(OUTBOUND_QUEUE_CAPACITY);
        pusher.register(connection.clone(), tx).await;

        let name = RoomName::new(room).unwrap();
        let handle = registry.resolve_or_create(&name).await;
        handle.lock().await.add_member(Member {
            connection: connection.clone(),
            username: Username::new(username).unwrap(),
        });

        let mut session = Session::new(connection);
        session.set_membership(name, Username::new(username).unwrap());
        (session, rx)
    }

    #[tokio::test]
    async fn sole_joiner_sees_exactly_their_own_name() {
        let (registry, pusher, usecase) = fixtures();
        let (alice, mut rx) = joined_session(&registry, &pusher, DEFAULT_ROOM, "Alice").await;

        let users = usecase.execute(&alice, None).await.unwrap();

        assert_eq!(users, vec!["Alice"]);
        let event: ServerEvent = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        assert_eq!(
            event,
            ServerEvent::UserList {
                users: vec!["Alice".to_string()]
            }
        );
    }

    #[tokio::test]
    async fn list_reflects_insertion_order() {
        let (registry, pusher, usecase) = fixtures();
        let (_charlie, _rx1) = joined_session(&registry, &pusher, DEFAULT_ROOM, "Charlie").await;
        let (_alice, _rx2) = joined_session(&registry, &pusher, DEFAULT_ROOM, "Alice").await;
        let (bob, _rx3) = joined_session(&registry, &pusher, DEFAULT_ROOM, "Bob").await;

        let users = usecase.execute(&bob, None).await.unwrap();

        assert_eq!(users, vec!["Charlie", "Alice", "Bob"]);
    }

    #[tokio::test]
    async fn unknown_room_yields_empty_list() {
        let (registry, pusher, usecase) = fixtures();
        let (alice, mut rx) = joined_session(&registry, &pusher, DEFAULT_ROOM, "Alice").await;

        let users = usecase
            .execute(&alice, Some(RoomName::new("nowhere").unwrap()))
            .await
            .unwrap();

        assert!(users.is_empty());
        let event: ServerEvent = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        assert_eq!(event, ServerEvent::UserList { users: vec![] });
    }

    #[tokio::test]
    async fn unjoined_session_without_explicit_room_is_dropped() {
        let (_registry, pusher, usecase) = fixtures();
        let connection = ConnectionId::generate();
        let (tx, mut rx) = mpsc::channel(OUTBOUND_QUEUE_CAPACITY);
        pusher.register(connection.clone(), tx).await;
        let session = Session::new(connection);

        let result = usecase.execute(&session, None).await;

        assert_eq!(result, Err(GetUsersError::NoRoom));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn reply_goes_to_the_requester_only() {
        let (registry, pusher, usecase) = fixtures();
        let (alice, mut alice_rx) = joined_session(&registry, &pusher, DEFAULT_ROOM, "Alice").await;
        let (_bob, mut bob_rx) = joined_session(&registry, &pusher, DEFAULT_ROOM, "Bob").await;

        usecase.execute(&alice, None).await.unwrap();

        assert!(alice_rx.recv().await.is_some());
        assert!(bob_rx.try_recv().is_err());
    }
}

//! Connection-scoped session state.

use crate::domain::{ConnectionId, RoomName, Username};

/// The room a session is currently joined to, with the name it joined
/// under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub room: RoomName,
    pub username: Username,
}

/// Per-connection state held by the gateway task.
///
/// Invariant: while `membership` is set, the referenced room contains a
/// matching member record for this connection. The join and leave use
/// cases maintain both sides of that invariant on every transition.
#[derive(Debug)]
pub struct Session {
    connection: ConnectionId,
    membership: Option<Membership>,
}

impl Session {
    pub fn new(connection: ConnectionId) -> Self {
        Self {
            connection,
            membership: None,
        }
    }

    pub fn connection(&self) -> &ConnectionId {
        &self.connection
    }

    pub fn is_joined(&self) -> bool {
        self.membership.is_some()
    }

    pub fn membership(&self) -> Option<&Membership> {
        self.membership.as_ref()
    }

    pub(crate) fn set_membership(&mut self, room: RoomName, username: Username) {
        self.membership = Some(Membership { room, username });
    }

    pub(crate) fn take_membership(&mut self) -> Option<Membership> {
        self.membership.take()
    }
}

//! Use-case error types.
//!
//! These are state-precondition violations, not failures: the gateway
//! logs them at debug level and drops the command, per the relay's
//! "silently ignored" policy.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendMessageError {
    #[error("session has not joined a room")]
    NotJoined,
    #[error("message text is empty after trimming")]
    EmptyMessage,
    /// The session claims a room that the registry no longer knows.
    /// Should not occur while the membership invariant holds.
    #[error("room '{0}' is missing its state")]
    RoomMissing(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GetUsersError {
    #[error("no room specified and session has not joined one")]
    NoRoom,
}

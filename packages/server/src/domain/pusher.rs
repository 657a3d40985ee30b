//! Outbound pusher trait.
//!
//! Delivery of serialized events to connections. Each connection owns a
//! bounded queue drained by its writer task, so fan-out never blocks on a
//! slow recipient and never stalls a room's critical section.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use tokio::sync::mpsc;

use super::value_object::ConnectionId;

/// Capacity of each connection's outbound queue. A recipient that falls
/// this far behind starts losing events rather than stalling the room.
pub const OUTBOUND_QUEUE_CAPACITY: usize = 256;

/// Sending half of a connection's outbound queue.
pub type OutboundQueue = mpsc::Sender<String>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PushError {
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),
    #[error("outbound queue for connection '{0}' is full or closed")]
    QueueUnavailable(String),
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait OutboundPusher: Send + Sync {
    /// Register a connection's outbound queue.
    async fn register(&self, connection: ConnectionId, queue: OutboundQueue);

    /// Drop a connection's outbound queue. Idempotent.
    async fn unregister(&self, connection: &ConnectionId);

    /// Deliver a payload to a single connection.
    async fn push_to(&self, connection: &ConnectionId, payload: &str) -> Result<(), PushError>;

    /// Deliver a payload to every target. Unsendable targets (unknown,
    /// full or closed queues) are logged and skipped; fan-out itself never
    /// fails.
    async fn broadcast(&self, targets: Vec<ConnectionId>, payload: &str);
}

//! Channel-backed outbound pusher.
//!
//! The WebSocket itself lives in the UI layer; this implementation only
//! manages each connection's bounded queue and feeds it with `try_send`,
//! so neither a single push nor a broadcast ever waits on a recipient.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, OutboundPusher, OutboundQueue, PushError};

#[derive(Default)]
pub struct ChannelPusher {
    queues: Mutex<HashMap<ConnectionId, OutboundQueue>>,
}

impl ChannelPusher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OutboundPusher for ChannelPusher {
    async fn register(&self, connection: ConnectionId, queue: OutboundQueue) {
        let mut queues = self.queues.lock().await;
        queues.insert(connection.clone(), queue);
        tracing::debug!("connection '{}' registered with pusher", connection);
    }

    async fn unregister(&self, connection: &ConnectionId) {
        let mut queues = self.queues.lock().await;
        queues.remove(connection);
        tracing::debug!("connection '{}' unregistered from pusher", connection);
    }

    async fn push_to(&self, connection: &ConnectionId, payload: &str) -> Result<(), PushError> {
        let queues = self.queues.lock().await;
        let queue = queues
            .get(connection)
            .ok_or_else(|| PushError::ConnectionNotFound(connection.to_string()))?;
        queue
            .try_send(payload.to_string())
            .map_err(|_| PushError::QueueUnavailable(connection.to_string()))
    }

    async fn broadcast(&self, targets: Vec<ConnectionId>, payload: &str) {
        let queues = self.queues.lock().await;
        for target in targets {
            match queues.get(&target) {
                Some(queue) => {
                    if queue.try_send(payload.to_string()).is_err() {
                        tracing::warn!(
                            "dropping event for connection '{}': queue full or closed",
                            target
                        );
                    }
                }
                None => {
                    tracing::warn!("connection '{}' not found during broadcast, skipping", target);
                }
            }
        }
    }
}

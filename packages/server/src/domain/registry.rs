//! Room registry trait.
//!
//! The domain layer defines the interface it needs for room lookup and
//! lifecycle; the infrastructure layer provides the in-memory
//! implementation. Callers only ever receive per-room handles; the
//! underlying map is never exposed.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::entity::Room;
use super::value_object::RoomName;

/// Shared handle to one room. The mutex serializes every mutation of that
/// room's state; rooms lock independently of each other.
pub type RoomHandle = Arc<Mutex<Room>>;

#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Return the existing room or atomically create one seeded with its
    /// system welcome message. Never fails.
    ///
    /// The handle can go stale before the caller locks it: if the room is
    /// deleted in that window it is marked closed, and the caller must
    /// check [`Room::is_closed`] under the lock and resolve again.
    async fn resolve_or_create(&self, name: &RoomName) -> RoomHandle;

    /// Look up a room without creating it.
    async fn get(&self, name: &RoomName) -> Option<RoomHandle>;

    /// Delete a non-default room with zero members, marking it closed
    /// while both the map and the room are locked. No-op (returning
    /// `false`) for the default room, non-empty rooms and unknown names.
    ///
    /// Callers must not hold any room lock when calling this.
    async fn remove_if_empty(&self, name: &RoomName) -> bool;

    /// Names of all active rooms.
    async fn room_names(&self) -> Vec<RoomName>;

    /// Number of active rooms.
    async fn room_count(&self) -> usize;
}

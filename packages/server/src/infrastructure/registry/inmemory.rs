//! In-memory room registry.
//!
//! A map from room name to per-room handle. The outer lock only guards
//! the map; each room carries its own mutex, so events targeting
//! different rooms proceed fully in parallel while all mutation of one
//! room stays serialized.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use banter_shared::time::Clock;

use crate::domain::{Room, RoomHandle, RoomName, RoomRegistry};

pub struct InMemoryRoomRegistry {
    rooms: Mutex<HashMap<RoomName, RoomHandle>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRoomRegistry {
    /// Create a registry with the default room already present, so it
    /// exists even with zero members.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let lobby = RoomName::default_room();
        let mut rooms = HashMap::new();
        rooms.insert(
            lobby.clone(),
            Arc::new(Mutex::new(Room::new(lobby, clock.now_millis()))),
        );
        Self {
            rooms: Mutex::new(rooms),
            clock,
        }
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn resolve_or_create(&self, name: &RoomName) -> RoomHandle {
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(name.clone())
            .or_insert_with(|| {
                tracing::info!("room '{}' created", name);
                Arc::new(Mutex::new(Room::new(name.clone(), self.clock.now_millis())))
            })
            .clone()
    }

    async fn get(&self, name: &RoomName) -> Option<RoomHandle> {
        let rooms = self.rooms.lock().await;
        rooms.get(name).cloned()
    }

    async fn remove_if_empty(&self, name: &RoomName) -> bool {
        if name.is_default() {
            return false;
        }

        // Map lock, then room lock. Callers hold no room lock here (see
        // trait contract), so this ordering cannot deadlock.
        let mut rooms = self.rooms.lock().await;
        let Some(handle) = rooms.get(name) else {
            return false;
        };
        {
            let mut room = handle.lock().await;
            if !room.is_empty() {
                return false;
            }
            // Closed while both locks are held: anyone who resolved this
            // handle earlier will observe the flag once they acquire the
            // room lock, instead of mutating an unregistered room.
            room.close();
        }
        rooms.remove(name);
        tracing::info!("room '{}' removed (empty)", name);
        true
    }

    async fn room_names(&self) -> Vec<RoomName> {
        let rooms = self.rooms.lock().await;
        let mut names: Vec<RoomName> = rooms.keys().cloned().collect();
        names.sort();
        names
    }

    async fn room_count(&self) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.len()
    }
}

//! Room registry
//!
//! Rooms are created on first reference through [`RoomManager::get_or_create`]
//! and hold their participants plus the shared document and chat log. Each
//! room sits behind its own async mutex, so fan-out for one room runs to
//! completion before the next update to that room is applied while other
//! rooms proceed independently.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use shared_types::{ChatEntry, RoomState, ServerMessage};
use tokio::sync::{mpsc, Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::connection::{ConnectionHandle, ConnectionId};
use crate::error::RoomError;

#[derive(Debug)]
pub struct Room {
    clients: Vec<ConnectionHandle>,
    state: RoomState,
    last_activity: Instant,
}

impl Room {
    fn new() -> Self {
        Self {
            clients: Vec::new(),
            state: RoomState::default(),
            last_activity: Instant::now(),
        }
    }

    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    fn contains(&self, id: ConnectionId) -> bool {
        self.clients.iter().any(|c| c.id() == id)
    }

    /// Deliver to every client, then drop the ones that failed
    async fn fan_out(&mut self, message: &ServerMessage) -> usize {
        let mut dead = Vec::new();
        for client in &self.clients {
            if let Err(e) = client.send(message.clone()).await {
                debug!("Delivery failed: {}", e);
                dead.push(client.id());
            }
        }

        if !dead.is_empty() {
            warn!("Evicting {} dead connection(s)", dead.len());
            self.clients.retain(|c| !dead.contains(&c.id()));
        }
        self.clients.len()
    }
}

#[derive(Debug, Default)]
pub struct RoomManager {
    rooms: RwLock<HashMap<String, Arc<Mutex<Room>>>>,
    next_id: AtomicU64,
}

impl RoomManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a handle for a new participant
    pub fn connect(&self) -> (ConnectionHandle, mpsc::Receiver<ServerMessage>) {
        let id = ConnectionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        ConnectionHandle::channel(id)
    }

    /// The only way a room comes into existence
    pub async fn get_or_create(&self, room_key: &str) -> Arc<Mutex<Room>> {
        if let Some(room) = self.rooms.read().await.get(room_key) {
            return Arc::clone(room);
        }

        let mut rooms = self.rooms.write().await;
        Arc::clone(rooms.entry(room_key.to_string()).or_insert_with(|| {
            info!("Room {:?} created", room_key);
            Arc::new(Mutex::new(Room::new()))
        }))
    }

    async fn existing(&self, room_key: &str) -> Option<Arc<Mutex<Room>>> {
        self.rooms.read().await.get(room_key).cloned()
    }

    /// Register `connection` and send it the current room state
    ///
    /// Joining twice keeps a single registration but resends the state. A
    /// joiner whose state delivery fails is not kept.
    pub async fn join(
        &self,
        room_key: &str,
        connection: ConnectionHandle,
    ) -> Result<(), RoomError> {
        let room = self.get_or_create(room_key).await;
        let mut room = room.lock().await;
        room.touch();

        let snapshot = ServerMessage::State(room.state.clone());
        connection.send(snapshot).await?;

        if !room.contains(connection.id()) {
            debug!("Connection {} joined room {:?}", connection.id(), room_key);
            room.clients.push(connection);
        }
        Ok(())
    }

    /// Remove a connection; absent rooms and connections are ignored
    pub async fn leave(&self, room_key: &str, id: ConnectionId) {
        let Some(room) = self.existing(room_key).await else {
            return;
        };
        let mut room = room.lock().await;
        let before = room.clients.len();
        room.clients.retain(|c| c.id() != id);
        if room.clients.len() < before {
            room.touch();
            debug!("Connection {} left room {:?}", id, room_key);
        }
    }

    /// Send to every participant of a room, returning how many remain
    pub async fn broadcast(&self, room_key: &str, message: &ServerMessage) -> usize {
        match self.existing(room_key).await {
            Some(room) => room.lock().await.fan_out(message).await,
            None => 0,
        }
    }

    /// Replace the shared document, then broadcast it
    pub async fn update_document(&self, room_key: &str, content: String) -> usize {
        let room = self.get_or_create(room_key).await;
        let mut room = room.lock().await;
        room.touch();
        room.state.document = content.clone();
        room.fan_out(&ServerMessage::Document(content)).await
    }

    /// Append to the chat log, then broadcast the entry
    pub async fn add_chat(&self, room_key: &str, user: String, text: String) -> usize {
        let room = self.get_or_create(room_key).await;
        let mut room = room.lock().await;
        room.touch();
        let entry = ChatEntry { user, text };
        room.state.chat.push(entry.clone());
        room.fan_out(&ServerMessage::Chat(entry)).await
    }

    /// Broadcast to every room known at call time
    pub async fn broadcast_all(&self, message: &ServerMessage) {
        let rooms: Vec<(String, Arc<Mutex<Room>>)> = self
            .rooms
            .read()
            .await
            .iter()
            .map(|(key, room)| (key.clone(), Arc::clone(room)))
            .collect();

        for (key, room) in rooms {
            let remaining = room.lock().await.fan_out(message).await;
            debug!("Broadcast to room {:?} reached {} client(s)", key, remaining);
        }
    }

    pub async fn room_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.rooms.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub async fn client_count(&self, room_key: &str) -> usize {
        match self.existing(room_key).await {
            Some(room) => room.lock().await.clients.len(),
            None => 0,
        }
    }

    pub async fn room_state(&self, room_key: &str) -> Option<RoomState> {
        let room = self.existing(room_key).await?;
        let state = room.lock().await.state.clone();
        Some(state)
    }

    /// Drop rooms with no participants and no activity for `ttl`
    ///
    /// Rooms that are locked or referenced outside the registry are in use
    /// and are kept.
    pub async fn evict_idle_rooms(&self, ttl: Duration) -> usize {
        let mut rooms = self.rooms.write().await;
        let before = rooms.len();
        rooms.retain(|key, room| {
            if Arc::strong_count(room) > 1 {
                return true;
            }
            let Ok(guard) = room.try_lock() else {
                return true;
            };
            let idle = guard.clients.is_empty() && guard.last_activity.elapsed() >= ttl;
            if idle {
                info!("Room {:?} evicted after {:?} idle", key, ttl);
            }
            !idle
        });
        before - rooms.len()
    }
}

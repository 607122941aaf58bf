use super::room::Room;
use crate::RoomKey;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::RwLock;

/// Owns every live room. Rooms come into existence on first join and are
/// destroyed when their roster empties; each room sits behind its own lock
/// so operations against one room serialize in arrival order while
/// independent rooms stay fully parallel.
///
/// Lock order is always map before room; no path acquires them the other
/// way around.
pub struct Registry {
    rooms: RwLock<HashMap<RoomKey, Arc<Mutex<Room>>>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }
}

impl Registry {
    /// Room under `key`, created fresh if absent.
    pub async fn obtain(&self, key: &str) -> Arc<Mutex<Room>> {
        self.rooms
            .write()
            .await
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Room::new(key.to_string()))))
            .clone()
    }
    /// Room under `key`, if one exists.
    pub async fn lookup(&self, key: &str) -> Option<Arc<Mutex<Room>>> {
        self.rooms.read().await.get(key).cloned()
    }
    /// Destroy the room if its roster has emptied. The instance is retired
    /// first, so a racing operation that already cloned the handle
    /// re-creates a fresh room instead of resurrecting this one.
    pub async fn sweep(&self, key: &str) {
        let mut rooms = self.rooms.write().await;
        if let Some(cell) = rooms.get(key) {
            let mut room = cell.lock().await;
            if room.roster().is_empty() {
                room.retire();
                drop(room);
                rooms.remove(key);
                log::info!("[registry] closed room {}", key);
            }
        }
    }
    pub async fn len(&self) -> usize {
        self.rooms.read().await.len()
    }
}

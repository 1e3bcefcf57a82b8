use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{Backlog, Room};
use crate::errors::domain::DomainError;
use crate::repos::rooms::RoomRepository;

/// Room storage keyed by room name.
#[derive(Default)]
pub struct InMemoryRoomRepository {
    rooms: DashMap<String, Room>,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn get_or_create(&self, room: Room) -> Result<Room, DomainError> {
        let entry = self.rooms.entry(room.name.clone()).or_insert(room);
        Ok(entry.value().clone())
    }

    async fn get(&self, name: &str) -> Result<Room, DomainError> {
        self.rooms
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| DomainError::room_not_found(name))
    }

    async fn update_backlog(&self, name: &str, backlog: Backlog) -> Result<(), DomainError> {
        let mut entry = self
            .rooms
            .get_mut(name)
            .ok_or_else(|| DomainError::room_not_found(name))?;
        entry.backlog = backlog;
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), DomainError> {
        self.rooms.remove(name);
        Ok(())
    }
}

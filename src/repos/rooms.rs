use async_trait::async_trait;

use crate::domain::{Backlog, Room};
use crate::errors::domain::DomainError;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Create the room, or return the existing record under the same name.
    async fn get_or_create(&self, room: Room) -> Result<Room, DomainError>;

    /// Fetch a room by name. `NotFound(Room)` when it does not exist.
    async fn get(&self, name: &str) -> Result<Room, DomainError>;

    /// Replace the room's backlog (pending and finalized together) in a
    /// single state transition; partial writes must not be observable.
    async fn update_backlog(&self, name: &str, backlog: Backlog) -> Result<(), DomainError>;

    async fn delete(&self, name: &str) -> Result<(), DomainError>;
}

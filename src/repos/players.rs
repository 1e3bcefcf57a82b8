use async_trait::async_trait;

use crate::domain::Player;
use crate::errors::domain::DomainError;

#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Fetch the player record for `name`, creating it with an unset vote on
    /// first join. At most one record per (room, name).
    async fn get_or_create(&self, room: &str, name: &str) -> Result<Player, DomainError>;

    /// Fetch an existing record. `NotFound(Player)` when absent.
    async fn get(&self, room: &str, name: &str) -> Result<Player, DomainError>;

    /// All player records for the room, in join order.
    async fn list(&self, room: &str) -> Result<Vec<Player>, DomainError>;

    /// Set or clear one player's vote. `NotFound(Player)` when absent.
    async fn set_vote(
        &self,
        room: &str,
        name: &str,
        vote: Option<String>,
    ) -> Result<(), DomainError>;

    /// Clear every player's vote in the room.
    async fn reset_votes(&self, room: &str) -> Result<(), DomainError>;

    /// Remove one player record. Removing an absent record is a no-op.
    async fn delete(&self, room: &str, name: &str) -> Result<(), DomainError>;

    /// Remove every player record for the room.
    async fn delete_room(&self, room: &str) -> Result<(), DomainError>;
}

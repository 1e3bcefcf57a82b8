use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::Player;
use crate::errors::domain::DomainError;
use crate::repos::players::PlayerRepository;

/// Player storage keyed by room name. The `Vec` preserves join order, which
/// is the order the not-voted list is reported in.
#[derive(Default)]
pub struct InMemoryPlayerRepository {
    players: DashMap<String, Vec<Player>>,
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    async fn get_or_create(&self, room: &str, name: &str) -> Result<Player, DomainError> {
        let mut entry = self.players.entry(room.to_string()).or_default();
        if let Some(existing) = entry.iter().find(|p| p.name == name) {
            return Ok(existing.clone());
        }
        let player = Player::new(name);
        entry.push(player.clone());
        Ok(player)
    }

    async fn get(&self, room: &str, name: &str) -> Result<Player, DomainError> {
        self.players
            .get(room)
            .and_then(|entry| entry.iter().find(|p| p.name == name).cloned())
            .ok_or_else(|| DomainError::player_not_found(name))
    }

    async fn list(&self, room: &str) -> Result<Vec<Player>, DomainError> {
        Ok(self
            .players
            .get(room)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn set_vote(
        &self,
        room: &str,
        name: &str,
        vote: Option<String>,
    ) -> Result<(), DomainError> {
        let mut entry = self
            .players
            .get_mut(room)
            .ok_or_else(|| DomainError::player_not_found(name))?;
        let player = entry
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| DomainError::player_not_found(name))?;
        player.vote = vote;
        Ok(())
    }

    async fn reset_votes(&self, room: &str) -> Result<(), DomainError> {
        if let Some(mut entry) = self.players.get_mut(room) {
            for player in entry.iter_mut() {
                player.vote = None;
            }
        }
        Ok(())
    }

    async fn delete(&self, room: &str, name: &str) -> Result<(), DomainError> {
        if let Some(mut entry) = self.players.get_mut(room) {
            entry.retain(|p| p.name != name);
        }
        Ok(())
    }

    async fn delete_room(&self, room: &str) -> Result<(), DomainError> {
        self.players.remove(room);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_or_create_is_idempotent_per_identity() {
        let repo = InMemoryPlayerRepository::new();
        repo.get_or_create("r", "alice").await.unwrap();
        repo.set_vote("r", "alice", Some("5".into())).await.unwrap();

        // Second call returns the existing record, does not duplicate it.
        let again = repo.get_or_create("r", "alice").await.unwrap();
        assert_eq!(again.vote, Some("5".to_string()));
        assert_eq!(repo.list("r").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_preserves_join_order() {
        let repo = InMemoryPlayerRepository::new();
        for name in ["carol", "alice", "bob"] {
            repo.get_or_create("r", name).await.unwrap();
        }
        let names: Vec<String> = repo
            .list("r")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["carol", "alice", "bob"]);
    }

    #[tokio::test]
    async fn set_vote_for_unknown_player_is_not_found() {
        let repo = InMemoryPlayerRepository::new();
        repo.get_or_create("r", "alice").await.unwrap();
        let err = repo.set_vote("r", "ghost", Some("3".into())).await;
        assert!(err.is_err());
    }
}

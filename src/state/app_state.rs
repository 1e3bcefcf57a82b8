use std::sync::Arc;

use crate::adapters::{InMemoryPlayerRepository, InMemoryRoomRepository};
use crate::repos::{PlayerRepository, RoomRepository};
use crate::services::room_flow::RoomCoordinator;
use crate::ws::hub::RoomGroupRegistry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<dyn RoomRepository>,
    pub players: Arc<dyn PlayerRepository>,
    pub registry: Arc<RoomGroupRegistry>,
    pub coordinator: Arc<RoomCoordinator>,
}

impl AppState {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        players: Arc<dyn PlayerRepository>,
        registry: Arc<RoomGroupRegistry>,
    ) -> Self {
        let coordinator = Arc::new(RoomCoordinator::new(
            rooms.clone(),
            players.clone(),
            registry.clone(),
        ));
        Self {
            rooms,
            players,
            registry,
            coordinator,
        }
    }

    /// State wired to the in-memory adapters; the production configuration
    /// for this single-process server, and the one tests use as well.
    pub fn new_in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryRoomRepository::new()),
            Arc::new(InMemoryPlayerRepository::new()),
            Arc::new(RoomGroupRegistry::new()),
        )
    }
}

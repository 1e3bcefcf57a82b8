//! In-memory repository adapters. The process owns room and player state;
//! these adapters provide the storage behind the repository traits without
//! any durability guarantees.

pub mod players_mem;
pub mod rooms_mem;

pub use players_mem::InMemoryPlayerRepository;
pub use rooms_mem::InMemoryRoomRepository;

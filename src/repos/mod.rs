//! Repository traits the coordinator depends on. Durability and recovery are
//! the adapter's concern; serialization of concurrent access is not — that
//! happens at the room coordinator boundary.

pub mod players;
pub mod rooms;

pub use players::PlayerRepository;
pub use rooms::RoomRepository;

pub mod room_flow;

pub use room_flow::RoomCoordinator;

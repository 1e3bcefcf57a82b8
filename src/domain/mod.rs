//! Domain layer: pure poker-room types and logic, no I/O.

pub mod backlog;
pub mod consensus;
pub mod room;

pub use backlog::{Backlog, BacklogItem};
pub use consensus::{evaluate, Consensus};
pub use room::{Mode, Player, Room};

#[cfg(test)]
mod tests_backlog;
#[cfg(test)]
mod tests_consensus;
#[cfg(test)]
mod tests_props_consensus;

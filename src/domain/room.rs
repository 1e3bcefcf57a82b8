use serde::{Deserialize, Serialize};

use crate::domain::backlog::Backlog;

/// Consensus policy for a room, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Unanimity,
    AbsoluteMajority,
}

/// An isolated voting session: unique name, the identity allowed to start
/// rounds, a consensus policy, and the backlog under estimation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub creator: String,
    pub mode: Mode,
    pub backlog: Backlog,
}

impl Room {
    pub fn new(
        name: impl Into<String>,
        creator: impl Into<String>,
        mode: Mode,
        backlog: Backlog,
    ) -> Self {
        Self {
            name: name.into(),
            creator: creator.into(),
            mode,
            backlog,
        }
    }
}

/// A participant's record within a room. At most one record per (room, name);
/// a reconnecting identity reuses its record with the vote reset to unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub vote: Option<String>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vote: None,
        }
    }

    pub fn has_voted(&self) -> bool {
        self.vote.is_some()
    }
}

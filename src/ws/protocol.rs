use serde::{Deserialize, Serialize};

use crate::domain::BacklogItem;

/// Messages a client may send over the room socket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    Vote { player: String, vote: String },
    Reveal,
    StartFeature,
}

/// One (voter, vote) pair in a reveal broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteEntry {
    pub name: String,
    pub vote: String,
}

/// Messages the coordinator broadcasts to room subscribers, plus targeted
/// error replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    NotVotedUpdate {
        not_voted: Vec<String>,
    },
    PlayerVote {
        player: String,
        vote: String,
        all_voted: bool,
        not_voted: Vec<String>,
    },
    FeatureUpdate {
        feature: BacklogItem,
    },
    Reveal {
        votes: Vec<VoteEntry>,
        consensus: bool,
    },
    FinalBacklog {
        final_backlog: Vec<BacklogItem>,
    },
    Redirect {
        url: String,
    },
    Error {
        message: String,
    },
}

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// A unit of work awaiting an estimate. `priority` is populated exactly once,
/// when the item leaves the pending queue with an agreed vote value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklogItem {
    pub feature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl BacklogItem {
    pub fn new(feature: impl Into<String>) -> Self {
        Self {
            feature: feature.into(),
            priority: None,
        }
    }
}

/// Ordered pending items (front = item currently under vote) plus the list of
/// finalized items. Pending and finalized partition the room's item set; an
/// item moves pending -> finalized exactly once and never comes back.
///
/// Holds no locks of its own; all mutation goes through the room
/// coordinator's per-room serialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Backlog {
    pending: VecDeque<BacklogItem>,
    finalized: Vec<BacklogItem>,
}

impl Backlog {
    pub fn new(pending: Vec<BacklogItem>) -> Self {
        Self {
            pending: pending.into(),
            finalized: Vec::new(),
        }
    }

    /// The item currently under vote, if any.
    pub fn peek_front(&self) -> Option<&BacklogItem> {
        self.pending.front()
    }

    /// Move the front item to the finalized list, stamping it with the agreed
    /// vote value. Returns the finalized item, or `None` when pending is empty.
    pub fn pop_front_with_priority(&mut self, priority: &str) -> Option<BacklogItem> {
        let mut item = self.pending.pop_front()?;
        item.priority = Some(priority.to_string());
        self.finalized.push(item.clone());
        Some(item)
    }

    /// True when no pending items remain.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn finalized_snapshot(&self) -> Vec<BacklogItem> {
        self.finalized.clone()
    }
}

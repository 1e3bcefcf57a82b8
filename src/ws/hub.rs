use actix::prelude::*;
use dashmap::DashMap;
use uuid::Uuid;

use crate::ws::protocol::ServerMsg;

/// A server message addressed to one connection's actor mailbox.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct Outbound(pub ServerMsg);

/// Fan-out primitives the room coordinator depends on. A connection, not a
/// person, is the unit of membership; identity bookkeeping stays in the
/// coordinator.
///
/// Delivery is a non-blocking mailbox enqueue, so callers may invoke these
/// while holding the per-room lock; per-recipient mailbox order preserves the
/// production order of a single room's broadcasts.
pub trait GroupBroadcaster: Send + Sync {
    /// Add a connection to a room group. Adding twice is a no-op.
    fn join(&self, group: &str, conn: Uuid);
    /// Remove a connection from a room group. Removing an absent member is a
    /// no-op.
    fn leave(&self, group: &str, conn: Uuid);
    /// Deliver to every current member of the group.
    fn send(&self, group: &str, msg: ServerMsg);
    /// Deliver to a single connection, if still registered.
    fn send_to(&self, conn: Uuid, msg: ServerMsg);
}

/// Room-keyed registry of live websocket connections.
///
/// `connections` maps every registered connection to its session recipient;
/// `groups` tracks which connections subscribe to which room. Sessions
/// register themselves on actor start and unregister on stop; group
/// membership is driven by the coordinator's join/leave.
#[derive(Default)]
pub struct RoomGroupRegistry {
    connections: DashMap<Uuid, Recipient<Outbound>>,
    groups: DashMap<String, DashMap<Uuid, ()>>,
}

impl RoomGroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_connection(&self, conn: Uuid, recipient: Recipient<Outbound>) {
        self.connections.insert(conn, recipient);
    }

    /// Drop the connection and any group membership it still holds.
    pub fn unregister_connection(&self, conn: Uuid) {
        self.connections.remove(&conn);
        self.groups.retain(|_, members| {
            members.remove(&conn);
            !members.is_empty()
        });
    }

    #[cfg(test)]
    pub fn group_len(&self, group: &str) -> usize {
        self.groups.get(group).map(|m| m.len()).unwrap_or(0)
    }
}

impl GroupBroadcaster for RoomGroupRegistry {
    fn join(&self, group: &str, conn: Uuid) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(conn, ());
    }

    fn leave(&self, group: &str, conn: Uuid) {
        if let Some(members) = self.groups.get(group) {
            members.remove(&conn);
        }
    }

    fn send(&self, group: &str, msg: ServerMsg) {
        if let Some(members) = self.groups.get(group) {
            for member in members.iter() {
                if let Some(recipient) = self.connections.get(member.key()) {
                    recipient.do_send(Outbound(msg.clone()));
                }
            }
        }
    }

    fn send_to(&self, conn: Uuid, msg: ServerMsg) {
        if let Some(recipient) = self.connections.get(&conn) {
            recipient.do_send(Outbound(msg));
        }
    }
}

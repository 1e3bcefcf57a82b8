//! The per-room coordinator: the single writer for a room's player set and
//! backlog.
//!
//! Every mutating operation (join, leave, vote, reveal, start_round) takes
//! the room's lock for the duration of mutation plus snapshot-taking, so
//! interleaved events from different connections can never observe or
//! produce a torn view (e.g. two broadcasts of one vote carrying different
//! not-voted lists). Operations on distinct rooms are independent.
//!
//! Broadcasts are buffered while the lock is held and handed to the fan-out
//! before the lock is released; the fan-out is a non-blocking mailbox
//! enqueue, which keeps the critical section short while still guaranteeing
//! that one room's broadcasts reach subscribers in production order.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{consensus, Player, Room};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::{PlayerRepository, RoomRepository};
use crate::ws::hub::GroupBroadcaster;
use crate::ws::protocol::{ServerMsg, VoteEntry};

/// Reserved vote token: a consensus on this value ends the session with a
/// redirect instead of finalizing a backlog item.
pub const END_SESSION_VOTE: &str = "200";

pub struct RoomCoordinator {
    rooms: Arc<dyn RoomRepository>,
    players: Arc<dyn PlayerRepository>,
    broadcaster: Arc<dyn GroupBroadcaster>,
    /// One lock per room; all five operations serialize on it.
    locks: DashMap<String, Arc<Mutex<()>>>,
    /// Live connections per room, with the identity each one joined as.
    connected: DashMap<String, HashMap<Uuid, String>>,
}

impl RoomCoordinator {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        players: Arc<dyn PlayerRepository>,
        broadcaster: Arc<dyn GroupBroadcaster>,
    ) -> Self {
        Self {
            rooms,
            players,
            broadcaster,
            locks: DashMap::new(),
            connected: DashMap::new(),
        }
    }

    fn room_lock(&self, room: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(room.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Register a connection for `identity` in `room`.
    ///
    /// Reconnects are idempotent: the connection's prior group membership is
    /// dropped first, a pre-existing player record is reused, and a vote left
    /// over from a finalized round is reset to unset. Stale records of
    /// participants who disconnected without voting are pruned here so they
    /// cannot block `all_voted` for the players who remain.
    pub async fn join(
        &self,
        room_name: &str,
        identity: &str,
        conn: Uuid,
    ) -> Result<(), DomainError> {
        if identity.trim().is_empty() {
            return Err(DomainError::validation(
                ValidationKind::EmptyIdentity,
                "A participant identity is required to join",
            ));
        }

        let lock = self.room_lock(room_name);
        let _guard = lock.lock().await;

        let room = self.rooms.get(room_name).await?;

        // A reconnect must not leave a duplicate group membership behind.
        self.broadcaster.leave(room_name, conn);

        self.prune_stale_players(room_name, identity).await?;

        let player = self.players.get_or_create(room_name, identity).await?;
        if player.vote.is_some() {
            // Rejoining always starts the player "not yet voted"; a stale
            // vote from an already-finalized round must not leak forward.
            self.players.set_vote(room_name, identity, None).await?;
        }

        self.broadcaster.join(room_name, conn);
        self.connected
            .entry(room_name.to_string())
            .or_default()
            .insert(conn, identity.to_string());

        let mut out = Vec::new();
        if identity == room.creator {
            push_round_state(&room, &mut out);
        }
        let not_voted = not_voted_names(&self.players.list(room_name).await?);
        out.push(ServerMsg::NotVotedUpdate { not_voted });

        info!(room = room_name, player = identity, %conn, "player joined");
        self.flush(room_name, out);
        Ok(())
    }

    /// Drop the connection from the room's fan-out group. The player record
    /// survives for reconnect; `join` prunes it lazily if it never votes.
    pub async fn leave(&self, room_name: &str, conn: Uuid) {
        let lock = self.room_lock(room_name);
        let _guard = lock.lock().await;

        self.broadcaster.leave(room_name, conn);
        if let Some(mut conns) = self.connected.get_mut(room_name) {
            if let Some(identity) = conns.remove(&conn) {
                info!(room = room_name, player = %identity, %conn, "player left");
            }
        }
    }

    /// Record `identity`'s vote and broadcast the updated round state.
    ///
    /// The not-voted list is computed once and reused for both broadcasts of
    /// this operation; recomputing it against a room that may have mutated in
    /// between is exactly the drift this coordinator exists to prevent.
    pub async fn vote(
        &self,
        room_name: &str,
        identity: &str,
        value: &str,
    ) -> Result<(), DomainError> {
        let vote = value.trim();
        if vote.is_empty() {
            return Err(DomainError::invalid_vote("A vote value must not be empty"));
        }

        let lock = self.room_lock(room_name);
        let _guard = lock.lock().await;

        // Voting requires an existing record; join creates it.
        self.players.get(room_name, identity).await?;
        self.players
            .set_vote(room_name, identity, Some(vote.to_string()))
            .await?;

        let not_voted = not_voted_names(&self.players.list(room_name).await?);
        let all_voted = not_voted.is_empty();

        debug!(room = room_name, player = identity, vote, all_voted, "vote recorded");
        self.flush(
            room_name,
            vec![
                ServerMsg::PlayerVote {
                    player: identity.to_string(),
                    vote: vote.to_string(),
                    all_voted,
                    not_voted: not_voted.clone(),
                },
                ServerMsg::NotVotedUpdate { not_voted },
            ],
        );
        Ok(())
    }

    /// Evaluate the round. A no-op while any registered player's vote is
    /// unset; that is the expected guard against a reveal racing a vote, not
    /// an error.
    pub async fn reveal(&self, room_name: &str) -> Result<(), DomainError> {
        let lock = self.room_lock(room_name);
        let _guard = lock.lock().await;

        let players = self.players.list(room_name).await?;
        if players.is_empty() || players.iter().any(|p| !p.has_voted()) {
            debug!(room = room_name, "reveal ignored, not everyone has voted");
            return Ok(());
        }

        let votes: Vec<VoteEntry> = players
            .iter()
            .map(|p| VoteEntry {
                name: p.name.clone(),
                vote: p.vote.clone().unwrap_or_default(),
            })
            .collect();
        let values: Vec<String> = votes.iter().map(|v| v.vote.clone()).collect();

        let mut room = self.rooms.get(room_name).await?;
        let result = consensus::evaluate(room.mode, &values);

        let mut out = Vec::new();
        match result.value {
            Some(value) if value == END_SESSION_VOTE => {
                // Session-level escape hatch: no backlog mutation.
                info!(room = room_name, "session ended by sentinel vote");
                out.push(ServerMsg::Redirect {
                    url: format!("/final_backlog/{room_name}/"),
                });
            }
            Some(value) => {
                if room.backlog.is_empty() {
                    out.push(ServerMsg::FinalBacklog {
                        final_backlog: room.backlog.finalized_snapshot(),
                    });
                } else {
                    room.backlog.pop_front_with_priority(&value);
                    // Pending and finalized move in one repository write.
                    self.rooms
                        .update_backlog(room_name, room.backlog.clone())
                        .await?;
                    self.players.reset_votes(room_name).await?;

                    info!(room = room_name, priority = %value, "consensus reached");
                    out.push(ServerMsg::Reveal {
                        votes,
                        consensus: true,
                    });
                    let not_voted = not_voted_names(&self.players.list(room_name).await?);
                    out.push(ServerMsg::NotVotedUpdate { not_voted });
                    match room.backlog.peek_front() {
                        Some(next) => out.push(ServerMsg::FeatureUpdate {
                            feature: next.clone(),
                        }),
                        None => out.push(ServerMsg::FinalBacklog {
                            final_backlog: room.backlog.finalized_snapshot(),
                        }),
                    }
                }
            }
            None => {
                self.players.reset_votes(room_name).await?;
                info!(room = room_name, "no consensus, restarting the round");
                let not_voted = not_voted_names(&self.players.list(room_name).await?);
                out.push(ServerMsg::NotVotedUpdate { not_voted });
                out.push(ServerMsg::Reveal {
                    votes,
                    consensus: false,
                });
            }
        }

        self.flush(room_name, out);
        Ok(())
    }

    /// Broadcast the current front-of-backlog item, or the finalized list when
    /// nothing is pending. Idempotent: no mutation, safe to call repeatedly.
    pub async fn start_round(&self, room_name: &str) -> Result<(), DomainError> {
        let lock = self.room_lock(room_name);
        let _guard = lock.lock().await;

        let room = self.rooms.get(room_name).await?;
        let mut out = Vec::new();
        push_round_state(&room, &mut out);
        self.flush(room_name, out);
        Ok(())
    }

    /// Tear down a room: player records, room record, locks, and connection
    /// bookkeeping. Live sockets are left to time out or close on their own.
    pub async fn delete_room(&self, room_name: &str) -> Result<(), DomainError> {
        let lock = self.room_lock(room_name);
        {
            let _guard = lock.lock().await;
            self.players.delete_room(room_name).await?;
            self.rooms.delete(room_name).await?;
            self.connected.remove(room_name);
        }
        self.locks.remove(room_name);
        info!(room = room_name, "room deleted");
        Ok(())
    }

    /// Delete records of players who disconnected without voting. The joining
    /// identity and anyone still connected are kept; a voter's record is kept
    /// even while offline so their vote still counts for the current round.
    async fn prune_stale_players(&self, room_name: &str, joining: &str) -> Result<(), DomainError> {
        let connected: HashSet<String> = self
            .connected
            .get(room_name)
            .map(|conns| conns.values().cloned().collect())
            .unwrap_or_default();

        for player in self.players.list(room_name).await? {
            if player.vote.is_none() && player.name != joining && !connected.contains(&player.name)
            {
                debug!(room = room_name, player = %player.name, "pruning stale player");
                self.players.delete(room_name, &player.name).await?;
            }
        }
        Ok(())
    }

    fn flush(&self, room_name: &str, out: Vec<ServerMsg>) {
        for msg in out {
            self.broadcaster.send(room_name, msg);
        }
    }
}

fn not_voted_names(players: &[Player]) -> Vec<String> {
    players
        .iter()
        .filter(|p| !p.has_voted())
        .map(|p| p.name.clone())
        .collect()
}

/// The round bootstrap broadcast: the item under vote, or the finalized list
/// (possibly empty) when the backlog has been exhausted or was empty at
/// creation.
fn push_round_state(room: &Room, out: &mut Vec<ServerMsg>) {
    match room.backlog.peek_front() {
        Some(feature) => out.push(ServerMsg::FeatureUpdate {
            feature: feature.clone(),
        }),
        None => out.push(ServerMsg::FinalBacklog {
            final_backlog: room.backlog.finalized_snapshot(),
        }),
    }
}

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::domain::DomainError;
use crate::services::room_flow::RoomCoordinator;
use crate::ws::hub::{GroupBroadcaster, Outbound, RoomGroupRegistry};
use crate::ws::protocol::{ClientMsg, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

/// One websocket connection to a room. The actor owns no room state; it
/// forwards client events to the coordinator and writes back whatever the
/// registry delivers to its mailbox.
pub struct WsSession {
    conn_id: Uuid,
    room: String,
    identity: String,
    coordinator: Arc<RoomCoordinator>,
    registry: Arc<RoomGroupRegistry>,
    last_heartbeat: Instant,
}

impl WsSession {
    pub fn new(
        room: String,
        identity: String,
        coordinator: Arc<RoomCoordinator>,
        registry: Arc<RoomGroupRegistry>,
    ) -> Self {
        Self {
            conn_id: Uuid::new_v4(),
            room,
            identity,
            coordinator,
            registry,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    /// Reply to this connection only, through the registry so targeted
    /// replies and group broadcasts share one ordered mailbox.
    fn reply_error(&self, message: impl Into<String>) {
        self.registry.send_to(
            self.conn_id,
            ServerMsg::Error {
                message: message.into(),
            },
        );
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(
                    conn_id = %actor.conn_id,
                    room = %actor.room,
                    player = %actor.identity,
                    "[WS SESSION] heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn dispatch(&self, cmd: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        let coordinator = self.coordinator.clone();
        let room = self.room.clone();

        let fut = async move {
            match cmd {
                ClientMsg::Vote { player, vote } => coordinator.vote(&room, &player, &vote).await,
                ClientMsg::Reveal => coordinator.reveal(&room).await,
                ClientMsg::StartFeature => coordinator.start_round(&room).await,
            }
        };

        ctx.spawn(fut.into_actor(self).map(|res, actor, _ctx| {
            if let Err(err) = res {
                // Rejections are surfaced to the offending connection only.
                actor.reply_error(err.to_string());
            }
        }));
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            conn_id = %self.conn_id,
            room = %self.room,
            player = %self.identity,
            "[WS SESSION] started"
        );

        self.registry
            .register_connection(self.conn_id, ctx.address().recipient::<Outbound>());
        self.start_heartbeat(ctx);

        let coordinator = self.coordinator.clone();
        let room = self.room.clone();
        let identity = self.identity.clone();
        let conn_id = self.conn_id;

        ctx.spawn(
            async move { coordinator.join(&room, &identity, conn_id).await }
                .into_actor(self)
                .map(|res, actor, ctx| {
                    if let Err(err) = res {
                        // An unknown room (or blank identity) closes the
                        // socket; there is nothing to subscribe to.
                        warn!(
                            conn_id = %actor.conn_id,
                            room = %actor.room,
                            error = %err,
                            "[WS SESSION] join rejected"
                        );
                        match err {
                            DomainError::NotFound(..) => {
                                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Invalid)));
                            }
                            DomainError::Validation(..) => {
                                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Policy)));
                            }
                        }
                        ctx.stop();
                    }
                }),
        );
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.registry.unregister_connection(self.conn_id);

        // `stopped` runs exactly once per actor, so leave fires exactly once
        // per connection, however the socket went away.
        let coordinator = self.coordinator.clone();
        let room = self.room.clone();
        let conn_id = self.conn_id;
        actix::spawn(async move {
            coordinator.leave(&room, conn_id).await;
        });

        info!(
            conn_id = %self.conn_id,
            room = %self.room,
            player = %self.identity,
            "[WS SESSION] stopped"
        );
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();

                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(cmd) => self.dispatch(cmd, ctx),
                    Err(_) => {
                        // Malformed envelopes keep the connection open.
                        Self::send_json(
                            ctx,
                            &ServerMsg::Error {
                                message: "unknown event".to_string(),
                            },
                        );
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_json(
                    ctx,
                    &ServerMsg::Error {
                        message: "unknown event".to_string(),
                    },
                );
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    room = %self.room,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<Outbound> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: Outbound, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}

use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use serde::Deserialize;

use crate::state::app_state::AppState;
use crate::ws::session::WsSession;

/// Identity arrives pre-established; this layer only carries it. Room
/// existence is checked by the coordinator's join, which closes the socket
/// for unknown rooms.
#[derive(Debug, Deserialize)]
pub struct UpgradeQuery {
    pub name: String,
}

async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    path: web::Path<String>,
    query: web::Query<UpgradeQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = WsSession::new(
        path.into_inner(),
        query.into_inner().name,
        app_state.coordinator.clone(),
        app_state.registry.clone(),
    );
    ws::start(session, &req, stream)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{room}", web::get().to(upgrade));
}

//! Room lifecycle endpoints. Creating a name that already exists returns the
//! existing room rather than failing, so the creator's "create" and a
//! latecomer's "join" share one code path.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::info;

use crate::domain::{Backlog, BacklogItem, Mode, Room};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    pub creator: String,
    pub mode: Mode,
    #[serde(default)]
    pub backlog: Vec<BacklogItem>,
}

async fn create_room(
    body: web::Json<CreateRoomRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    if req.name.trim().is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidRoomName,
            "A room name is required",
        )
        .into());
    }
    if req.creator.trim().is_empty() {
        return Err(DomainError::validation(
            ValidationKind::EmptyIdentity,
            "A creator identity is required",
        )
        .into());
    }

    let room = Room::new(
        req.name.trim(),
        req.creator.trim(),
        req.mode,
        Backlog::new(req.backlog),
    );
    let room = app_state.rooms.get_or_create(room).await?;
    info!(room = %room.name, creator = %room.creator, "room ready");
    Ok(HttpResponse::Ok().json(room))
}

async fn get_room(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let room = app_state.rooms.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(room))
}

/// The prioritized result list, for the final backlog page and exports.
async fn get_final_backlog(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let room = app_state.rooms.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(room.backlog.finalized_snapshot()))
}

async fn delete_room(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let name = path.into_inner();
    // Ensure the room exists so deletes of unknown names 404.
    app_state.rooms.get(&name).await?;
    app_state.coordinator.delete_room(&name).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_room))
        .service(
            web::resource("/{name}")
                .route(web::get().to(get_room))
                .route(web::delete().to(delete_room)),
        )
        .route("/{name}/backlog", web::get().to(get_final_backlog));
}

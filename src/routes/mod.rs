use actix_web::web;

pub mod health;
pub mod realtime;
pub mod rooms;

/// Configure application routes for the server and for test harnesses.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Room CRUD routes: /api/rooms/**
    cfg.service(web::scope("/api/rooms").configure(rooms::configure_routes));

    // Realtime routes: /ws/poker/{room}
    cfg.service(web::scope("/ws/poker").configure(realtime::configure_routes));
}

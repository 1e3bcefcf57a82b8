use actix_web::{web, App, HttpServer};
use poker_backend::middleware::cors::cors_middleware;
use poker_backend::middleware::request_trace::RequestTrace;
use poker_backend::routes;
use poker_backend::state::app_state::AppState;
use poker_backend::ServerConfig;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid server configuration: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "🚀 Starting Planning Poker Backend on http://{}:{}",
        config.host, config.port
    );

    // Single-process model: rooms, players, and the fan-out registry all
    // live in this process.
    let app_state = AppState::new_in_memory();
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

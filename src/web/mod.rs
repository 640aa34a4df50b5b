mod handlers;
mod state;

use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::bot::Router;
use state::AppState;

/// Serve the bot over HTTP until the process is stopped.
pub async fn start_server(router: Router, host: &str, port: u16) -> std::io::Result<()> {
    let data = web::Data::new(AppState::new(router));

    info!("Starting meteorite statistics bot on http://{host}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(data.clone())
            .route("/api/message", web::post().to(handlers::message))
            .route("/api/commands", web::get().to(handlers::commands))
            .route("/api/statistics", web::get().to(handlers::statistics))
    })
    .bind((host, port))?
    .run()
    .await
}

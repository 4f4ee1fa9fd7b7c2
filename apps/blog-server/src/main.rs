//! # Blog Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::middleware::from_fn;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;
mod templates;

use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;
use templates::Templates;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    let templates = Templates::load(config.templates_dir.as_deref())
        .context("failed to load templates")?;

    let state = AppState::new(config.database.as_ref(), templates).await?;

    tracing::info!(
        host = %config.host,
        port = config.port,
        storage = state.storage.as_str(),
        "Starting blog server"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(from_fn(middleware::request_id))
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
    .run()
    .await?;

    Ok(())
}

mod config;
mod dto;
mod error;
mod handlers;
mod models;
mod repository;
mod service;

use std::sync::Arc;

use handlers::rest;
use repository::Repository;
use service::NoteService;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to load config: {e}");
    });
    tracing::info!("Loaded notes server config: {:?}", cfg);

    // Store and service creation
    let repo_ptr = Arc::new(tokio::sync::Mutex::new(Repository::new()));
    let service = Arc::new(NoteService::new(repo_ptr));

    let router = rest::router(service);

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr())
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to {}: {e}", cfg.bind_addr());
            panic!("failed to bind to address: {e}");
        });

    match listener.local_addr() {
        Ok(addr) => tracing::info!("Notes server starting, listening on {}", addr),
        Err(e) => tracing::warn!("Notes server starting, local address unknown: {e}"),
    }
    tracing::warn!("Notes are kept in memory only and are lost on restart");

    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!("HTTP server error: {e}");
        panic!("failed to start HTTP server: {e}");
    }
}

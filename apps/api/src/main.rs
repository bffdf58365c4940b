//! Atelier content API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dev_seed;
mod dto;
mod error;
mod graphql;
mod handlers;
mod state;

use atelier_core::AppError;
use tracing::info;

use crate::api_config::{ApiConfig, ContentStoreConfig, init_tracing};
use crate::api_router::build_router;
use crate::api_services::{build_app_state, build_content_repository, connect_and_migrate};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    if config.migrate_only {
        if let ContentStoreConfig::Postgres { database_url } = &config.content_store {
            connect_and_migrate(database_url).await?;
        }
        info!("database migrations applied successfully");
        return Ok(());
    }

    let repository = build_content_repository(&config).await?;
    let app_state = build_app_state(repository, &config);

    if config.seed_system_blueprints {
        app_state.blueprint_service.seed_system_blueprints().await?;
    }

    if config.dev_seed {
        dev_seed::run(&app_state.blueprint_service).await?;
    }

    let app = build_router(app_state, &config.frontend_url)?;
    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "atelier-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

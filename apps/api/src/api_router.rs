use axum::Router;
use axum::routing::{get, patch, post};
use atelier_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

mod cors;


pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let blueprint_routes = Router::new()
        .route(
            "/api/blueprints",
            get(handlers::blueprints::list_blueprints_handler)
                .post(handlers::blueprints::create_blueprint_handler),
        )
        .route(
            "/api/blueprints/{blueprint_id}",
            get(handlers::blueprints::get_blueprint_handler)
                .put(handlers::blueprints::update_blueprint_handler)
                .delete(handlers::blueprints::delete_blueprint_handler),
        );

    let component_routes = Router::new()
        .route(
            "/api/pages/{page_id}/components",
            get(handlers::page_components::list_page_components_handler)
                .put(handlers::page_components::save_page_components_handler)
                .post(handlers::page_components::create_page_component_handler),
        )
        .route(
            "/api/components/{instance_id}",
            patch(handlers::components::update_component_handler)
                .delete(handlers::components::delete_component_handler),
        )
        .route(
            "/api/components/{instance_id}/duplicate",
            post(handlers::components::duplicate_component_handler),
        )
        .route(
            "/api/components/{instance_id}/validation",
            get(handlers::components::component_validation_handler),
        );

    let block_definition_routes = Router::new()
        .route(
            "/api/block-definitions",
            get(handlers::block_definitions::list_block_definitions_handler),
        )
        .route(
            "/api/block-definitions/{block_type}",
            get(handlers::block_definitions::get_block_definition_handler),
        )
        .route(
            "/api/block-definitions/{block_type}/validate",
            post(handlers::block_definitions::validate_block_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/graphql", post(handlers::graphql::graphql_handler))
        .merge(blueprint_routes)
        .merge(component_routes)
        .merge(block_definition_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use atelier_application::{BlueprintFilter, SaveBlueprintInput};
use atelier_domain::ContentBlueprint;

use crate::dto::{BlueprintListQuery, SaveBlueprintRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_blueprints_handler(
    State(state): State<AppState>,
    Query(query): Query<BlueprintListQuery>,
) -> ApiResult<Json<Vec<ContentBlueprint>>> {
    let filter = BlueprintFilter {
        blueprint_type: query.blueprint_type()?,
    };
    let blueprints = state.blueprint_service.list_blueprints(filter).await?;

    Ok(Json(blueprints))
}

pub async fn get_blueprint_handler(
    State(state): State<AppState>,
    Path(blueprint_id): Path<String>,
) -> ApiResult<Json<ContentBlueprint>> {
    let blueprint = state.blueprint_service.get_blueprint(&blueprint_id).await?;

    Ok(Json(blueprint))
}

pub async fn create_blueprint_handler(
    State(state): State<AppState>,
    Json(payload): Json<SaveBlueprintRequest>,
) -> ApiResult<(StatusCode, Json<ContentBlueprint>)> {
    let blueprint = state
        .blueprint_service
        .create_blueprint(SaveBlueprintInput::try_from(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(blueprint)))
}

pub async fn update_blueprint_handler(
    State(state): State<AppState>,
    Path(blueprint_id): Path<String>,
    Json(payload): Json<SaveBlueprintRequest>,
) -> ApiResult<Json<ContentBlueprint>> {
    let blueprint = state
        .blueprint_service
        .update_blueprint(&blueprint_id, SaveBlueprintInput::try_from(payload)?)
        .await?;

    Ok(Json(blueprint))
}

pub async fn delete_blueprint_handler(
    State(state): State<AppState>,
    Path(blueprint_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.blueprint_service.delete_blueprint(&blueprint_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

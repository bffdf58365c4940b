use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use atelier_application::CreateInstanceInput;
use atelier_domain::BlueprintInstance;

use crate::dto::{CreateInstanceRequest, parse_status};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_page_components_handler(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
) -> ApiResult<Json<Vec<BlueprintInstance>>> {
    let instances = state.blueprint_service.list_page_components(&page_id).await?;

    Ok(Json(instances))
}

pub async fn save_page_components_handler(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
    Json(instances): Json<Vec<BlueprintInstance>>,
) -> ApiResult<Json<Vec<BlueprintInstance>>> {
    let stored = state
        .blueprint_service
        .save_page_components(&page_id, instances)
        .await?;

    Ok(Json(stored))
}

pub async fn create_page_component_handler(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
    Json(payload): Json<CreateInstanceRequest>,
) -> ApiResult<(StatusCode, Json<BlueprintInstance>)> {
    let instance = state
        .blueprint_service
        .create_instance(CreateInstanceInput {
            page_id,
            blueprint_id: payload.blueprint_id,
            data: payload.data,
            status: parse_status(payload.status.as_deref())?,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(instance)))
}

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use atelier_application::UpdateInstanceInput;
use atelier_domain::BlueprintInstance;

use crate::dto::{BlockValidationResponse, LocaleQuery, UpdateInstanceRequest, parse_status};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn update_component_handler(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
    Query(query): Query<LocaleQuery>,
    Json(payload): Json<UpdateInstanceRequest>,
) -> ApiResult<Json<BlueprintInstance>> {
    let instance = state
        .blueprint_service
        .update_instance(
            &instance_id,
            UpdateInstanceInput {
                locale: query.locale,
                data: payload.data,
                status: parse_status(payload.status.as_deref())?,
            },
        )
        .await?;

    Ok(Json(instance))
}

pub async fn delete_component_handler(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.blueprint_service.delete_instance(&instance_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn duplicate_component_handler(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
) -> ApiResult<(StatusCode, Json<BlueprintInstance>)> {
    let copy = state
        .blueprint_service
        .duplicate_instance(&instance_id)
        .await?;

    Ok((StatusCode::CREATED, Json(copy)))
}

pub async fn component_validation_handler(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> ApiResult<Json<BlockValidationResponse>> {
    let validation = state
        .blueprint_service
        .validate_instance(&instance_id, query.locale)
        .await?;

    Ok(Json(BlockValidationResponse::from(validation)))
}

use axum::Json;
use axum::extract::{Path, Query};
use serde_json::Value;

use atelier_core::AppError;
use atelier_domain::{
    BlockFieldDefinition, field_definitions_by_category, get_block_field_definition,
    validate_block_data,
};

use crate::dto::{BlockCategoryResponse, BlockValidationResponse, LocaleQuery};
use crate::error::ApiResult;

pub async fn list_block_definitions_handler() -> Json<Vec<BlockCategoryResponse>> {
    let categories = field_definitions_by_category()
        .into_iter()
        .map(|(category, blocks)| BlockCategoryResponse {
            category: category.to_owned(),
            blocks: blocks.into_iter().cloned().collect(),
        })
        .collect();

    Json(categories)
}

pub async fn get_block_definition_handler(
    Path(block_type): Path<String>,
) -> ApiResult<Json<BlockFieldDefinition>> {
    let definition = get_block_field_definition(&block_type)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("block type '{block_type}' is not registered")))?;

    Ok(Json(definition))
}

/// Validation outcomes are data: unknown block types and invalid payloads
/// both answer `200` with `valid: false`.
pub async fn validate_block_handler(
    Path(block_type): Path<String>,
    Query(query): Query<LocaleQuery>,
    Json(data): Json<Value>,
) -> Json<BlockValidationResponse> {
    Json(BlockValidationResponse::from(validate_block_data(
        &block_type,
        &data,
        query.locale,
    )))
}

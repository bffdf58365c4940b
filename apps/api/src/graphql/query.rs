use std::str::FromStr;

use async_graphql::{Context, Json, Object, Result as GqlResult};
use atelier_application::{BlueprintFilter, BlueprintService, PageQuery};
use atelier_domain::{BlueprintType, field_definitions_by_category, validate_block_data};
use serde_json::Value;

use super::types::{
    BlockCategoryObject, BlockValidationObject, BlueprintObject, PageComponentsObject,
};
use super::{graphql_error, parse_locale};

/// Read-only entry points.
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Blueprints ordered by name, optionally restricted to one type.
    async fn blueprints(
        &self,
        ctx: &Context<'_>,
        blueprint_type: Option<String>,
    ) -> GqlResult<Vec<BlueprintObject>> {
        let service = ctx.data::<BlueprintService>()?;
        let blueprint_type = blueprint_type
            .as_deref()
            .map(BlueprintType::from_str)
            .transpose()
            .map_err(graphql_error)?;

        let blueprints = service
            .list_blueprints(BlueprintFilter { blueprint_type })
            .await
            .map_err(graphql_error)?;

        Ok(blueprints.iter().map(BlueprintObject::from).collect())
    }

    async fn blueprint(&self, ctx: &Context<'_>, id: String) -> GqlResult<Option<BlueprintObject>> {
        let service = ctx.data::<BlueprintService>()?;

        match service.get_blueprint(&id).await {
            Ok(blueprint) => Ok(Some(BlueprintObject::from(&blueprint))),
            Err(atelier_core::AppError::NotFound(_)) => Ok(None),
            Err(error) => Err(graphql_error(error)),
        }
    }

    /// Registry block definitions grouped by palette category.
    async fn block_definitions(&self) -> Vec<BlockCategoryObject> {
        field_definitions_by_category()
            .into_iter()
            .map(|(category, blocks)| BlockCategoryObject {
                category: category.to_owned(),
                blocks: Json(blocks.into_iter().cloned().collect()),
            })
            .collect()
    }

    async fn page_components(
        &self,
        ctx: &Context<'_>,
        page_id: String,
        locale: Option<String>,
        #[graphql(default = 10)] limit: usize,
        #[graphql(default = 0)] offset: usize,
    ) -> GqlResult<PageComponentsObject> {
        let service = ctx.data::<BlueprintService>()?;
        let locale = parse_locale(locale)?;

        let page = service
            .page_components_page(&page_id, locale, PageQuery { limit, offset })
            .await
            .map_err(graphql_error)?;

        Ok(PageComponentsObject::from(page))
    }

    async fn validate_block(
        &self,
        block_type: String,
        data: Json<Value>,
        locale: Option<String>,
    ) -> GqlResult<BlockValidationObject> {
        let locale = parse_locale(locale)?;

        Ok(BlockValidationObject::from(validate_block_data(
            &block_type,
            &data.0,
            locale,
        )))
    }
}

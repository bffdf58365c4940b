use std::str::FromStr;

use async_graphql::{Context, Json, Object, Result as GqlResult};
use atelier_application::{BlueprintService, CreateInstanceInput, UpdateInstanceInput};
use atelier_domain::{BlueprintInstance, InstanceStatus};
use serde_json::{Map, Value};

use super::types::InstanceObject;
use super::{graphql_error, parse_locale};

/// Page composition writes.
pub struct MutationRoot;

fn parse_status(status: Option<String>) -> GqlResult<Option<InstanceStatus>> {
    status
        .as_deref()
        .map(InstanceStatus::from_str)
        .transpose()
        .map_err(graphql_error)
}

#[Object]
impl MutationRoot {
    async fn create_blueprint_instance(
        &self,
        ctx: &Context<'_>,
        page_id: String,
        blueprint_id: String,
        data: Option<Json<Map<String, Value>>>,
        status: Option<String>,
    ) -> GqlResult<InstanceObject> {
        let service = ctx.data::<BlueprintService>()?;
        let instance = service
            .create_instance(CreateInstanceInput {
                page_id,
                blueprint_id,
                data: data.map(|data| data.0).unwrap_or_default(),
                status: parse_status(status)?,
            })
            .await
            .map_err(graphql_error)?;

        Ok(InstanceObject::from(&instance))
    }

    /// Merges `data` into one locale of the instance.
    async fn update_blueprint_instance(
        &self,
        ctx: &Context<'_>,
        id: String,
        locale: Option<String>,
        data: Option<Json<Map<String, Value>>>,
        status: Option<String>,
    ) -> GqlResult<InstanceObject> {
        let service = ctx.data::<BlueprintService>()?;
        let instance = service
            .update_instance(
                &id,
                UpdateInstanceInput {
                    locale: parse_locale(locale)?,
                    data: data.map(|data| data.0),
                    status: parse_status(status)?,
                },
            )
            .await
            .map_err(graphql_error)?;

        Ok(InstanceObject::from(&instance))
    }

    async fn duplicate_blueprint_instance(
        &self,
        ctx: &Context<'_>,
        id: String,
    ) -> GqlResult<InstanceObject> {
        let service = ctx.data::<BlueprintService>()?;
        let copy = service.duplicate_instance(&id).await.map_err(graphql_error)?;

        Ok(InstanceObject::from(&copy))
    }

    async fn delete_blueprint_instance(&self, ctx: &Context<'_>, id: String) -> GqlResult<bool> {
        let service = ctx.data::<BlueprintService>()?;
        service.delete_instance(&id).await.map_err(graphql_error)?;

        Ok(true)
    }

    /// Replaces the ordered component list of a page.
    async fn save_page_components(
        &self,
        ctx: &Context<'_>,
        page_id: String,
        instances: Json<Vec<BlueprintInstance>>,
    ) -> GqlResult<Vec<InstanceObject>> {
        let service = ctx.data::<BlueprintService>()?;
        let stored = service
            .save_page_components(&page_id, instances.0)
            .await
            .map_err(graphql_error)?;

        Ok(stored.iter().map(InstanceObject::from).collect())
    }
}

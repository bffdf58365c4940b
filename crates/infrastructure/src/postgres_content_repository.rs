use std::str::FromStr;

use async_trait::async_trait;
use atelier_application::ContentRepository;
use atelier_core::{AppError, AppResult};
use atelier_domain::{
    BlueprintInstance, BlueprintType, ContentBlueprint, FieldDefinition, InstanceStatus,
};
use serde_json::{Map, Value};
use sqlx::{FromRow, PgPool};

mod blueprints;
mod instances;
#[cfg(test)]
mod tests;

/// PostgreSQL-backed content repository.
#[derive(Clone)]
pub struct PostgresContentRepository {
    pool: PgPool,
}

impl PostgresContentRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct BlueprintRow {
    id: String,
    name: String,
    display_name: String,
    description: Option<String>,
    blueprint_type: String,
    allow_multiple: bool,
    is_system: bool,
    icon: Option<String>,
    category: String,
    fields: Value,
}

impl TryFrom<BlueprintRow> for ContentBlueprint {
    type Error = AppError;

    fn try_from(row: BlueprintRow) -> Result<Self, Self::Error> {
        let fields: Vec<FieldDefinition> = serde_json::from_value(row.fields).map_err(|error| {
            AppError::Internal(format!(
                "persisted fields of blueprint '{}' are invalid: {error}",
                row.name
            ))
        })?;
        let blueprint = ContentBlueprint::new(
            row.id,
            row.name,
            row.display_name,
            BlueprintType::from_str(row.blueprint_type.as_str())?,
            fields,
        )?
        .with_description(row.description)
        .with_icon(row.icon)
        .with_category(row.category)
        .with_allow_multiple(row.allow_multiple);

        Ok(if row.is_system {
            blueprint.as_system()
        } else {
            blueprint
        })
    }
}

#[derive(Debug, FromRow)]
struct InstanceRow {
    id: String,
    blueprint_id: String,
    page_id: String,
    data_en: Value,
    data_ar: Value,
    status: String,
    sort_order: i32,
}

impl TryFrom<InstanceRow> for BlueprintInstance {
    type Error = AppError;

    fn try_from(row: InstanceRow) -> Result<Self, Self::Error> {
        let order = usize::try_from(row.sort_order).map_err(|_| {
            AppError::Internal(format!(
                "component '{}' has negative order {}",
                row.id, row.sort_order
            ))
        })?;
        let mut instance = BlueprintInstance::new(row.id, row.blueprint_id)
            .with_page_id(row.page_id)
            .with_data(object_or_empty(row.data_en), object_or_empty(row.data_ar))
            .with_status(InstanceStatus::from_str(row.status.as_str())?);
        instance.set_order(order);
        Ok(instance)
    }
}

fn object_or_empty(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(object) => object,
        _ => Map::new(),
    }
}

fn sort_order(instance: &BlueprintInstance) -> AppResult<i32> {
    i32::try_from(instance.order()).map_err(|_| {
        AppError::Validation(format!(
            "component '{}' order {} is out of range",
            instance.id(),
            instance.order()
        ))
    })
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Database(database_error) if database_error.code().as_deref() == Some("23505")
    )
}

fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Database(database_error) if database_error.code().as_deref() == Some("23503")
    )
}

#[async_trait]
impl ContentRepository for PostgresContentRepository {
    async fn list_blueprints(
        &self,
        blueprint_type: Option<BlueprintType>,
    ) -> AppResult<Vec<ContentBlueprint>> {
        self.list_blueprints_impl(blueprint_type).await
    }

    async fn find_blueprint(&self, id: &str) -> AppResult<Option<ContentBlueprint>> {
        self.find_blueprint_impl(id).await
    }

    async fn find_blueprint_by_name(&self, name: &str) -> AppResult<Option<ContentBlueprint>> {
        self.find_blueprint_by_name_impl(name).await
    }

    async fn save_blueprint(&self, blueprint: ContentBlueprint) -> AppResult<()> {
        self.save_blueprint_impl(&blueprint).await
    }

    async fn delete_blueprint(&self, id: &str) -> AppResult<()> {
        self.delete_blueprint_impl(id).await
    }

    async fn list_page_instances(&self, page_id: &str) -> AppResult<Vec<BlueprintInstance>> {
        self.list_page_instances_impl(page_id).await
    }

    async fn find_instance(&self, id: &str) -> AppResult<Option<BlueprintInstance>> {
        self.find_instance_impl(id).await
    }

    async fn save_instance(&self, instance: BlueprintInstance) -> AppResult<()> {
        self.save_instance_impl(&instance).await
    }

    async fn delete_instance(&self, id: &str) -> AppResult<()> {
        self.delete_instance_impl(id).await
    }

    async fn replace_page_instances(
        &self,
        page_id: &str,
        instances: Vec<BlueprintInstance>,
    ) -> AppResult<()> {
        self.replace_page_instances_impl(page_id, &instances).await
    }
}

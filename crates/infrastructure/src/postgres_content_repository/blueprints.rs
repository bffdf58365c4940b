use super::*;

impl PostgresContentRepository {
    pub(super) async fn list_blueprints_impl(
        &self,
        blueprint_type: Option<BlueprintType>,
    ) -> AppResult<Vec<ContentBlueprint>> {
        let rows = sqlx::query_as::<_, BlueprintRow>(
            r#"
            SELECT id, name, display_name, description, blueprint_type,
                   allow_multiple, is_system, icon, category, fields
            FROM content_blueprints
            WHERE $1::TEXT IS NULL OR blueprint_type = $1
            ORDER BY name
            "#,
        )
        .bind(blueprint_type.map(|value| value.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list blueprints: {error}")))?;

        rows.into_iter().map(ContentBlueprint::try_from).collect()
    }

    pub(super) async fn find_blueprint_impl(&self, id: &str) -> AppResult<Option<ContentBlueprint>> {
        let row = sqlx::query_as::<_, BlueprintRow>(
            r#"
            SELECT id, name, display_name, description, blueprint_type,
                   allow_multiple, is_system, icon, category, fields
            FROM content_blueprints
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find blueprint '{id}': {error}")))?;

        row.map(ContentBlueprint::try_from).transpose()
    }

    pub(super) async fn find_blueprint_by_name_impl(
        &self,
        name: &str,
    ) -> AppResult<Option<ContentBlueprint>> {
        let row = sqlx::query_as::<_, BlueprintRow>(
            r#"
            SELECT id, name, display_name, description, blueprint_type,
                   allow_multiple, is_system, icon, category, fields
            FROM content_blueprints
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find blueprint named '{name}': {error}"))
        })?;

        row.map(ContentBlueprint::try_from).transpose()
    }

    pub(super) async fn save_blueprint_impl(&self, blueprint: &ContentBlueprint) -> AppResult<()> {
        let fields = serde_json::to_value(blueprint.fields()).map_err(|error| {
            AppError::Internal(format!(
                "failed to serialize fields of blueprint '{}': {error}",
                blueprint.name()
            ))
        })?;

        let result = sqlx::query(
            r#"
            INSERT INTO content_blueprints (
                id, name, display_name, description, blueprint_type,
                allow_multiple, is_system, icon, category, fields
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                display_name = EXCLUDED.display_name,
                description = EXCLUDED.description,
                blueprint_type = EXCLUDED.blueprint_type,
                allow_multiple = EXCLUDED.allow_multiple,
                is_system = EXCLUDED.is_system,
                icon = EXCLUDED.icon,
                category = EXCLUDED.category,
                fields = EXCLUDED.fields,
                updated_at = now()
            "#,
        )
        .bind(blueprint.id())
        .bind(blueprint.name())
        .bind(blueprint.display_name())
        .bind(blueprint.description())
        .bind(blueprint.blueprint_type().as_str())
        .bind(blueprint.allow_multiple())
        .bind(blueprint.is_system())
        .bind(blueprint.icon())
        .bind(blueprint.category())
        .bind(fields)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) if is_unique_violation(&error) => Err(AppError::Conflict(format!(
                "blueprint '{}' already exists",
                blueprint.name()
            ))),
            Err(error) => Err(AppError::Internal(format!(
                "failed to save blueprint '{}': {error}",
                blueprint.name()
            ))),
        }
    }

    pub(super) async fn delete_blueprint_impl(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM content_blueprints
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to delete blueprint '{id}': {error}"))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("blueprint '{id}' does not exist")));
        }

        Ok(())
    }
}

use super::*;

impl PostgresContentRepository {
    pub(super) async fn list_page_instances_impl(
        &self,
        page_id: &str,
    ) -> AppResult<Vec<BlueprintInstance>> {
        let rows = sqlx::query_as::<_, InstanceRow>(
            r#"
            SELECT id, blueprint_id, page_id, data_en, data_ar, status, sort_order
            FROM blueprint_instances
            WHERE page_id = $1
            ORDER BY sort_order, id
            "#,
        )
        .bind(page_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list components for page '{page_id}': {error}"
            ))
        })?;

        rows.into_iter().map(BlueprintInstance::try_from).collect()
    }

    pub(super) async fn find_instance_impl(&self, id: &str) -> AppResult<Option<BlueprintInstance>> {
        let row = sqlx::query_as::<_, InstanceRow>(
            r#"
            SELECT id, blueprint_id, page_id, data_en, data_ar, status, sort_order
            FROM blueprint_instances
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find component '{id}': {error}")))?;

        row.map(BlueprintInstance::try_from).transpose()
    }

    pub(super) async fn save_instance_impl(&self, instance: &BlueprintInstance) -> AppResult<()> {
        let page_id = instance.page_id().ok_or_else(|| {
            AppError::Validation(format!("component '{}' has no page", instance.id()))
        })?;

        let result = sqlx::query(
            r#"
            INSERT INTO blueprint_instances (
                id, blueprint_id, page_id, data_en, data_ar, status, sort_order
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                blueprint_id = EXCLUDED.blueprint_id,
                page_id = EXCLUDED.page_id,
                data_en = EXCLUDED.data_en,
                data_ar = EXCLUDED.data_ar,
                status = EXCLUDED.status,
                sort_order = EXCLUDED.sort_order,
                updated_at = now()
            "#,
        )
        .bind(instance.id())
        .bind(instance.blueprint_id())
        .bind(page_id)
        .bind(Value::Object(instance.data(atelier_core::Locale::En).clone()))
        .bind(Value::Object(instance.data(atelier_core::Locale::Ar).clone()))
        .bind(instance.status().as_str())
        .bind(sort_order(instance)?)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) if is_foreign_key_violation(&error) => Err(AppError::Validation(format!(
                "blueprint '{}' does not exist",
                instance.blueprint_id()
            ))),
            Err(error) => Err(AppError::Internal(format!(
                "failed to save component '{}': {error}",
                instance.id()
            ))),
        }
    }

    pub(super) async fn delete_instance_impl(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM blueprint_instances
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to delete component '{id}': {error}"))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("component '{id}' does not exist")));
        }

        Ok(())
    }

    pub(super) async fn replace_page_instances_impl(
        &self,
        page_id: &str,
        instances: &[BlueprintInstance],
    ) -> AppResult<()> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!(
                "failed to start save transaction for page '{page_id}': {error}"
            ))
        })?;

        sqlx::query(
            r#"
            DELETE FROM blueprint_instances
            WHERE page_id = $1
            "#,
        )
        .bind(page_id)
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to clear components of page '{page_id}': {error}"
            ))
        })?;

        for instance in instances {
            let result = sqlx::query(
                r#"
                INSERT INTO blueprint_instances (
                    id, blueprint_id, page_id, data_en, data_ar, status, sort_order
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(instance.id())
            .bind(instance.blueprint_id())
            .bind(page_id)
            .bind(Value::Object(instance.data(atelier_core::Locale::En).clone()))
            .bind(Value::Object(instance.data(atelier_core::Locale::Ar).clone()))
            .bind(instance.status().as_str())
            .bind(sort_order(instance)?)
            .execute(&mut *transaction)
            .await;

            match result {
                Ok(_) => {}
                Err(error) if is_unique_violation(&error) => {
                    return Err(AppError::Conflict(format!(
                        "component '{}' belongs to another page",
                        instance.id()
                    )));
                }
                Err(error) if is_foreign_key_violation(&error) => {
                    return Err(AppError::Validation(format!(
                        "blueprint '{}' does not exist",
                        instance.blueprint_id()
                    )));
                }
                Err(error) => {
                    return Err(AppError::Internal(format!(
                        "failed to store component '{}' of page '{page_id}': {error}",
                        instance.id()
                    )));
                }
            }
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!(
                "failed to commit save transaction for page '{page_id}': {error}"
            ))
        })?;

        Ok(())
    }
}

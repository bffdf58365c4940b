use atelier_core::{AppError, AppResult};
use atelier_domain::{BlueprintType, ContentBlueprint, block_field_definitions};
use tracing::info;

use super::BlueprintService;
use crate::content_ports::{BlueprintFilter, SaveBlueprintInput};

impl BlueprintService {
    /// Lists blueprints ordered by name.
    pub async fn list_blueprints(&self, filter: BlueprintFilter) -> AppResult<Vec<ContentBlueprint>> {
        let mut blueprints = self
            .repository
            .list_blueprints(filter.blueprint_type)
            .await?;
        blueprints.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(blueprints)
    }

    /// Returns one blueprint.
    pub async fn get_blueprint(&self, id: &str) -> AppResult<ContentBlueprint> {
        self.require_blueprint(id).await
    }

    /// Creates a blueprint with a unique name.
    pub async fn create_blueprint(&self, input: SaveBlueprintInput) -> AppResult<ContentBlueprint> {
        if self
            .repository
            .find_blueprint_by_name(input.name.as_str())
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "blueprint '{}' already exists",
                input.name
            )));
        }

        let blueprint = build_blueprint(uuid::Uuid::new_v4().to_string(), input)?;
        self.repository.save_blueprint(blueprint.clone()).await?;
        info!(blueprint = %blueprint.name(), "blueprint created");
        Ok(blueprint)
    }

    /// Replaces a blueprint's definition. System blueprints are read-only.
    pub async fn update_blueprint(
        &self,
        id: &str,
        input: SaveBlueprintInput,
    ) -> AppResult<ContentBlueprint> {
        let existing = self.require_blueprint(id).await?;
        if existing.is_system() {
            return Err(AppError::Conflict(format!(
                "system blueprint '{}' cannot be modified",
                existing.name()
            )));
        }

        if let Some(other) = self
            .repository
            .find_blueprint_by_name(input.name.as_str())
            .await?
            && other.id() != id
        {
            return Err(AppError::Conflict(format!(
                "blueprint '{}' already exists",
                input.name
            )));
        }

        let blueprint = build_blueprint(id.to_owned(), input)?;
        self.repository.save_blueprint(blueprint.clone()).await?;
        Ok(blueprint)
    }

    /// Deletes a blueprint and every instance placed from it. System
    /// blueprints cannot be deleted.
    pub async fn delete_blueprint(&self, id: &str) -> AppResult<()> {
        let existing = self.require_blueprint(id).await?;
        if existing.is_system() {
            return Err(AppError::Conflict(format!(
                "system blueprint '{}' cannot be deleted",
                existing.name()
            )));
        }

        self.repository.delete_blueprint(id).await?;
        info!(blueprint = %existing.name(), "blueprint deleted");
        Ok(())
    }

    /// Creates one system component blueprint per registered block type,
    /// skipping names that already exist. Returns the number created.
    pub async fn seed_system_blueprints(&self) -> AppResult<usize> {
        let mut created = 0;
        for definition in block_field_definitions() {
            if self
                .repository
                .find_blueprint_by_name(definition.block_type())
                .await?
                .is_some()
            {
                continue;
            }

            let blueprint = ContentBlueprint::new(
                uuid::Uuid::new_v4().to_string(),
                definition.block_type(),
                definition.display_name(),
                BlueprintType::Component,
                definition.fields().to_vec(),
            )?
            .with_description(Some(format!(
                "{} block for page composition",
                definition.display_name()
            )))
            .with_icon(Some(definition.icon().to_owned()))
            .with_category(definition.category())
            .as_system();

            self.repository.save_blueprint(blueprint).await?;
            created += 1;
        }

        if created > 0 {
            info!(created, "seeded system blueprints");
        }
        Ok(created)
    }
}

fn build_blueprint(id: String, input: SaveBlueprintInput) -> AppResult<ContentBlueprint> {
    Ok(ContentBlueprint::new(
        id,
        input.name,
        input.display_name,
        input.blueprint_type,
        input.fields,
    )?
    .with_description(input.description)
    .with_icon(input.icon)
    .with_category(input.category)
    .with_allow_multiple(input.allow_multiple))
}

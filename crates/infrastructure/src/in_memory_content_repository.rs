use std::collections::HashMap;

use async_trait::async_trait;
use atelier_application::ContentRepository;
use atelier_core::{AppError, AppResult};
use atelier_domain::{BlueprintInstance, BlueprintType, ContentBlueprint};
use tokio::sync::RwLock;

#[cfg(test)]
mod tests;

/// In-memory content repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryContentRepository {
    blueprints: RwLock<HashMap<String, ContentBlueprint>>,
    instances: RwLock<HashMap<String, BlueprintInstance>>,
}

impl InMemoryContentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            blueprints: RwLock::new(HashMap::new()),
            instances: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn list_blueprints(
        &self,
        blueprint_type: Option<BlueprintType>,
    ) -> AppResult<Vec<ContentBlueprint>> {
        let blueprints = self.blueprints.read().await;

        let mut values: Vec<ContentBlueprint> = blueprints
            .values()
            .filter(|blueprint| {
                blueprint_type.is_none_or(|expected| blueprint.blueprint_type() == expected)
            })
            .cloned()
            .collect();
        values.sort_by(|left, right| left.name().cmp(right.name()));

        Ok(values)
    }

    async fn find_blueprint(&self, id: &str) -> AppResult<Option<ContentBlueprint>> {
        Ok(self.blueprints.read().await.get(id).cloned())
    }

    async fn find_blueprint_by_name(&self, name: &str) -> AppResult<Option<ContentBlueprint>> {
        Ok(self
            .blueprints
            .read()
            .await
            .values()
            .find(|blueprint| blueprint.name() == name)
            .cloned())
    }

    async fn save_blueprint(&self, blueprint: ContentBlueprint) -> AppResult<()> {
        let mut blueprints = self.blueprints.write().await;

        if blueprints
            .values()
            .any(|stored| stored.name() == blueprint.name() && stored.id() != blueprint.id())
        {
            return Err(AppError::Conflict(format!(
                "blueprint '{}' already exists",
                blueprint.name()
            )));
        }

        blueprints.insert(blueprint.id().to_owned(), blueprint);
        Ok(())
    }

    async fn delete_blueprint(&self, id: &str) -> AppResult<()> {
        let mut blueprints = self.blueprints.write().await;
        if blueprints.remove(id).is_none() {
            return Err(AppError::NotFound(format!("blueprint '{id}' does not exist")));
        }

        self.instances
            .write()
            .await
            .retain(|_, instance| instance.blueprint_id() != id);
        Ok(())
    }

    async fn list_page_instances(&self, page_id: &str) -> AppResult<Vec<BlueprintInstance>> {
        let instances = self.instances.read().await;

        let mut values: Vec<BlueprintInstance> = instances
            .values()
            .filter(|instance| instance.page_id() == Some(page_id))
            .cloned()
            .collect();
        values.sort_by(|left, right| {
            left.order()
                .cmp(&right.order())
                .then_with(|| left.id().cmp(right.id()))
        });

        Ok(values)
    }

    async fn find_instance(&self, id: &str) -> AppResult<Option<BlueprintInstance>> {
        Ok(self.instances.read().await.get(id).cloned())
    }

    async fn save_instance(&self, instance: BlueprintInstance) -> AppResult<()> {
        if !self
            .blueprints
            .read()
            .await
            .contains_key(instance.blueprint_id())
        {
            return Err(AppError::Validation(format!(
                "blueprint '{}' does not exist",
                instance.blueprint_id()
            )));
        }

        let mut stored = instance;
        stored.clear_blueprint();
        self.instances
            .write()
            .await
            .insert(stored.id().to_owned(), stored);
        Ok(())
    }

    async fn delete_instance(&self, id: &str) -> AppResult<()> {
        match self.instances.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("component '{id}' does not exist"))),
        }
    }

    async fn replace_page_instances(
        &self,
        page_id: &str,
        instances: Vec<BlueprintInstance>,
    ) -> AppResult<()> {
        let mut stored = self.instances.write().await;

        if let Some(foreign) = instances.iter().find(|instance| {
            stored
                .get(instance.id())
                .is_some_and(|existing| existing.page_id() != Some(page_id))
        }) {
            return Err(AppError::Conflict(format!(
                "component '{}' belongs to another page",
                foreign.id()
            )));
        }

        stored.retain(|_, instance| instance.page_id() != Some(page_id));
        for mut instance in instances {
            instance.set_page_id(page_id);
            instance.clear_blueprint();
            stored.insert(instance.id().to_owned(), instance);
        }
        Ok(())
    }
}

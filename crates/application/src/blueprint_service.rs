use std::collections::HashMap;
use std::sync::Arc;

use atelier_core::{AppError, AppResult};
use atelier_domain::{BlueprintInstance, ContentBlueprint};

use crate::content_ports::ContentRepository;

mod backend;
mod blueprints;
mod instances;

#[cfg(test)]
mod tests;

/// Application service for blueprints and the instances placed from them.
#[derive(Clone)]
pub struct BlueprintService {
    repository: Arc<dyn ContentRepository>,
}

impl BlueprintService {
    /// Creates a new blueprint service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn ContentRepository>) -> Self {
        Self { repository }
    }

    async fn require_blueprint(&self, id: &str) -> AppResult<ContentBlueprint> {
        self.repository
            .find_blueprint(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("blueprint '{id}' does not exist")))
    }

    async fn require_instance(&self, id: &str) -> AppResult<BlueprintInstance> {
        self.repository
            .find_instance(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("component '{id}' does not exist")))
    }

    async fn blueprints_by_id(&self) -> AppResult<HashMap<String, ContentBlueprint>> {
        Ok(self
            .repository
            .list_blueprints(None)
            .await?
            .into_iter()
            .map(|blueprint| (blueprint.id().to_owned(), blueprint))
            .collect())
    }

    async fn with_blueprints(
        &self,
        instances: Vec<BlueprintInstance>,
    ) -> AppResult<Vec<BlueprintInstance>> {
        let blueprints = self.blueprints_by_id().await?;
        Ok(instances
            .into_iter()
            .map(|instance| match blueprints.get(instance.blueprint_id()) {
                Some(blueprint) => instance.with_blueprint(blueprint.clone()),
                None => instance,
            })
            .collect())
    }
}

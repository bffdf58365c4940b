use async_trait::async_trait;
use atelier_core::AppResult;
use atelier_domain::{BlueprintInstance, ContentBlueprint};

/// Remote collaborator the composer loads from and saves to.
#[async_trait]
pub trait ComposerBackend: Send + Sync {
    /// Loads the blueprint catalog.
    async fn load_blueprints(&self) -> AppResult<Vec<ContentBlueprint>>;

    /// Loads the instances placed on a page.
    async fn load_instances(&self, page_id: &str) -> AppResult<Vec<BlueprintInstance>>;

    /// Replaces a page's ordered instance list and returns the stored list.
    async fn save_instances(
        &self,
        page_id: &str,
        instances: Vec<BlueprintInstance>,
    ) -> AppResult<Vec<BlueprintInstance>>;
}

use async_trait::async_trait;
use atelier_core::AppResult;
use atelier_domain::{BlueprintInstance, BlueprintType, ContentBlueprint};

/// Repository port for blueprints and their placed instances.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Lists blueprints ordered by name, optionally narrowed to one type.
    async fn list_blueprints(
        &self,
        blueprint_type: Option<BlueprintType>,
    ) -> AppResult<Vec<ContentBlueprint>>;

    /// Returns one blueprint by id.
    async fn find_blueprint(&self, id: &str) -> AppResult<Option<ContentBlueprint>>;

    /// Returns one blueprint by its unique name.
    async fn find_blueprint_by_name(&self, name: &str) -> AppResult<Option<ContentBlueprint>>;

    /// Inserts or replaces a blueprint by id.
    async fn save_blueprint(&self, blueprint: ContentBlueprint) -> AppResult<()>;

    /// Deletes a blueprint together with every instance placed from it.
    async fn delete_blueprint(&self, id: &str) -> AppResult<()>;

    /// Lists the instances placed on a page ordered by `order`.
    async fn list_page_instances(&self, page_id: &str) -> AppResult<Vec<BlueprintInstance>>;

    /// Returns one instance by id.
    async fn find_instance(&self, id: &str) -> AppResult<Option<BlueprintInstance>>;

    /// Inserts or replaces one instance by id.
    async fn save_instance(&self, instance: BlueprintInstance) -> AppResult<()>;

    /// Deletes one instance.
    async fn delete_instance(&self, id: &str) -> AppResult<()>;

    /// Replaces the whole ordered list of a page in one step. Instances of
    /// the page that are not in `instances` are deleted.
    async fn replace_page_instances(
        &self,
        page_id: &str,
        instances: Vec<BlueprintInstance>,
    ) -> AppResult<()>;
}

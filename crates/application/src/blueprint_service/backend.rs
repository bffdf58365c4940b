use async_trait::async_trait;
use atelier_core::AppResult;
use atelier_domain::{BlueprintInstance, ContentBlueprint};

use super::BlueprintService;
use crate::content_ports::{BlueprintFilter, ComposerBackend};

#[async_trait]
impl ComposerBackend for BlueprintService {
    async fn load_blueprints(&self) -> AppResult<Vec<ContentBlueprint>> {
        self.list_blueprints(BlueprintFilter::default()).await
    }

    async fn load_instances(&self, page_id: &str) -> AppResult<Vec<BlueprintInstance>> {
        self.list_page_components(page_id).await
    }

    async fn save_instances(
        &self,
        page_id: &str,
        instances: Vec<BlueprintInstance>,
    ) -> AppResult<Vec<BlueprintInstance>> {
        self.save_page_components(page_id, instances).await
    }
}

use std::sync::Arc;

use atelier_application::{BlueprintService, ContentRepository};
use atelier_core::AppError;
use atelier_infrastructure::{InMemoryContentRepository, PostgresContentRepository};
use tracing::info;

use crate::api_config::{ApiConfig, ContentStoreConfig};
use crate::graphql::{GraphqlLimits, build_schema};
use crate::state::AppState;

use super::database::connect_and_migrate;

pub async fn build_content_repository(
    config: &ApiConfig,
) -> Result<Arc<dyn ContentRepository>, AppError> {
    match &config.content_store {
        ContentStoreConfig::Memory => {
            info!("using in-memory content store");
            Ok(Arc::new(InMemoryContentRepository::new()))
        }
        ContentStoreConfig::Postgres { database_url } => {
            let pool = connect_and_migrate(database_url).await?;
            info!("using postgres content store");
            Ok(Arc::new(PostgresContentRepository::new(pool)))
        }
    }
}

pub fn build_app_state(repository: Arc<dyn ContentRepository>, config: &ApiConfig) -> AppState {
    let blueprint_service = BlueprintService::new(repository);
    let graphql_schema = build_schema(
        blueprint_service.clone(),
        GraphqlLimits {
            max_depth: config.graphql_max_depth,
            max_complexity: config.graphql_max_complexity,
        },
    );

    AppState {
        blueprint_service,
        graphql_schema,
    }
}

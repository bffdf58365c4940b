use atelier_application::BlueprintService;

use crate::graphql::ContentSchema;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blueprint_service: BlueprintService,
    pub graphql_schema: ContentSchema,
}

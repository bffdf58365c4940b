mod block_definitions;
mod blueprints;
mod common;
mod components;

pub use block_definitions::{BlockCategoryResponse, BlockValidationResponse};
pub use blueprints::{BlueprintListQuery, SaveBlueprintRequest};
pub use common::{HealthResponse, LocaleQuery};
pub use components::{CreateInstanceRequest, UpdateInstanceRequest, parse_status};

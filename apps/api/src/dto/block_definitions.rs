use atelier_domain::{BlockFieldDefinition, BlockValidation};
use serde::Serialize;
use ts_rs::TS;

/// Block types of one palette category.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "api-types/block-category-response.ts"
)]
pub struct BlockCategoryResponse {
    pub category: String,
    #[ts(type = "Array<Record<string, unknown>>")]
    pub blocks: Vec<BlockFieldDefinition>,
}

/// Outcome of validating block data.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "api-types/block-validation-response.ts"
)]
pub struct BlockValidationResponse {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl From<BlockValidation> for BlockValidationResponse {
    fn from(value: BlockValidation) -> Self {
        Self {
            valid: value.valid,
            errors: value.errors,
        }
    }
}

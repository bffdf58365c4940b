//! Block schemas, field values and page composition.

#![forbid(unsafe_code)]

mod block;
mod blueprint;
mod composition;
mod field;
mod form;
mod registry;
mod validation;
mod value;

pub use block::{BlockFieldDefinition, BlockValidation, validate_fields};
pub use blueprint::{
    BlueprintInstance, BlueprintType, ContentBlueprint, InstanceStatus, TEMPORARY_ID_PREFIX,
    temporary_instance_id,
};
pub use composition::{MoveDirection, PageComposition};
pub use field::{FieldDefinition, FieldType, SelectOption, validate_field_list};
pub use form::{
    Control, DynamicForm, FieldEdit, FormObserver, FormSnapshot, FormStatus, RenderedField,
    RenderedOption, seeded_item,
};
pub use registry::{
    block_field_definitions, field_definitions_by_category, get_block_field_definition,
    validate_block_data,
};
pub use validation::{RequiredCheck, field_errors, is_valid_email, is_valid_url};
pub use value::{FieldValue, FormValues, json_is_truthy, number_to_json, parse_number};

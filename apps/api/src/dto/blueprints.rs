use std::str::FromStr;

use atelier_application::SaveBlueprintInput;
use atelier_core::AppError;
use atelier_domain::{BlueprintType, FieldDefinition};
use serde::Deserialize;
use ts_rs::TS;

/// Optional filter of the blueprint list.
#[derive(Debug, Default, Deserialize)]
pub struct BlueprintListQuery {
    #[serde(rename = "type")]
    pub blueprint_type: Option<String>,
}

impl BlueprintListQuery {
    pub fn blueprint_type(&self) -> Result<Option<BlueprintType>, AppError> {
        self.blueprint_type
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(BlueprintType::from_str)
            .transpose()
    }
}

/// Incoming payload for blueprint create/update.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "api-types/save-blueprint-request.ts"
)]
pub struct SaveBlueprintRequest {
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub blueprint_type: String,
    #[serde(default = "default_allow_multiple")]
    pub allow_multiple: bool,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    #[ts(type = "Array<Record<string, unknown>>")]
    pub fields: Vec<FieldDefinition>,
}

fn default_allow_multiple() -> bool {
    true
}

impl TryFrom<SaveBlueprintRequest> for SaveBlueprintInput {
    type Error = AppError;

    fn try_from(request: SaveBlueprintRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: request.name,
            display_name: request.display_name,
            description: request.description,
            blueprint_type: BlueprintType::from_str(request.blueprint_type.as_str())?,
            allow_multiple: request.allow_multiple,
            icon: request.icon,
            category: request.category,
            fields: request.fields,
        })
    }
}

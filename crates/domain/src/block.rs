use atelier_core::Locale;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::field::FieldDefinition;
use crate::validation::{RequiredCheck, field_errors};
use crate::value::FieldValue;

/// Editable schema of one block type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockFieldDefinition {
    #[serde(rename = "type")]
    block_type: String,
    display_name: String,
    category: String,
    icon: String,
    fields: Vec<FieldDefinition>,
}

impl BlockFieldDefinition {
    /// Creates a block definition.
    pub fn new(
        block_type: impl Into<String>,
        display_name: impl Into<String>,
        category: impl Into<String>,
        icon: impl Into<String>,
        fields: Vec<FieldDefinition>,
    ) -> Self {
        Self {
            block_type: block_type.into(),
            display_name: display_name.into(),
            category: category.into(),
            icon: icon.into(),
            fields,
        }
    }

    /// Returns the block type identifier, e.g. `hero_banner`.
    #[must_use]
    pub fn block_type(&self) -> &str {
        self.block_type.as_str()
    }

    /// Returns the palette display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the palette category.
    #[must_use]
    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    /// Returns the palette icon.
    #[must_use]
    pub fn icon(&self) -> &str {
        self.icon.as_str()
    }

    /// Returns the ordered field list.
    #[must_use]
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Validates one locale's data against the field list.
    #[must_use]
    pub fn validate_data(&self, data: &Value, locale: Locale) -> BlockValidation {
        validate_fields(&self.fields, data, locale)
    }
}

/// Outcome of validating block data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockValidation {
    /// Whether no rule failed.
    pub valid: bool,
    /// Every failure message, in field order.
    pub errors: Vec<String>,
}

impl BlockValidation {
    /// Builds a result from the collected errors.
    #[must_use]
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Result reported for a block type the registry does not know.
    #[must_use]
    pub fn unknown_block_type(block_type: &str) -> Self {
        Self::from_errors(vec![format!("Unknown block type: {block_type}")])
    }
}

/// Validates one locale's data object against a flat field list.
///
/// A bilingual required field must carry content for `locale`; anything
/// that is not a JSON object is treated as empty data.
#[must_use]
pub fn validate_fields(fields: &[FieldDefinition], data: &Value, locale: Locale) -> BlockValidation {
    let object = data.as_object();
    let errors = fields
        .iter()
        .flat_map(|field| {
            let value = object
                .and_then(|object| object.get(field.name()))
                .map(|value| FieldValue::from_json(field, value));
            field_errors(field, value.as_ref(), RequiredCheck::Locale(locale))
        })
        .collect();

    BlockValidation::from_errors(errors)
}

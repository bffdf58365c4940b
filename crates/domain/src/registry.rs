use std::sync::LazyLock;

use atelier_core::Locale;
use serde_json::Value;

use crate::block::{BlockFieldDefinition, BlockValidation};

mod catalog;

#[cfg(test)]
mod tests;

static BLOCK_FIELD_DEFINITIONS: LazyLock<Vec<BlockFieldDefinition>> =
    LazyLock::new(catalog::block_catalog);

/// Returns every registered block definition in catalog order.
#[must_use]
pub fn block_field_definitions() -> &'static [BlockFieldDefinition] {
    BLOCK_FIELD_DEFINITIONS.as_slice()
}

/// Looks up a block definition by its type identifier.
///
/// `None` means the block type is unsupported; callers render nothing
/// editable for it.
#[must_use]
pub fn get_block_field_definition(block_type: &str) -> Option<&'static BlockFieldDefinition> {
    BLOCK_FIELD_DEFINITIONS
        .iter()
        .find(|definition| definition.block_type() == block_type)
}

/// Groups block definitions by category for the palette.
///
/// Categories appear in the order they are first seen in the catalog and
/// definitions keep their catalog order inside each group.
#[must_use]
pub fn field_definitions_by_category() -> Vec<(&'static str, Vec<&'static BlockFieldDefinition>)> {
    let mut groups: Vec<(&'static str, Vec<&'static BlockFieldDefinition>)> = Vec::new();
    for definition in BLOCK_FIELD_DEFINITIONS.iter() {
        match groups
            .iter_mut()
            .find(|(category, _)| *category == definition.category())
        {
            Some((_, definitions)) => definitions.push(definition),
            None => groups.push((definition.category(), vec![definition])),
        }
    }

    groups
}

/// Validates one locale's data for a block type.
///
/// Invalidity is reported through the returned value, including an unknown
/// block type. The function has no side effects.
#[must_use]
pub fn validate_block_data(block_type: &str, data: &Value, locale: Locale) -> BlockValidation {
    match get_block_field_definition(block_type) {
        Some(definition) => definition.validate_data(data, locale),
        None => BlockValidation::unknown_block_type(block_type),
    }
}

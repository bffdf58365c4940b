use atelier_core::Locale;
use atelier_domain::{BlueprintType, FieldDefinition, InstanceStatus};
use serde_json::{Map, Value};

/// Filter for blueprint listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlueprintFilter {
    /// Restricts the list to one blueprint type.
    pub blueprint_type: Option<BlueprintType>,
}

/// Input payload for blueprint create/update operations.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveBlueprintInput {
    /// Unique name.
    pub name: String,
    /// Display name.
    pub display_name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Blueprint type.
    pub blueprint_type: BlueprintType,
    /// Whether a page may hold more than one instance.
    pub allow_multiple: bool,
    /// Palette icon.
    pub icon: Option<String>,
    /// Palette category.
    pub category: String,
    /// Field schema.
    pub fields: Vec<FieldDefinition>,
}

/// Input payload for placing one instance on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateInstanceInput {
    /// Target page.
    pub page_id: String,
    /// Placed blueprint.
    pub blueprint_id: String,
    /// Initial data, copied to both locales.
    pub data: Map<String, Value>,
    /// Initial status; draft when absent.
    pub status: Option<InstanceStatus>,
}

/// Input payload for editing one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateInstanceInput {
    /// Locale whose payload receives `data`.
    pub locale: Locale,
    /// Keys merged into the locale payload.
    pub data: Option<Map<String, Value>>,
    /// New status.
    pub status: Option<InstanceStatus>,
}

/// Offset pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    /// Maximum items returned.
    pub limit: usize,
    /// Number of items skipped.
    pub offset: usize,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
        }
    }
}

/// One window of a page's instances projected to a single locale.
#[derive(Debug, Clone, PartialEq)]
pub struct PageComponentsPage {
    /// Projected items `{id, ...data, status, blueprintId, order}`.
    pub items: Vec<Map<String, Value>>,
    /// Number of instances on the page.
    pub total: usize,
    /// Whether instances exist past this window.
    pub has_more: bool,
}

use std::str::FromStr;

use atelier_core::{AppError, AppResult, Locale, NonEmptyString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::field::{FieldDefinition, validate_field_list};

/// Id prefix of instances that were created locally and never persisted.
pub const TEMPORARY_ID_PREFIX: &str = "temp_";

/// Whether a blueprint models a whole document or a placeable block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BlueprintType {
    /// Standalone document such as a form definition.
    Document,
    /// Block placed on pages through the composer.
    Component,
}

impl BlueprintType {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "DOCUMENT",
            Self::Component => "COMPONENT",
        }
    }
}

impl FromStr for BlueprintType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DOCUMENT" => Ok(Self::Document),
            "COMPONENT" => Ok(Self::Component),
            _ => Err(AppError::Validation(format!(
                "unknown blueprint type '{value}'"
            ))),
        }
    }
}

/// Publication state of a placed instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceStatus {
    /// Not visible on the public site.
    #[default]
    Draft,
    /// Visible on the public site.
    Published,
}

impl InstanceStatus {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl FromStr for InstanceStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            _ => Err(AppError::Validation(format!(
                "unknown instance status '{value}'"
            ))),
        }
    }
}

/// Reusable content block type with a declared field schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlueprint {
    id: String,
    name: String,
    display_name: String,
    #[serde(default)]
    description: Option<String>,
    blueprint_type: BlueprintType,
    #[serde(default)]
    allow_multiple: bool,
    #[serde(default)]
    is_system: bool,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    category: String,
    #[serde(default)]
    fields: Vec<FieldDefinition>,
}

impl ContentBlueprint {
    /// Creates a validated blueprint.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        display_name: impl Into<String>,
        blueprint_type: BlueprintType,
        fields: Vec<FieldDefinition>,
    ) -> AppResult<Self> {
        let name = NonEmptyString::new(name)?;
        let display_name = NonEmptyString::new(display_name)?;
        validate_field_list(&fields)?;

        Ok(Self {
            id: id.into(),
            name: name.into(),
            display_name: display_name.into(),
            description: None,
            blueprint_type,
            allow_multiple: true,
            is_system: false,
            icon: None,
            category: String::new(),
            fields,
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Sets the palette icon.
    #[must_use]
    pub fn with_icon(mut self, icon: Option<String>) -> Self {
        self.icon = icon;
        self
    }

    /// Sets the palette category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets whether a page may hold more than one instance.
    #[must_use]
    pub fn with_allow_multiple(mut self, allow_multiple: bool) -> Self {
        self.allow_multiple = allow_multiple;
        self
    }

    /// Marks the blueprint as shipped with the system.
    #[must_use]
    pub fn as_system(mut self) -> Self {
        self.is_system = true;
        self
    }

    /// Returns the blueprint id.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the unique name; system blueprints use the block type.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the blueprint type.
    #[must_use]
    pub fn blueprint_type(&self) -> BlueprintType {
        self.blueprint_type
    }

    /// Returns whether a page may hold more than one instance.
    #[must_use]
    pub fn allow_multiple(&self) -> bool {
        self.allow_multiple
    }

    /// Returns whether the blueprint is shipped with the system.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.is_system
    }

    /// Returns the palette icon.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Returns the palette category.
    #[must_use]
    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    /// Returns the field schema.
    #[must_use]
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }
}

/// One placed occurrence of a blueprint on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintInstance {
    id: String,
    blueprint_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    blueprint: Option<ContentBlueprint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page_id: Option<String>,
    #[serde(default)]
    data_en: Map<String, Value>,
    #[serde(default)]
    data_ar: Map<String, Value>,
    #[serde(default)]
    status: InstanceStatus,
    #[serde(default)]
    order: usize,
}

impl BlueprintInstance {
    /// Creates a draft instance with empty data for both locales.
    pub fn new(id: impl Into<String>, blueprint_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            blueprint_id: blueprint_id.into(),
            blueprint: None,
            page_id: None,
            data_en: Map::new(),
            data_ar: Map::new(),
            status: InstanceStatus::Draft,
            order: 0,
        }
    }

    /// Creates a fresh instance with a temporary id.
    #[must_use]
    pub fn with_temporary_id(blueprint_id: impl Into<String>) -> Self {
        Self::new(temporary_instance_id(), blueprint_id)
    }

    /// Attaches the resolved blueprint.
    #[must_use]
    pub fn with_blueprint(mut self, blueprint: ContentBlueprint) -> Self {
        self.blueprint = Some(blueprint);
        self
    }

    /// Sets the owning page.
    #[must_use]
    pub fn with_page_id(mut self, page_id: impl Into<String>) -> Self {
        self.page_id = Some(page_id.into());
        self
    }

    /// Sets both locale payloads.
    #[must_use]
    pub fn with_data(mut self, data_en: Map<String, Value>, data_ar: Map<String, Value>) -> Self {
        self.data_en = data_en;
        self.data_ar = data_ar;
        self
    }

    /// Sets the status.
    #[must_use]
    pub fn with_status(mut self, status: InstanceStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns the instance id.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns whether the id was generated locally and never persisted.
    #[must_use]
    pub fn has_temporary_id(&self) -> bool {
        self.id.starts_with(TEMPORARY_ID_PREFIX)
    }

    /// Returns the blueprint id.
    #[must_use]
    pub fn blueprint_id(&self) -> &str {
        self.blueprint_id.as_str()
    }

    /// Returns the resolved blueprint, when loaded.
    #[must_use]
    pub fn blueprint(&self) -> Option<&ContentBlueprint> {
        self.blueprint.as_ref()
    }

    /// Returns the owning page.
    #[must_use]
    pub fn page_id(&self) -> Option<&str> {
        self.page_id.as_deref()
    }

    /// Returns one locale's payload.
    #[must_use]
    pub fn data(&self, locale: Locale) -> &Map<String, Value> {
        match locale {
            Locale::En => &self.data_en,
            Locale::Ar => &self.data_ar,
        }
    }

    /// Replaces one locale's payload and leaves the other untouched.
    pub fn set_data(&mut self, locale: Locale, data: Map<String, Value>) {
        match locale {
            Locale::En => self.data_en = data,
            Locale::Ar => self.data_ar = data,
        }
    }

    /// Shallow-merges keys into one locale's payload.
    pub fn merge_data(&mut self, locale: Locale, data: Map<String, Value>) {
        let target = match locale {
            Locale::En => &mut self.data_en,
            Locale::Ar => &mut self.data_ar,
        };
        target.extend(data);
    }

    /// Returns the status.
    #[must_use]
    pub fn status(&self) -> InstanceStatus {
        self.status
    }

    /// Sets the status.
    pub fn set_status(&mut self, status: InstanceStatus) {
        self.status = status;
    }

    /// Returns the render position.
    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Sets the render position.
    pub fn set_order(&mut self, order: usize) {
        self.order = order;
    }

    /// Replaces the id, e.g. with a server id on persistence.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Sets the owning page.
    pub fn set_page_id(&mut self, page_id: impl Into<String>) {
        self.page_id = Some(page_id.into());
    }

    /// Drops the resolved blueprint before persisting.
    pub fn clear_blueprint(&mut self) {
        self.blueprint = None;
    }

    /// Copies the instance under a new id with identical payloads.
    #[must_use]
    pub fn duplicate_as(&self, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..self.clone()
        }
    }

    /// Projects the instance to one locale as
    /// `{id, ...data, status, blueprintId, order}`.
    #[must_use]
    pub fn localized_view(&self, locale: Locale) -> Map<String, Value> {
        let mut view = Map::new();
        view.insert("id".to_owned(), Value::String(self.id.clone()));
        view.extend(self.data(locale).clone());
        view.insert(
            "status".to_owned(),
            Value::String(self.status.as_str().to_owned()),
        );
        view.insert(
            "blueprintId".to_owned(),
            Value::String(self.blueprint_id.clone()),
        );
        view.insert("order".to_owned(), Value::from(self.order));
        view
    }
}

/// Returns a fresh temporary instance id.
#[must_use]
pub fn temporary_instance_id() -> String {
    format!("{TEMPORARY_ID_PREFIX}{}", uuid::Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use atelier_core::Locale;
    use serde_json::{Map, Value, json};

    use super::{BlueprintInstance, BlueprintType, ContentBlueprint, InstanceStatus};
    use crate::field::{FieldDefinition, FieldType};

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn blueprint_rejects_blank_name() {
        let result = ContentBlueprint::new("1", " ", "Hero", BlueprintType::Component, Vec::new());
        assert!(result.is_err());
    }

    #[test]
    fn blueprint_rejects_duplicate_field_names() {
        let fields = vec![
            FieldDefinition::new("title", "Title", FieldType::Text),
            FieldDefinition::new("title", "Title", FieldType::Textarea),
        ];
        let result = ContentBlueprint::new("1", "hero", "Hero", BlueprintType::Component, fields);
        assert!(result.is_err());
    }

    #[test]
    fn enums_parse_from_storage_values() {
        assert_eq!(
            BlueprintType::from_str("component").ok(),
            Some(BlueprintType::Component)
        );
        assert_eq!(
            InstanceStatus::from_str("PUBLISHED").ok(),
            Some(InstanceStatus::Published)
        );
        assert!(InstanceStatus::from_str("archived").is_err());
    }

    #[test]
    fn instance_serializes_with_camel_case_keys() {
        let instance = BlueprintInstance::new("i-1", "b-1")
            .with_data(object(json!({"title": "Hello"})), Map::new());

        let value = serde_json::to_value(&instance).unwrap_or_else(|_| unreachable!());
        assert_eq!(value["blueprintId"], json!("b-1"));
        assert_eq!(value["dataEn"], json!({"title": "Hello"}));
        assert_eq!(value["status"], json!("draft"));
    }

    #[test]
    fn merge_touches_only_one_locale() {
        let mut instance = BlueprintInstance::new("i-1", "b-1").with_data(
            object(json!({"title": "Hello", "subtitle": "World"})),
            object(json!({"title": "مرحبا"})),
        );

        instance.merge_data(Locale::En, object(json!({"title": "Hi"})));

        assert_eq!(
            Value::Object(instance.data(Locale::En).clone()),
            json!({"title": "Hi", "subtitle": "World"})
        );
        assert_eq!(
            Value::Object(instance.data(Locale::Ar).clone()),
            json!({"title": "مرحبا"})
        );
    }

    #[test]
    fn localized_view_flattens_one_locale() {
        let instance = BlueprintInstance::new("i-1", "b-1")
            .with_data(Map::new(), object(json!({"title": "مرحبا"})))
            .with_status(InstanceStatus::Published);

        assert_eq!(
            Value::Object(instance.localized_view(Locale::Ar)),
            json!({
                "id": "i-1",
                "title": "مرحبا",
                "status": "published",
                "blueprintId": "b-1",
                "order": 0
            })
        );
    }

    #[test]
    fn temporary_ids_are_unique_and_prefixed() {
        let first = BlueprintInstance::with_temporary_id("b-1");
        let second = BlueprintInstance::with_temporary_id("b-1");

        assert!(first.has_temporary_id());
        assert_ne!(first.id(), second.id());
    }
}

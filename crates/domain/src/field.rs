use std::collections::HashSet;
use std::str::FromStr;

use atelier_core::{AppError, AppResult, LocalizedText};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Supported editable field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Single-line string.
    Text,
    /// Multi-line string.
    Textarea,
    /// Rich text document serialized as a string.
    #[serde(alias = "rich_text")]
    Richtext,
    /// Image URL.
    Image,
    /// Ordered list of image URLs.
    Gallery,
    /// Toggle.
    Boolean,
    /// Floating point number.
    Number,
    /// One value out of a declared option list.
    Select,
    /// Ordered list of sub-records shaped by nested fields.
    Repeater,
    /// Color string such as `#F8F9FA`.
    Color,
    /// Absolute URL or site-relative path.
    Url,
    /// Email address.
    Email,
    /// A single nested object shaped by nested fields.
    Group,
    /// Arbitrary JSON document.
    Json,
}

impl FieldType {
    /// Every supported field type.
    pub const ALL: [Self; 14] = [
        Self::Text,
        Self::Textarea,
        Self::Richtext,
        Self::Image,
        Self::Gallery,
        Self::Boolean,
        Self::Number,
        Self::Select,
        Self::Repeater,
        Self::Color,
        Self::Url,
        Self::Email,
        Self::Group,
        Self::Json,
    ];

    /// Returns a stable storage value for the field type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Richtext => "richtext",
            Self::Image => "image",
            Self::Gallery => "gallery",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Select => "select",
            Self::Repeater => "repeater",
            Self::Color => "color",
            Self::Url => "url",
            Self::Email => "email",
            Self::Group => "group",
            Self::Json => "json",
        }
    }

    /// Returns whether values of this type are edited as free text and may
    /// therefore be bilingual.
    #[must_use]
    pub fn is_text_like(&self) -> bool {
        matches!(self, Self::Text | Self::Textarea | Self::Richtext)
    }

    /// Returns whether the field nests its own field list.
    #[must_use]
    pub fn has_nested_fields(&self) -> bool {
        matches!(self, Self::Repeater | Self::Group)
    }
}

impl FromStr for FieldType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "text" => Ok(Self::Text),
            "textarea" => Ok(Self::Textarea),
            "richtext" | "rich_text" => Ok(Self::Richtext),
            "image" => Ok(Self::Image),
            "gallery" => Ok(Self::Gallery),
            "boolean" => Ok(Self::Boolean),
            "number" => Ok(Self::Number),
            "select" => Ok(Self::Select),
            "repeater" => Ok(Self::Repeater),
            "color" => Ok(Self::Color),
            "url" => Ok(Self::Url),
            "email" => Ok(Self::Email),
            "group" => Ok(Self::Group),
            "json" => Ok(Self::Json),
            _ => Err(AppError::Validation(format!(
                "unknown field type '{value}'"
            ))),
        }
    }
}

/// One entry of a select field's option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Stored value.
    pub value: String,
    /// Display label.
    #[serde(deserialize_with = "plain_or_localized_text")]
    pub label: LocalizedText,
}

impl SelectOption {
    /// Creates an option whose label reads the same in both locales.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: LocalizedText::from(label.into()),
        }
    }
}

/// Describes one editable property of a block type or blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    name: String,
    #[serde(deserialize_with = "plain_or_localized_text")]
    label: LocalizedText,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    bilingual: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    options: Vec<SelectOption>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_plain_or_localized_text"
    )]
    help_text: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_value: Option<Value>,
    #[serde(
        default,
        alias = "subFields",
        alias = "fields",
        skip_serializing_if = "Vec::is_empty"
    )]
    repeater_fields: Vec<FieldDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max: Option<f64>,
}

impl FieldDefinition {
    /// Creates a field with only a name, label and type; every other
    /// attribute is off until set through the builder methods.
    pub fn new(name: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: None,
            name: name.into(),
            label: LocalizedText::from(label.into()),
            field_type,
            required: false,
            bilingual: false,
            placeholder: None,
            options: Vec::new(),
            help_text: None,
            default_value: None,
            repeater_fields: Vec::new(),
            min: None,
            max: None,
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the field as holding one value per locale.
    #[must_use]
    pub fn bilingual(mut self) -> Self {
        self.bilingual = true;
        self
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Sets the help text shown under the control.
    #[must_use]
    pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(LocalizedText::from(help_text.into()));
        self
    }

    /// Sets the Arabic label, keeping the English one.
    #[must_use]
    pub fn label_ar(mut self, label: impl Into<String>) -> Self {
        self.label.ar = label.into();
        self
    }

    /// Sets the value seeded when the data carries none.
    #[must_use]
    pub fn default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Sets the select options.
    #[must_use]
    pub fn options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    /// Sets the nested field list of a repeater or group.
    #[must_use]
    pub fn repeater_fields(mut self, fields: Vec<FieldDefinition>) -> Self {
        self.repeater_fields = fields;
        self
    }

    /// Sets the inclusive lower bound of a number field.
    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the inclusive upper bound of a number field.
    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Checks the definition's own invariants, recursing into nested fields.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation(
                "field name must not be empty".to_owned(),
            ));
        }

        if self.field_type == FieldType::Select && self.options.is_empty() {
            return Err(AppError::Validation(format!(
                "select field '{}' requires options",
                self.name
            )));
        }

        if self.bilingual && !self.field_type.is_text_like() {
            return Err(AppError::Validation(format!(
                "field '{}' of type '{}' cannot be bilingual",
                self.name,
                self.field_type.as_str()
            )));
        }

        if let (Some(min), Some(max)) = (self.min, self.max)
            && min > max
        {
            return Err(AppError::Validation(format!(
                "field '{}' has min {min} greater than max {max}",
                self.name
            )));
        }

        if self.field_type.has_nested_fields() {
            validate_field_list(&self.repeater_fields)?;
        } else if !self.repeater_fields.is_empty() {
            return Err(AppError::Validation(format!(
                "field '{}' of type '{}' cannot declare nested fields",
                self.name,
                self.field_type.as_str()
            )));
        }

        Ok(())
    }

    /// Returns the stable identifier, falling back to the name.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or(self.name.as_str())
    }

    /// Returns the data key.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the bilingual label.
    #[must_use]
    pub fn label(&self) -> &LocalizedText {
        &self.label
    }

    /// Returns the field type.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns whether a value is mandatory.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns whether the stored value is a per-locale pair.
    #[must_use]
    pub fn is_bilingual(&self) -> bool {
        self.bilingual
    }

    /// Returns the placeholder text.
    #[must_use]
    pub fn placeholder_text(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Returns the select options.
    #[must_use]
    pub fn select_options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Returns the help text.
    #[must_use]
    pub fn help(&self) -> Option<&LocalizedText> {
        self.help_text.as_ref()
    }

    /// Returns the declared default value.
    #[must_use]
    pub fn declared_default(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// Returns the nested fields of a repeater or group.
    #[must_use]
    pub fn nested_fields(&self) -> &[FieldDefinition] {
        &self.repeater_fields
    }

    /// Returns the inclusive lower bound.
    #[must_use]
    pub fn min_value(&self) -> Option<f64> {
        self.min
    }

    /// Returns the inclusive upper bound.
    #[must_use]
    pub fn max_value(&self) -> Option<f64> {
        self.max
    }
}

/// Validates every field of a list and rejects duplicate names.
pub fn validate_field_list(fields: &[FieldDefinition]) -> AppResult<()> {
    let mut seen = HashSet::new();
    for field in fields {
        field.validate()?;
        if !seen.insert(field.name()) {
            return Err(AppError::Validation(format!(
                "duplicate field name '{}'",
                field.name()
            )));
        }
    }

    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextRepr {
    Plain(String),
    Localized { en: String, ar: String },
}

impl From<TextRepr> for LocalizedText {
    fn from(value: TextRepr) -> Self {
        match value {
            TextRepr::Plain(text) => LocalizedText::from(text),
            TextRepr::Localized { en, ar } => LocalizedText::new(en, ar),
        }
    }
}

fn plain_or_localized_text<'de, D>(deserializer: D) -> Result<LocalizedText, D::Error>
where
    D: Deserializer<'de>,
{
    TextRepr::deserialize(deserializer).map(LocalizedText::from)
}

fn optional_plain_or_localized_text<'de, D>(
    deserializer: D,
) -> Result<Option<LocalizedText>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TextRepr>::deserialize(deserializer)?.map(LocalizedText::from))
}

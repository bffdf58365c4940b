use atelier_core::Locale;
use serde::Serialize;
use serde_json::{Map, Value};

use super::DynamicForm;
use crate::field::{FieldDefinition, FieldType};
use crate::value::{FieldValue, number_to_json};

const DEFAULT_COLOR: &str = "#000000";

/// One field as presented to the operator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedField {
    /// Field name.
    pub name: String,
    /// Label in the display locale.
    pub label: String,
    /// Whether the field shows a required marker.
    pub required: bool,
    /// Help text in the display locale.
    pub help_text: Option<String>,
    /// Current validation message.
    pub error: Option<String>,
    /// Whether the control spans the full form width.
    pub full_width: bool,
    /// Input control holding the current value.
    pub control: Control,
}

/// Select option in the display locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedOption {
    /// Stored value.
    pub value: String,
    /// Display label.
    pub label: String,
}

/// Input control per field type. Every control displays exactly the value
/// the form holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Control {
    /// Single value text input.
    #[serde(rename_all = "camelCase")]
    TextInput {
        /// Current text.
        value: String,
        /// Placeholder text.
        placeholder: Option<String>,
        /// Multi-line editor.
        multiline: bool,
        /// Rich text editor.
        rich: bool,
    },
    /// Side-by-side English and Arabic inputs sharing one field name.
    #[serde(rename_all = "camelCase")]
    LocalizedTextInput {
        /// English text.
        en: String,
        /// Arabic text, edited right-to-left.
        ar: String,
        /// Placeholder text.
        placeholder: Option<String>,
        /// Multi-line editor.
        multiline: bool,
        /// Rich text editor.
        rich: bool,
    },
    /// Numeric input; NaN displays as empty.
    NumberInput {
        /// Displayed text.
        value: String,
        /// Inclusive lower bound.
        min: Option<f64>,
        /// Inclusive upper bound.
        max: Option<f64>,
    },
    /// Switch.
    Toggle {
        /// Current state.
        checked: bool,
    },
    /// Option list with an empty "Select an option" entry.
    SelectInput {
        /// Selected value, empty when unselected.
        value: String,
        /// Declared options.
        options: Vec<RenderedOption>,
    },
    /// Single image with upload and clear.
    ImagePicker {
        /// Current image URL.
        url: Option<String>,
    },
    /// Ordered image grid with add and remove.
    GalleryPicker {
        /// Image URLs.
        urls: Vec<String>,
    },
    /// Ordered sub-records with add, remove and move.
    Repeater {
        /// Each item's nested controls.
        items: Vec<Vec<RenderedField>>,
    },
    /// Nested controls of one object.
    Group {
        /// Nested controls.
        fields: Vec<RenderedField>,
    },
    /// Swatch plus hex input.
    ColorPicker {
        /// Current color.
        value: String,
    },
    /// URL input.
    UrlInput {
        /// Current URL.
        value: String,
        /// Placeholder text.
        placeholder: Option<String>,
    },
    /// Email input.
    EmailInput {
        /// Current address.
        value: String,
        /// Placeholder text.
        placeholder: Option<String>,
    },
    /// Monospace JSON editor.
    JsonEditor {
        /// Raw text when unparsed, pretty JSON otherwise.
        text: String,
    },
}

impl DynamicForm {
    /// Renders one control per field, labelled in `locale`.
    #[must_use]
    pub fn render(&self, locale: Locale) -> Vec<RenderedField> {
        self.fields
            .iter()
            .map(|field| {
                let seeded;
                let value = match self.values.get(field.name()) {
                    Some(value) => value,
                    None => {
                        seeded = FieldValue::seed(field);
                        &seeded
                    }
                };
                let mut rendered = render_field(field, value, locale);
                rendered.error = self.errors.get(field.name()).cloned();
                rendered
            })
            .collect()
    }
}

fn render_field(field: &FieldDefinition, value: &FieldValue, locale: Locale) -> RenderedField {
    RenderedField {
        name: field.name().to_owned(),
        label: localized_label(field.label().get(locale), &field.label().en),
        required: field.is_required(),
        help_text: field
            .help()
            .map(|help| localized_label(help.get(locale), &help.en)),
        error: None,
        full_width: matches!(
            field.field_type(),
            FieldType::Textarea
                | FieldType::Richtext
                | FieldType::Gallery
                | FieldType::Repeater
                | FieldType::Group
                | FieldType::Json
        ),
        control: control_for(field, value, locale),
    }
}

fn control_for(field: &FieldDefinition, value: &FieldValue, locale: Locale) -> Control {
    let placeholder = field.placeholder_text().map(str::to_owned);
    match field.field_type() {
        FieldType::Text | FieldType::Textarea | FieldType::Richtext => {
            let multiline = field.field_type() != FieldType::Text;
            let rich = field.field_type() == FieldType::Richtext;
            if field.is_bilingual() {
                let (en, ar) = localized_parts(value);
                Control::LocalizedTextInput {
                    en,
                    ar,
                    placeholder,
                    multiline,
                    rich,
                }
            } else {
                Control::TextInput {
                    value: text_of(value),
                    placeholder,
                    multiline,
                    rich,
                }
            }
        }
        FieldType::Number => Control::NumberInput {
            value: match value {
                FieldValue::Number(number) if number.is_nan() => String::new(),
                FieldValue::Number(number) => number_to_json(*number).to_string(),
                FieldValue::Json(Value::Number(number)) => number.to_string(),
                other => text_of(other),
            },
            min: field.min_value(),
            max: field.max_value(),
        },
        FieldType::Boolean => Control::Toggle {
            checked: matches!(
                value,
                FieldValue::Boolean(true) | FieldValue::Json(Value::Bool(true))
            ),
        },
        FieldType::Select => Control::SelectInput {
            value: text_of(value),
            options: field
                .select_options()
                .iter()
                .map(|option| RenderedOption {
                    value: option.value.clone(),
                    label: localized_label(option.label.get(locale), &option.label.en),
                })
                .collect(),
        },
        FieldType::Image => Control::ImagePicker {
            url: Some(text_of(value)).filter(|url| !url.is_empty()),
        },
        FieldType::Gallery => Control::GalleryPicker {
            urls: match value {
                FieldValue::List(urls) => urls.clone(),
                _ => Vec::new(),
            },
        },
        FieldType::Repeater => Control::Repeater {
            items: match value {
                FieldValue::Items(items) => items
                    .iter()
                    .map(|item| render_nested(field.nested_fields(), item, locale))
                    .collect(),
                _ => Vec::new(),
            },
        },
        FieldType::Group => Control::Group {
            fields: match value {
                FieldValue::Object(object) => render_nested(field.nested_fields(), object, locale),
                _ => render_nested(field.nested_fields(), &Map::new(), locale),
            },
        },
        FieldType::Color => Control::ColorPicker {
            value: Some(text_of(value))
                .filter(|color| !color.is_empty())
                .unwrap_or_else(|| DEFAULT_COLOR.to_owned()),
        },
        FieldType::Url => Control::UrlInput {
            value: text_of(value),
            placeholder,
        },
        FieldType::Email => Control::EmailInput {
            value: text_of(value),
            placeholder,
        },
        FieldType::Json => Control::JsonEditor {
            text: match value {
                FieldValue::Text(text) => text.clone(),
                other => serde_json::to_string_pretty(&other.to_json()).unwrap_or_default(),
            },
        },
    }
}

fn render_nested(
    fields: &[FieldDefinition],
    object: &Map<String, Value>,
    locale: Locale,
) -> Vec<RenderedField> {
    fields
        .iter()
        .map(|field| {
            let value = object.get(field.name()).map_or_else(
                || FieldValue::seed(field),
                |value| FieldValue::from_json(field, value),
            );
            render_field(field, &value, locale)
        })
        .collect()
}

fn localized_label(text: &str, fallback: &str) -> String {
    if text.is_empty() {
        fallback.to_owned()
    } else {
        text.to_owned()
    }
}

fn localized_parts(value: &FieldValue) -> (String, String) {
    match value {
        FieldValue::Localized(pair) => (pair.en.clone(), pair.ar.clone()),
        FieldValue::Json(Value::Object(object)) => {
            let part = |locale: Locale| {
                object
                    .get(locale.as_str())
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned()
            };
            (part(Locale::En), part(Locale::Ar))
        }
        other => (text_of(other), String::new()),
    }
}

fn text_of(value: &FieldValue) -> String {
    value.as_text().unwrap_or_default().to_owned()
}

use std::collections::BTreeMap;

use atelier_core::{AppError, AppResult, Locale, LocalizedText};
use serde_json::{Map, Value};

use crate::composition::MoveDirection;
use crate::field::{FieldDefinition, FieldType};
use crate::validation::{RequiredCheck, field_errors};
use crate::value::{FieldValue, FormValues, parse_number, values_to_json};

mod render;


pub use render::{Control, RenderedField, RenderedOption};

/// Lifecycle of a form's value map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    /// Seeded from initial data and defaults, not edited yet.
    Initialized,
    /// At least one edit was applied since seeding.
    Dirty,
}

/// Receives the form's state after every change.
pub trait FormObserver {
    /// Called with the full data object, valid or not.
    fn on_change(&mut self, data: &Map<String, Value>);

    /// Called with the outcome of the validation pass.
    fn on_validate(&mut self, is_valid: bool, errors: &BTreeMap<String, String>);
}

/// Last state reported by a form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSnapshot {
    /// Full data object.
    pub data: Map<String, Value>,
    /// Whether no field failed validation.
    pub is_valid: bool,
    /// First error message per field name.
    pub errors: BTreeMap<String, String>,
    /// Number of change reports received.
    pub changes: usize,
}

impl FormObserver for FormSnapshot {
    fn on_change(&mut self, data: &Map<String, Value>) {
        self.data = data.clone();
        self.changes += 1;
    }

    fn on_validate(&mut self, is_valid: bool, errors: &BTreeMap<String, String>) {
        self.is_valid = is_valid;
        self.errors = errors.clone();
    }
}

/// One operator edit of a form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    /// Replaces a scalar string: text, textarea, rich text, image, color,
    /// url, email or select. Clearing an image sets it to `""`.
    SetText {
        /// Field name.
        field: String,
        /// New text.
        text: String,
    },
    /// Replaces one locale of a bilingual field, keeping the other.
    SetLocalizedText {
        /// Field name.
        field: String,
        /// Edited locale.
        locale: Locale,
        /// New text.
        text: String,
    },
    /// Replaces a number from typed input; malformed input is kept as NaN
    /// and empty input unsets the value.
    SetNumber {
        /// Field name.
        field: String,
        /// Raw typed input.
        raw: String,
    },
    /// Flips a toggle.
    SetBoolean {
        /// Field name.
        field: String,
        /// New state.
        value: bool,
    },
    /// Appends an image URL to a gallery.
    AddGalleryImage {
        /// Field name.
        field: String,
        /// Image URL.
        url: String,
    },
    /// Removes one gallery image, keeping the order of the rest.
    RemoveGalleryImage {
        /// Field name.
        field: String,
        /// Image position.
        index: usize,
    },
    /// Appends a repeater item seeded from the nested field defaults.
    AddRepeaterItem {
        /// Field name.
        field: String,
    },
    /// Removes one repeater item, keeping the order of the rest.
    RemoveRepeaterItem {
        /// Field name.
        field: String,
        /// Item position.
        index: usize,
    },
    /// Swaps a repeater item with its neighbour.
    MoveRepeaterItem {
        /// Field name.
        field: String,
        /// Item position.
        index: usize,
        /// Move direction.
        direction: MoveDirection,
    },
    /// Sets one sub-field of a repeater item.
    SetRepeaterItemValue {
        /// Field name.
        field: String,
        /// Item position.
        index: usize,
        /// Sub-field name.
        key: String,
        /// New sub-field value.
        value: Value,
    },
    /// Sets one sub-field of a group.
    SetGroupValue {
        /// Field name.
        field: String,
        /// Sub-field name.
        key: String,
        /// New sub-field value.
        value: Value,
    },
    /// Replaces a json field from typed text. Text that does not parse is
    /// stored verbatim.
    SetJsonText {
        /// Field name.
        field: String,
        /// Raw typed text.
        text: String,
    },
}

impl FieldEdit {
    /// Returns the edited field name.
    #[must_use]
    pub fn field_name(&self) -> &str {
        match self {
            Self::SetText { field, .. }
            | Self::SetLocalizedText { field, .. }
            | Self::SetNumber { field, .. }
            | Self::SetBoolean { field, .. }
            | Self::AddGalleryImage { field, .. }
            | Self::RemoveGalleryImage { field, .. }
            | Self::AddRepeaterItem { field }
            | Self::RemoveRepeaterItem { field, .. }
            | Self::MoveRepeaterItem { field, .. }
            | Self::SetRepeaterItemValue { field, .. }
            | Self::SetGroupValue { field, .. }
            | Self::SetJsonText { field, .. } => field.as_str(),
        }
    }
}

/// Schema-driven editing state for one instance's data object.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicForm {
    fields: Vec<FieldDefinition>,
    values: FormValues,
    errors: BTreeMap<String, String>,
    status: FormStatus,
}

impl DynamicForm {
    /// Seeds a form from a field list and initial data, reporting the
    /// seeded state to the observer.
    ///
    /// Fields missing from the data receive their seed value; keys of the
    /// data that no field declares are carried through unchanged.
    pub fn new(
        fields: Vec<FieldDefinition>,
        initial_data: &Map<String, Value>,
        observer: &mut impl FormObserver,
    ) -> Self {
        let mut form = Self {
            fields: Vec::new(),
            values: FormValues::new(),
            errors: BTreeMap::new(),
            status: FormStatus::Initialized,
        };
        form.reset(fields, initial_data, observer);
        form
    }

    /// Re-seeds the form for a new field list or data object and reports
    /// the seeded state to the observer.
    pub fn reset(
        &mut self,
        fields: Vec<FieldDefinition>,
        initial_data: &Map<String, Value>,
        observer: &mut impl FormObserver,
    ) {
        let mut values: FormValues = initial_data
            .iter()
            .map(|(name, value)| (name.clone(), FieldValue::Json(value.clone())))
            .collect();

        for field in &fields {
            let value = initial_data.get(field.name()).map_or_else(
                || FieldValue::seed(field),
                |value| FieldValue::from_json(field, value),
            );
            values.insert(field.name().to_owned(), value);
        }

        self.fields = fields;
        self.values = values;
        self.status = FormStatus::Initialized;
        self.revalidate();
        self.notify(observer);
    }

    /// Returns the field list.
    #[must_use]
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Returns the current value of a field.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Returns the current value map.
    #[must_use]
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Returns the first error per field name.
    #[must_use]
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Returns whether no field failed validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// Returns the full data object.
    #[must_use]
    pub fn data(&self) -> Map<String, Value> {
        values_to_json(&self.values)
    }

    /// Returns the state an observer would currently hold.
    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        let mut snapshot = FormSnapshot::default();
        self.notify(&mut snapshot);
        snapshot
    }

    /// Reports validity and data to an observer.
    pub fn notify(&self, observer: &mut impl FormObserver) {
        observer.on_validate(self.is_valid(), &self.errors);
        observer.on_change(&self.data());
    }

    /// Applies one edit, revalidates and reports to the observer.
    ///
    /// Fails without touching state when the edit names an unknown field,
    /// does not fit the field type or addresses a missing list position.
    pub fn apply(&mut self, edit: FieldEdit, observer: &mut impl FormObserver) -> AppResult<()> {
        let field = self
            .fields
            .iter()
            .find(|field| field.name() == edit.field_name())
            .ok_or_else(|| {
                AppError::Validation(format!("form has no field '{}'", edit.field_name()))
            })?;
        let current = self
            .values
            .get(field.name())
            .cloned()
            .unwrap_or_else(|| FieldValue::seed(field));
        let next = edited_value(field, current, edit)?;

        let name = field.name().to_owned();
        self.values.insert(name, next);
        self.status = FormStatus::Dirty;
        self.revalidate();
        self.notify(observer);
        Ok(())
    }

    fn revalidate(&mut self) {
        self.errors = self
            .fields
            .iter()
            .filter_map(|field| {
                field_errors(
                    field,
                    self.values.get(field.name()),
                    RequiredCheck::AnyLocale,
                )
                .into_iter()
                .next()
                .map(|message| (field.name().to_owned(), message))
            })
            .collect();
    }
}

/// Builds a repeater item with every nested field at its seed value.
#[must_use]
pub fn seeded_item(field: &FieldDefinition) -> Map<String, Value> {
    field
        .nested_fields()
        .iter()
        .map(|nested| (nested.name().to_owned(), FieldValue::seed(nested).to_json()))
        .collect()
}

fn edited_value(
    field: &FieldDefinition,
    current: FieldValue,
    edit: FieldEdit,
) -> AppResult<FieldValue> {
    match edit {
        FieldEdit::SetText { text, .. } => {
            ensure(
                field,
                !field.is_bilingual()
                    && matches!(
                        field.field_type(),
                        FieldType::Text
                            | FieldType::Textarea
                            | FieldType::Richtext
                            | FieldType::Image
                            | FieldType::Select
                            | FieldType::Color
                            | FieldType::Url
                            | FieldType::Email
                    ),
            )?;
            Ok(FieldValue::Text(text))
        }
        FieldEdit::SetLocalizedText { locale, text, .. } => {
            ensure(field, field.is_bilingual())?;
            Ok(match current {
                FieldValue::Localized(mut pair) => {
                    pair.set(locale, text);
                    FieldValue::Localized(pair)
                }
                FieldValue::Json(Value::Object(mut object)) => {
                    object.insert(locale.as_str().to_owned(), Value::String(text));
                    FieldValue::from_json(field, &Value::Object(object))
                }
                _ => {
                    let mut pair = LocalizedText::default();
                    pair.set(locale, text);
                    FieldValue::Localized(pair)
                }
            })
        }
        FieldEdit::SetNumber { raw, .. } => {
            ensure(field, field.field_type() == FieldType::Number)?;
            if raw.trim().is_empty() {
                return Ok(FieldValue::Text(String::new()));
            }
            Ok(FieldValue::Number(parse_number(&raw)))
        }
        FieldEdit::SetBoolean { value, .. } => {
            ensure(field, field.field_type() == FieldType::Boolean)?;
            Ok(FieldValue::Boolean(value))
        }
        FieldEdit::AddGalleryImage { url, .. } => {
            ensure(field, field.field_type() == FieldType::Gallery)?;
            let mut urls = into_list(current);
            urls.push(url);
            Ok(FieldValue::List(urls))
        }
        FieldEdit::RemoveGalleryImage { index, .. } => {
            ensure(field, field.field_type() == FieldType::Gallery)?;
            let mut urls = into_list(current);
            check_index(field, index, urls.len())?;
            urls.remove(index);
            Ok(FieldValue::List(urls))
        }
        FieldEdit::AddRepeaterItem { .. } => {
            ensure(field, field.field_type() == FieldType::Repeater)?;
            let mut items = into_items(current);
            items.push(seeded_item(field));
            Ok(FieldValue::Items(items))
        }
        FieldEdit::RemoveRepeaterItem { index, .. } => {
            ensure(field, field.field_type() == FieldType::Repeater)?;
            let mut items = into_items(current);
            check_index(field, index, items.len())?;
            items.remove(index);
            Ok(FieldValue::Items(items))
        }
        FieldEdit::MoveRepeaterItem {
            index, direction, ..
        } => {
            ensure(field, field.field_type() == FieldType::Repeater)?;
            let mut items = into_items(current);
            let target = match direction {
                MoveDirection::Up => index.checked_sub(1),
                MoveDirection::Down => index.checked_add(1),
            };
            if let Some(target) = target
                && index < items.len()
                && target < items.len()
            {
                items.swap(index, target);
            }
            Ok(FieldValue::Items(items))
        }
        FieldEdit::SetRepeaterItemValue {
            index, key, value, ..
        } => {
            ensure(field, field.field_type() == FieldType::Repeater)?;
            ensure_nested_key(field, &key)?;
            let mut items = into_items(current);
            check_index(field, index, items.len())?;
            if let Some(item) = items.get_mut(index) {
                item.insert(key, value);
            }
            Ok(FieldValue::Items(items))
        }
        FieldEdit::SetGroupValue { key, value, .. } => {
            ensure(field, field.field_type() == FieldType::Group)?;
            ensure_nested_key(field, &key)?;
            let mut object = match current {
                FieldValue::Object(object) => object,
                _ => Map::new(),
            };
            object.insert(key, value);
            Ok(FieldValue::Object(object))
        }
        FieldEdit::SetJsonText { text, .. } => {
            ensure(field, field.field_type() == FieldType::Json)?;
            Ok(serde_json::from_str::<Value>(&text)
                .map_or(FieldValue::Text(text), FieldValue::Json))
        }
    }
}

fn ensure(field: &FieldDefinition, accepted: bool) -> AppResult<()> {
    if accepted {
        return Ok(());
    }

    Err(AppError::Validation(format!(
        "field '{}' of type '{}'{} does not accept this edit",
        field.name(),
        field.field_type().as_str(),
        if field.is_bilingual() { " (bilingual)" } else { "" }
    )))
}

fn ensure_nested_key(field: &FieldDefinition, key: &str) -> AppResult<()> {
    if field.nested_fields().iter().any(|nested| nested.name() == key) {
        return Ok(());
    }

    Err(AppError::Validation(format!(
        "field '{}' has no sub-field '{key}'",
        field.name()
    )))
}

fn check_index(field: &FieldDefinition, index: usize, len: usize) -> AppResult<()> {
    if index < len {
        return Ok(());
    }

    Err(AppError::Validation(format!(
        "field '{}' has no item at position {index}",
        field.name()
    )))
}

fn into_list(value: FieldValue) -> Vec<String> {
    match value {
        FieldValue::List(urls) => urls,
        _ => Vec::new(),
    }
}

fn into_items(value: FieldValue) -> Vec<Map<String, Value>> {
    match value {
        FieldValue::Items(items) => items,
        _ => Vec::new(),
    }
}

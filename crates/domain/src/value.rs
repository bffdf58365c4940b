use std::collections::BTreeMap;

use atelier_core::{Locale, LocalizedText};
use serde_json::{Map, Number, Value};

use crate::field::{FieldDefinition, FieldType};

/// Current values of a form, keyed by field name.
pub type FormValues = BTreeMap<String, FieldValue>;

/// A stored field value, shaped by its field type.
///
/// Values that do not match the declared shape (legacy data, hand-edited
/// payloads) are kept verbatim as [`FieldValue::Json`] so they survive a
/// read/write cycle untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Scalar string: text, textarea, rich text, image URL, color, url,
    /// email, selected option, or raw text typed into a json field.
    Text(String),
    /// Per-locale text of a bilingual field.
    Localized(LocalizedText),
    /// Parsed number. May hold NaN after malformed input.
    Number(f64),
    /// Toggle state.
    Boolean(bool),
    /// Gallery image URLs.
    List(Vec<String>),
    /// Repeater items.
    Items(Vec<Map<String, Value>>),
    /// Group object.
    Object(Map<String, Value>),
    /// Any other JSON document.
    Json(Value),
}

impl FieldValue {
    /// Returns the value used when a field is absent from the data.
    ///
    /// Declared defaults win; otherwise repeaters and galleries start empty,
    /// booleans start off, bilingual fields start as an empty pair and
    /// everything else starts as an empty string.
    #[must_use]
    pub fn seed(field: &FieldDefinition) -> Self {
        if let Some(default_value) = field.declared_default() {
            if field.is_bilingual()
                && let Value::String(text) = default_value
            {
                return Self::Localized(LocalizedText::from(text.as_str()));
            }
            return Self::from_json(field, default_value);
        }

        match field.field_type() {
            FieldType::Repeater => Self::Items(Vec::new()),
            FieldType::Gallery => Self::List(Vec::new()),
            FieldType::Boolean => Self::Boolean(false),
            _ if field.is_bilingual() => Self::Localized(LocalizedText::default()),
            _ => Self::Text(String::new()),
        }
    }

    /// Interprets stored JSON according to the field's declared shape.
    ///
    /// `to_json` returns the original document for every value produced
    /// here; numbers that would not survive the `f64` trip stay as JSON.
    #[must_use]
    pub fn from_json(field: &FieldDefinition, value: &Value) -> Self {
        if field.is_bilingual() {
            return localized_from_json(value).unwrap_or_else(|| Self::Json(value.clone()));
        }

        match (field.field_type(), value) {
            (FieldType::Number, Value::Number(number)) => number
                .as_f64()
                .filter(|parsed| number_to_json(*parsed) == *value)
                .map_or_else(|| Self::Json(value.clone()), Self::Number),
            (FieldType::Boolean, Value::Bool(flag)) => Self::Boolean(*flag),
            (FieldType::Gallery, Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect::<Option<Vec<_>>>()
                .map_or_else(|| Self::Json(value.clone()), Self::List),
            (FieldType::Repeater, Value::Array(items)) => items
                .iter()
                .map(|item| item.as_object().cloned())
                .collect::<Option<Vec<_>>>()
                .map_or_else(|| Self::Json(value.clone()), Self::Items),
            (FieldType::Group, Value::Object(object)) => Self::Object(object.clone()),
            (
                FieldType::Text
                | FieldType::Textarea
                | FieldType::Richtext
                | FieldType::Image
                | FieldType::Select
                | FieldType::Color
                | FieldType::Url
                | FieldType::Email
                | FieldType::Json
                | FieldType::Number,
                Value::String(text),
            ) => Self::Text(text.clone()),
            _ => Self::Json(value.clone()),
        }
    }

    /// Converts back to the JSON shape stored in instance payloads.
    ///
    /// A NaN number has no JSON representation and becomes `null`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(text) => Value::String(text.clone()),
            Self::Localized(text) => {
                let mut object = Map::new();
                object.insert("en".to_owned(), Value::String(text.en.clone()));
                object.insert("ar".to_owned(), Value::String(text.ar.clone()));
                Value::Object(object)
            }
            Self::Number(number) => number_to_json(*number),
            Self::Boolean(flag) => Value::Bool(*flag),
            Self::List(items) => Value::Array(items.iter().cloned().map(Value::String).collect()),
            Self::Items(items) => Value::Array(items.iter().cloned().map(Value::Object).collect()),
            Self::Object(object) => Value::Object(object.clone()),
            Self::Json(value) => value.clone(),
        }
    }

    /// Returns whether the value counts as present when a field is
    /// required: empty strings, zero, NaN, `false` and `null` do not.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::Number(number) => *number != 0.0 && !number.is_nan(),
            Self::Boolean(flag) => *flag,
            Self::Localized(_) | Self::List(_) | Self::Items(_) | Self::Object(_) => true,
            Self::Json(value) => json_is_truthy(value),
        }
    }

    /// Returns whether the value is an empty list.
    #[must_use]
    pub fn is_empty_list(&self) -> bool {
        match self {
            Self::List(items) => items.is_empty(),
            Self::Items(items) => items.is_empty(),
            Self::Json(Value::Array(items)) => items.is_empty(),
            _ => false,
        }
    }

    /// Returns whether a bilingual value carries content for one locale.
    #[must_use]
    pub fn has_locale_content(&self, locale: Locale) -> bool {
        match self {
            Self::Localized(text) => !text.get(locale).is_empty(),
            Self::Json(Value::Object(object)) => {
                object.get(locale.as_str()).is_some_and(json_is_truthy)
            }
            _ => false,
        }
    }

    /// Returns the numeric reading of the value, or `None` when unset.
    ///
    /// Text that does not parse as a finite number reads as NaN.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(text) if text.trim().is_empty() => None,
            Self::Text(text) => Some(parse_number(text)),
            Self::Json(Value::Null) => None,
            Self::Json(Value::Number(number)) => number.as_f64(),
            Self::Boolean(_)
            | Self::Localized(_)
            | Self::List(_)
            | Self::Items(_)
            | Self::Object(_)
            | Self::Json(_) => Some(f64::NAN),
        }
    }

    /// Returns the scalar string, when the value is one.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Json(Value::String(text)) => Some(text.as_str()),
            _ => None,
        }
    }
}

/// Parses operator input the way a numeric control does; anything that is
/// not a finite number becomes NaN rather than zero.
#[must_use]
pub fn parse_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .unwrap_or(f64::NAN)
}

/// Converts an `f64` to JSON, keeping integral values as integers.
#[must_use]
pub fn number_to_json(number: f64) -> Value {
    if !number.is_finite() {
        return Value::Null;
    }

    if number.fract() == 0.0 && number.abs() < 9_007_199_254_740_992.0 {
        return Value::from(number as i64);
    }

    Number::from_f64(number).map_or(Value::Null, Value::Number)
}

/// Applies JavaScript-style truthiness to a JSON value.
#[must_use]
pub fn json_is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Converts form values to the JSON object stored for one locale.
#[must_use]
pub fn values_to_json(values: &FormValues) -> Map<String, Value> {
    values
        .iter()
        .map(|(name, value)| (name.clone(), value.to_json()))
        .collect()
}

fn localized_from_json(value: &Value) -> Option<FieldValue> {
    let object = value.as_object()?;
    if object.len() != 2 {
        return None;
    }

    let en = object.get("en")?.as_str()?;
    let ar = object.get("ar")?.as_str()?;
    Some(FieldValue::Localized(LocalizedText::new(
        en.to_owned(),
        ar.to_owned(),
    )))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{FieldValue, number_to_json, parse_number};
    use crate::field::{FieldDefinition, FieldType};

    #[test]
    fn seeds_follow_field_shape() {
        let repeater = FieldDefinition::new("features", "Features", FieldType::Repeater);
        let gallery = FieldDefinition::new("logos", "Logos", FieldType::Gallery);
        let toggle = FieldDefinition::new("maskLayer", "Mask", FieldType::Boolean);
        let title = FieldDefinition::new("title", "Title", FieldType::Text).bilingual();
        let link = FieldDefinition::new("ctaLink", "Link", FieldType::Url);

        assert_eq!(FieldValue::seed(&repeater), FieldValue::Items(Vec::new()));
        assert_eq!(FieldValue::seed(&gallery), FieldValue::List(Vec::new()));
        assert_eq!(FieldValue::seed(&toggle), FieldValue::Boolean(false));
        assert_eq!(FieldValue::seed(&title).to_json(), json!({"en": "", "ar": ""}));
        assert_eq!(FieldValue::seed(&link), FieldValue::Text(String::new()));
    }

    #[test]
    fn declared_default_wins_over_type_seed() {
        let toggle =
            FieldDefinition::new("maskLayer", "Mask", FieldType::Boolean).default_value(json!(true));
        assert_eq!(FieldValue::seed(&toggle), FieldValue::Boolean(true));

        let link_text = FieldDefinition::new("projectsLinkText", "Projects", FieldType::Text)
            .bilingual()
            .default_value(json!("Projects"));
        assert_eq!(
            FieldValue::seed(&link_text).to_json(),
            json!({"en": "Projects", "ar": "Projects"})
        );
    }

    #[test]
    fn mismatched_shapes_are_kept_verbatim() {
        let title = FieldDefinition::new("title", "Title", FieldType::Text).bilingual();
        let partial = json!({"en": "Only English"});

        let value = FieldValue::from_json(&title, &partial);
        assert_eq!(value, FieldValue::Json(partial.clone()));
        assert_eq!(value.to_json(), partial);
    }

    #[test]
    fn integral_numbers_stay_integers() {
        assert_eq!(number_to_json(6.0), json!(6));
        assert_eq!(number_to_json(2.5), json!(2.5));
        assert_eq!(number_to_json(f64::NAN), json!(null));
    }

    #[test]
    fn malformed_numbers_parse_to_nan() {
        assert!(parse_number("12abc").is_nan());
        assert!(parse_number("inf").is_nan());
        assert!((parse_number(" 4.5 ") - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn truthiness_matches_form_semantics() {
        assert!(!FieldValue::Text(String::new()).is_truthy());
        assert!(!FieldValue::Number(0.0).is_truthy());
        assert!(!FieldValue::Number(f64::NAN).is_truthy());
        assert!(FieldValue::List(Vec::new()).is_truthy());
        assert!(FieldValue::List(Vec::new()).is_empty_list());
        assert!(!FieldValue::Json(json!(null)).is_truthy());
    }
}

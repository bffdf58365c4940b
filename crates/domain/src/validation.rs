use std::sync::LazyLock;

use atelier_core::Locale;
use regex::Regex;

use crate::field::{FieldDefinition, FieldType};
use crate::value::FieldValue;

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// How a required bilingual field is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredCheck {
    /// The named locale must carry content. Used when validating block data
    /// server side, one locale at a time.
    Locale(Locale),
    /// At least one locale must carry content. Used by the form renderer,
    /// which edits both locales at once. Empty lists also count as missing.
    AnyLocale,
}

/// Returns the error messages for one field value, in rule order:
/// required, number bounds, email, url, select membership.
///
/// Messages are phrased with the English label.
#[must_use]
pub fn field_errors(
    field: &FieldDefinition,
    value: Option<&FieldValue>,
    check: RequiredCheck,
) -> Vec<String> {
    let label = field.label().en.as_str();
    let mut errors = Vec::new();

    if field.is_required() && is_missing(field, value, check) {
        errors.push(format!("{label} is required"));
    }

    let Some(value) = value else {
        return errors;
    };

    match field.field_type() {
        FieldType::Number => {
            if let Some(number) = value.as_number() {
                if number.is_nan() {
                    errors.push(format!("{label} must be a valid number"));
                } else {
                    if let Some(min) = field.min_value()
                        && number < min
                    {
                        errors.push(format!("{label} must be at least {min}"));
                    }
                    if let Some(max) = field.max_value()
                        && number > max
                    {
                        errors.push(format!("{label} must be at most {max}"));
                    }
                }
            }
        }
        FieldType::Email => {
            if let Some(text) = non_empty_text(value)
                && !is_valid_email(text)
            {
                errors.push(format!("{label} must be a valid email address"));
            }
        }
        FieldType::Url => {
            if let Some(text) = non_empty_text(value)
                && !is_valid_url(text)
            {
                errors.push(format!("{label} must be a valid URL"));
            }
        }
        FieldType::Select => {
            if let Some(text) = non_empty_text(value)
                && !field
                    .select_options()
                    .iter()
                    .any(|option| option.value == text)
            {
                errors.push(format!("{label} must be one of the allowed options"));
            }
        }
        _ => {}
    }

    errors
}

/// Returns whether a string looks like `local@domain.tld`.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value))
}

/// Returns whether a string is an absolute URL or a site-relative path.
#[must_use]
pub fn is_valid_url(value: &str) -> bool {
    value.starts_with('/') || url::Url::parse(value).is_ok()
}

fn is_missing(field: &FieldDefinition, value: Option<&FieldValue>, check: RequiredCheck) -> bool {
    let Some(value) = value else {
        return true;
    };

    match (field.is_bilingual(), check) {
        (true, RequiredCheck::Locale(locale)) => !value.has_locale_content(locale),
        (true, RequiredCheck::AnyLocale) => Locale::ALL
            .iter()
            .all(|locale| !value.has_locale_content(*locale)),
        (false, RequiredCheck::Locale(_)) => !value.is_truthy(),
        (false, RequiredCheck::AnyLocale) => !value.is_truthy() || value.is_empty_list(),
    }
}

fn non_empty_text(value: &FieldValue) -> Option<&str> {
    value.as_text().filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use atelier_core::{Locale, LocalizedText};
    use serde_json::json;

    use super::{RequiredCheck, field_errors, is_valid_email, is_valid_url};
    use crate::field::{FieldDefinition, FieldType, SelectOption};
    use crate::value::FieldValue;

    fn title() -> FieldDefinition {
        FieldDefinition::new("title", "Title", FieldType::Text)
            .bilingual()
            .required()
    }

    #[test]
    fn bilingual_required_checks_only_the_requested_locale() {
        let value = FieldValue::Localized(LocalizedText::new("Hello".to_owned(), String::new()));

        assert!(field_errors(&title(), Some(&value), RequiredCheck::Locale(Locale::En)).is_empty());
        assert_eq!(
            field_errors(&title(), Some(&value), RequiredCheck::Locale(Locale::Ar)),
            vec!["Title is required".to_owned()]
        );
        assert!(field_errors(&title(), Some(&value), RequiredCheck::AnyLocale).is_empty());
    }

    #[test]
    fn empty_list_is_missing_only_for_the_form_check() {
        let field = FieldDefinition::new("logos", "Logos", FieldType::Gallery).required();
        let value = FieldValue::List(Vec::new());

        assert!(field_errors(&field, Some(&value), RequiredCheck::Locale(Locale::En)).is_empty());
        assert_eq!(
            field_errors(&field, Some(&value), RequiredCheck::AnyLocale),
            vec!["Logos is required".to_owned()]
        );
    }

    #[test]
    fn number_bounds_are_inclusive() {
        let field = FieldDefinition::new("columns", "Columns", FieldType::Number)
            .min(1.0)
            .max(4.0);
        let check = RequiredCheck::AnyLocale;

        assert!(field_errors(&field, Some(&FieldValue::Number(1.0)), check).is_empty());
        assert!(field_errors(&field, Some(&FieldValue::Number(4.0)), check).is_empty());
        assert_eq!(
            field_errors(&field, Some(&FieldValue::Number(0.0)), check),
            vec!["Columns must be at least 1".to_owned()]
        );
        assert_eq!(
            field_errors(&field, Some(&FieldValue::Number(5.0)), check),
            vec!["Columns must be at most 4".to_owned()]
        );
        assert_eq!(
            field_errors(&field, Some(&FieldValue::Number(f64::NAN)), check),
            vec!["Columns must be a valid number".to_owned()]
        );
    }

    #[test]
    fn unset_number_skips_bounds() {
        let field = FieldDefinition::new("columns", "Columns", FieldType::Number).min(1.0);
        let value = FieldValue::Text(String::new());
        assert!(field_errors(&field, Some(&value), RequiredCheck::AnyLocale).is_empty());
    }

    #[test]
    fn email_and_url_formats() {
        assert!(is_valid_email("hello@studio.sa"));
        assert!(!is_valid_email("hello@studio"));
        assert!(!is_valid_email("he llo@studio.sa"));

        assert!(is_valid_url("https://studio.sa/work"));
        assert!(is_valid_url("/contact"));
        assert!(!is_valid_url("contact"));
    }

    #[test]
    fn select_value_must_be_declared() {
        let field = FieldDefinition::new("style", "Style", FieldType::Select)
            .options(vec![SelectOption::new("line", "Line")]);

        let value = FieldValue::from_json(&field, &json!("dots"));
        assert_eq!(
            field_errors(&field, Some(&value), RequiredCheck::AnyLocale),
            vec!["Style must be one of the allowed options".to_owned()]
        );
    }

    #[test]
    fn absent_optional_field_has_no_errors() {
        let field = FieldDefinition::new("ctaLink", "Link", FieldType::Url);
        assert!(field_errors(&field, None, RequiredCheck::Locale(Locale::En)).is_empty());
    }
}

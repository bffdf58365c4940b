use atelier_core::Locale;
use proptest::prelude::*;
use serde_json::{Value, json};

use super::{
    block_field_definitions, field_definitions_by_category, get_block_field_definition,
    validate_block_data,
};
use crate::block::BlockValidation;
use crate::field::validate_field_list;

#[test]
fn catalog_has_every_block_type() {
    let types: Vec<&str> = block_field_definitions()
        .iter()
        .map(|definition| definition.block_type())
        .collect();

    assert_eq!(types.len(), 17);
    assert!(types.contains(&"hero_banner"));
    assert!(types.contains(&"dynamic_form"));
}

#[test]
fn catalog_field_lists_are_valid() {
    for definition in block_field_definitions() {
        assert!(
            validate_field_list(definition.fields()).is_ok(),
            "{} has an invalid field list",
            definition.block_type()
        );
    }
}

#[test]
fn hero_banner_title_is_required_and_bilingual() {
    let definition = get_block_field_definition("hero_banner");
    let title = definition
        .and_then(|definition| {
            definition
                .fields()
                .iter()
                .find(|field| field.name() == "title")
        })
        .unwrap_or_else(|| unreachable!());

    assert!(title.is_bilingual());
    assert!(title.is_required());
}

#[test]
fn unknown_block_type_is_reported_as_data() {
    assert!(get_block_field_definition("nonexistent_type").is_none());
    assert_eq!(
        validate_block_data("nonexistent_type", &json!({}), Locale::En),
        BlockValidation {
            valid: false,
            errors: vec!["Unknown block type: nonexistent_type".to_owned()],
        }
    );
}

#[test]
fn empty_contact_form_reports_required_title() {
    let result = validate_block_data("contact_form", &json!({}), Locale::En);

    assert!(!result.valid);
    assert!(result.errors.contains(&"Form Title is required".to_owned()));
}

#[test]
fn bilingual_requirement_follows_requested_locale() {
    let data = json!({"title": {"en": "Welcome", "ar": ""}});

    assert!(validate_block_data("hero_banner", &data, Locale::En).valid);
    assert_eq!(
        validate_block_data("hero_banner", &data, Locale::Ar).errors,
        vec!["Title is required".to_owned()]
    );
}

#[test]
fn number_email_and_url_rules_apply() {
    let data = json!({
        "title": {"en": "Contact", "ar": "اتصل"},
        "recipientEmail": "not-an-email",
    });
    assert_eq!(
        validate_block_data("contact_form", &data, Locale::En).errors,
        vec!["Recipient Email must be a valid email address".to_owned()]
    );

    let data = json!({"maxItems": 21, "ctaLink": "portfolio"});
    assert_eq!(
        validate_block_data("portfolio_display_home", &data, Locale::En).errors,
        vec![
            "Maximum Projects to Display must be at most 20".to_owned(),
            "CTA Link must be a valid URL".to_owned(),
        ]
    );
}

#[test]
fn categories_keep_first_seen_order() {
    let categories: Vec<&str> = field_definitions_by_category()
        .iter()
        .map(|(category, _)| *category)
        .collect();

    assert_eq!(
        categories,
        vec![
            "Headers",
            "Content",
            "Services",
            "Portfolio",
            "Forms",
            "Decorative",
            "Recognition",
            "Social Proof",
            "Social",
            "Layout",
        ]
    );

    let forms = field_definitions_by_category()
        .into_iter()
        .find(|(category, _)| *category == "Forms")
        .map(|(_, definitions)| {
            definitions
                .iter()
                .map(|definition| definition.block_type())
                .collect::<Vec<_>>()
        });
    assert_eq!(forms, Some(vec!["contact_form", "dynamic_form"]));
}

fn block_type_strategy() -> impl Strategy<Value = String> {
    let types: Vec<String> = block_field_definitions()
        .iter()
        .map(|definition| definition.block_type().to_owned())
        .collect();
    prop::sample::select(types)
}

fn locale_strategy() -> impl Strategy<Value = Locale> {
    prop::sample::select(Locale::ALL.to_vec())
}

proptest! {
    #[test]
    fn validation_is_idempotent(
        block_type in block_type_strategy(),
        title in ".{0,8}",
        count in -5_i64..30,
        locale in locale_strategy(),
    ) {
        let data = json!({
            "title": {"en": title.clone(), "ar": ""},
            "maxItems": count,
            "maxPosts": count,
            "speed": count,
            "formId": title,
        });

        let first = validate_block_data(&block_type, &data, locale);
        let second = validate_block_data(&block_type, &data, locale);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn speed_bounds_are_inclusive(speed in -20_i64..40) {
        let data = json!({"text": {"en": "Motion", "ar": "حركة"}, "speed": speed});
        let result = validate_block_data("animated_headline", &data, Locale::En);
        prop_assert_eq!(result.valid, (1..=10).contains(&speed));
    }

    #[test]
    fn non_object_data_is_treated_as_empty(number in any::<i64>()) {
        let result = validate_block_data("hero_banner", &Value::from(number), Locale::En);
        prop_assert_eq!(result.errors, vec!["Title is required".to_owned()]);
    }
}

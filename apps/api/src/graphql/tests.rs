use std::sync::Arc;

use async_graphql::{Request, Variables};
use atelier_application::BlueprintService;
use atelier_infrastructure::InMemoryContentRepository;
use serde_json::{Value, json};

use super::{ContentSchema, GraphqlLimits, build_schema};

async fn seeded_schema(limits: GraphqlLimits) -> ContentSchema {
    let service = BlueprintService::new(Arc::new(InMemoryContentRepository::new()));
    assert!(service.seed_system_blueprints().await.is_ok());
    build_schema(service, limits)
}

fn default_limits() -> GraphqlLimits {
    GraphqlLimits {
        max_depth: 10,
        max_complexity: 200,
    }
}

async fn execute(schema: &ContentSchema, query: &str, variables: Value) -> Value {
    let response = schema
        .execute(Request::new(query).variables(Variables::from_json(variables)))
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    response
        .data
        .into_json()
        .unwrap_or_else(|_| unreachable!())
}

async fn hero_banner_id(schema: &ContentSchema) -> String {
    let data = execute(
        schema,
        r#"{ blueprints(blueprintType: "COMPONENT") { id name } }"#,
        json!({}),
    )
    .await;

    data["blueprints"]
        .as_array()
        .and_then(|blueprints| {
            blueprints
                .iter()
                .find(|blueprint| blueprint["name"] == "hero_banner")
        })
        .and_then(|blueprint| blueprint["id"].as_str())
        .map(str::to_owned)
        .unwrap_or_else(|| unreachable!())
}

#[tokio::test]
async fn block_definitions_are_grouped_by_category() {
    let schema = seeded_schema(default_limits()).await;

    let data = execute(&schema, "{ blockDefinitions { category } }", json!({})).await;

    assert_eq!(data["blockDefinitions"][0]["category"], "Headers");
}

#[tokio::test]
async fn page_components_use_the_list_envelope() {
    let schema = seeded_schema(default_limits()).await;
    let hero_banner = hero_banner_id(&schema).await;

    for title in ["One", "Two", "Three"] {
        execute(
            &schema,
            r#"mutation($blueprintId: String!, $data: JSON) {
                createBlueprintInstance(pageId: "home", blueprintId: $blueprintId, data: $data) { id }
            }"#,
            json!({"blueprintId": hero_banner, "data": {"title": {"en": title, "ar": title}}}),
        )
        .await;
    }

    let data = execute(
        &schema,
        r#"{ pageComponents(pageId: "home", locale: "ar", limit: 2) { items total hasMore } }"#,
        json!({}),
    )
    .await;

    let page = &data["pageComponents"];
    assert_eq!(page["total"], 3);
    assert_eq!(page["hasMore"], true);
    assert_eq!(page["items"][1]["title"], json!({"en": "Two", "ar": "Two"}));
    assert_eq!(page["items"][1]["order"], 1);
    assert_eq!(page["items"][1]["status"], "draft");
}

#[tokio::test]
async fn updates_touch_one_locale() {
    let schema = seeded_schema(default_limits()).await;
    let hero_banner = hero_banner_id(&schema).await;
    let created = execute(
        &schema,
        r#"mutation($blueprintId: String!) {
            createBlueprintInstance(pageId: "home", blueprintId: $blueprintId) { id }
        }"#,
        json!({"blueprintId": hero_banner}),
    )
    .await;
    let id = created["createBlueprintInstance"]["id"].clone();

    let updated = execute(
        &schema,
        r#"mutation($id: String!) {
            updateBlueprintInstance(id: $id, locale: "ar", data: {ctaLink: "/ar"}, status: "published") {
                dataEn dataAr status
            }
        }"#,
        json!({"id": id}),
    )
    .await;

    let instance = &updated["updateBlueprintInstance"];
    assert_eq!(instance["dataAr"]["ctaLink"], "/ar");
    assert_eq!(instance["dataEn"].get("ctaLink"), None);
    assert_eq!(instance["status"], "published");
}

#[tokio::test]
async fn validate_block_reports_missing_required_fields() {
    let schema = seeded_schema(default_limits()).await;

    let data = execute(
        &schema,
        r#"{ validateBlock(blockType: "hero_banner", data: {title: {en: "Hi"}}, locale: "ar") { valid errors } }"#,
        json!({}),
    )
    .await;

    assert_eq!(data["validateBlock"]["valid"], false);
    assert_eq!(data["validateBlock"]["errors"], json!(["Title is required"]));
}

#[tokio::test]
async fn service_errors_surface_with_their_message() {
    let schema = seeded_schema(default_limits()).await;

    let response = schema
        .execute(r#"mutation { deleteBlueprintInstance(id: "missing") }"#)
        .await;

    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.starts_with("not found:"));
}

#[tokio::test]
async fn unknown_locales_are_rejected() {
    let schema = seeded_schema(default_limits()).await;

    let response = schema
        .execute(r#"{ pageComponents(pageId: "home", locale: "fr") { total } }"#)
        .await;

    assert_eq!(response.errors.len(), 1);
}

#[tokio::test]
async fn queries_deeper_than_the_limit_are_refused() {
    let schema = seeded_schema(GraphqlLimits {
        max_depth: 1,
        max_complexity: 200,
    })
    .await;

    let response = schema.execute("{ blueprints { id } }").await;

    assert!(!response.errors.is_empty());
}

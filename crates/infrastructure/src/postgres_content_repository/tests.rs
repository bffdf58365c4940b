use atelier_application::ContentRepository;
use atelier_core::{AppError, Locale};
use atelier_domain::{
    BlueprintInstance, BlueprintType, ContentBlueprint, FieldDefinition, FieldType,
    InstanceStatus,
};
use serde_json::json;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use super::PostgresContentRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres content tests: {error}");
    }

    Some(pool)
}

fn unique(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::new_v4().simple())
}

fn hero(id: &str, name: &str) -> ContentBlueprint {
    ContentBlueprint::new(
        id,
        name,
        "Hero Banner",
        BlueprintType::Component,
        vec![
            FieldDefinition::new("title", "Title", FieldType::Text)
                .bilingual()
                .required(),
            FieldDefinition::new("maskLayer", "Show Dark Overlay", FieldType::Boolean)
                .default_value(json!(true)),
        ],
    )
    .unwrap_or_else(|_| unreachable!())
    .with_category("Headers")
    .with_icon(Some("🏔️".to_owned()))
    .as_system()
}

#[tokio::test]
async fn blueprints_round_trip_through_jsonb() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresContentRepository::new(pool);
    let id = unique("bp");
    let name = unique("hero_banner");
    let blueprint = hero(&id, &name);

    assert!(repository.save_blueprint(blueprint.clone()).await.is_ok());

    let by_id = repository.find_blueprint(&id).await;
    let by_name = repository.find_blueprint_by_name(&name).await;
    assert_eq!(by_id.ok().flatten(), Some(blueprint.clone()));
    assert_eq!(by_name.ok().flatten().map(|found| found.id().to_owned()), Some(id));
}

#[tokio::test]
async fn duplicate_blueprint_names_conflict() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresContentRepository::new(pool);
    let name = unique("hero_banner");

    assert!(
        repository
            .save_blueprint(hero(&unique("bp"), &name))
            .await
            .is_ok()
    );
    let clash = repository.save_blueprint(hero(&unique("bp"), &name)).await;

    assert!(matches!(clash, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn page_replacement_is_ordered_and_cascades() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresContentRepository::new(pool);
    let blueprint_id = unique("bp");
    let page_id = unique("page");
    assert!(
        repository
            .save_blueprint(hero(&blueprint_id, &unique("hero_banner")))
            .await
            .is_ok()
    );

    let mut first = BlueprintInstance::new(unique("i"), blueprint_id.as_str())
        .with_page_id(page_id.as_str())
        .with_data(
            serde_json::Map::from_iter([("title".to_owned(), json!({"en": "Hi", "ar": ""}))]),
            serde_json::Map::new(),
        )
        .with_status(InstanceStatus::Published);
    first.set_order(1);
    let mut second =
        BlueprintInstance::new(unique("i"), blueprint_id.as_str()).with_page_id(page_id.as_str());
    second.set_order(0);

    let replaced = repository
        .replace_page_instances(&page_id, vec![first.clone(), second.clone()])
        .await;
    assert!(replaced.is_ok());

    let listed = repository
        .list_page_instances(&page_id)
        .await
        .unwrap_or_default();
    let ids: Vec<&str> = listed.iter().map(BlueprintInstance::id).collect();
    assert_eq!(ids, vec![second.id(), first.id()]);
    assert_eq!(listed[1].data(Locale::En)["title"], json!({"en": "Hi", "ar": ""}));
    assert_eq!(listed[1].status(), InstanceStatus::Published);

    assert!(repository.delete_blueprint(&blueprint_id).await.is_ok());
    let after = repository
        .list_page_instances(&page_id)
        .await
        .unwrap_or_default();
    assert!(after.is_empty());
}

#[tokio::test]
async fn instances_of_unknown_blueprints_are_rejected() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresContentRepository::new(pool);
    let instance = BlueprintInstance::new(unique("i"), unique("missing")).with_page_id("home");

    let result = repository.save_instance(instance).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

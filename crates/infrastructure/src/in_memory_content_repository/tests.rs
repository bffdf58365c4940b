use atelier_application::ContentRepository;
use atelier_core::AppError;
use atelier_domain::{BlueprintInstance, BlueprintType, ContentBlueprint};

use super::InMemoryContentRepository;

fn blueprint(id: &str, name: &str, blueprint_type: BlueprintType) -> ContentBlueprint {
    ContentBlueprint::new(id, name, name, blueprint_type, Vec::new())
        .unwrap_or_else(|_| unreachable!())
}

fn placed(id: &str, blueprint_id: &str, page_id: &str, order: usize) -> BlueprintInstance {
    let mut instance = BlueprintInstance::new(id, blueprint_id).with_page_id(page_id);
    instance.set_order(order);
    instance
}

#[tokio::test]
async fn blueprints_are_listed_by_name_and_type() {
    let repository = InMemoryContentRepository::new();
    for (id, name, blueprint_type) in [
        ("b-1", "stats_section", BlueprintType::Component),
        ("b-2", "contact_document", BlueprintType::Document),
        ("b-3", "hero_banner", BlueprintType::Component),
    ] {
        let saved = repository
            .save_blueprint(blueprint(id, name, blueprint_type))
            .await;
        assert!(saved.is_ok());
    }

    let all = repository.list_blueprints(None).await.unwrap_or_default();
    let names: Vec<&str> = all.iter().map(ContentBlueprint::name).collect();
    assert_eq!(names, vec!["contact_document", "hero_banner", "stats_section"]);

    let components = repository
        .list_blueprints(Some(BlueprintType::Component))
        .await
        .unwrap_or_default();
    assert_eq!(components.len(), 2);
}

#[tokio::test]
async fn blueprint_names_are_unique_across_ids() {
    let repository = InMemoryContentRepository::new();
    assert!(
        repository
            .save_blueprint(blueprint("b-1", "hero_banner", BlueprintType::Component))
            .await
            .is_ok()
    );

    let clash = repository
        .save_blueprint(blueprint("b-2", "hero_banner", BlueprintType::Component))
        .await;
    let upsert = repository
        .save_blueprint(blueprint("b-1", "hero_banner", BlueprintType::Document))
        .await;

    assert!(matches!(clash, Err(AppError::Conflict(_))));
    assert!(upsert.is_ok());
}

#[tokio::test]
async fn deleting_a_blueprint_cascades_to_instances() {
    let repository = InMemoryContentRepository::new();
    assert!(
        repository
            .save_blueprint(blueprint("b-1", "hero_banner", BlueprintType::Component))
            .await
            .is_ok()
    );
    assert!(
        repository
            .save_instance(placed("i-1", "b-1", "home", 0))
            .await
            .is_ok()
    );

    assert!(repository.delete_blueprint("b-1").await.is_ok());

    let remaining = repository.find_instance("i-1").await.unwrap_or_default();
    assert!(remaining.is_none());
    assert!(matches!(
        repository.delete_blueprint("b-1").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn instances_require_a_known_blueprint() {
    let repository = InMemoryContentRepository::new();

    let result = repository.save_instance(placed("i-1", "missing", "home", 0)).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn replacing_a_page_leaves_other_pages_alone() {
    let repository = InMemoryContentRepository::new();
    assert!(
        repository
            .save_blueprint(blueprint("b-1", "hero_banner", BlueprintType::Component))
            .await
            .is_ok()
    );
    for instance in [
        placed("i-1", "b-1", "home", 0),
        placed("i-2", "b-1", "home", 1),
        placed("i-3", "b-1", "about", 0),
    ] {
        assert!(repository.save_instance(instance).await.is_ok());
    }

    let replaced = repository
        .replace_page_instances(
            "home",
            vec![placed("i-2", "b-1", "home", 0), placed("i-4", "b-1", "home", 1)],
        )
        .await;
    assert!(replaced.is_ok());

    let home = repository.list_page_instances("home").await.unwrap_or_default();
    let ids: Vec<&str> = home.iter().map(BlueprintInstance::id).collect();
    assert_eq!(ids, vec!["i-2", "i-4"]);

    let about = repository.list_page_instances("about").await.unwrap_or_default();
    assert_eq!(about.len(), 1);
}

#[tokio::test]
async fn replacing_cannot_steal_another_pages_instance() {
    let repository = InMemoryContentRepository::new();
    assert!(
        repository
            .save_blueprint(blueprint("b-1", "hero_banner", BlueprintType::Component))
            .await
            .is_ok()
    );
    assert!(
        repository
            .save_instance(placed("i-1", "b-1", "about", 0))
            .await
            .is_ok()
    );

    let result = repository
        .replace_page_instances("home", vec![placed("i-1", "b-1", "home", 0)])
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

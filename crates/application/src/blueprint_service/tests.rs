use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use atelier_core::{AppError, AppResult, Locale};
use atelier_domain::{
    BlueprintInstance, BlueprintType, ContentBlueprint, FieldDefinition, FieldType,
    InstanceStatus,
};
use serde_json::{Map, Value, json};
use tokio::sync::Mutex;

use super::BlueprintService;
use crate::content_ports::{
    BlueprintFilter, ComposerBackend, ContentRepository, CreateInstanceInput, PageQuery,
    SaveBlueprintInput, UpdateInstanceInput,
};

#[derive(Default)]
struct FakeContentRepository {
    blueprints: Mutex<HashMap<String, ContentBlueprint>>,
    instances: Mutex<HashMap<String, BlueprintInstance>>,
}

#[async_trait]
impl ContentRepository for FakeContentRepository {
    async fn list_blueprints(
        &self,
        blueprint_type: Option<BlueprintType>,
    ) -> AppResult<Vec<ContentBlueprint>> {
        Ok(self
            .blueprints
            .lock()
            .await
            .values()
            .filter(|blueprint| {
                blueprint_type.is_none_or(|expected| blueprint.blueprint_type() == expected)
            })
            .cloned()
            .collect())
    }

    async fn find_blueprint(&self, id: &str) -> AppResult<Option<ContentBlueprint>> {
        Ok(self.blueprints.lock().await.get(id).cloned())
    }

    async fn find_blueprint_by_name(&self, name: &str) -> AppResult<Option<ContentBlueprint>> {
        Ok(self
            .blueprints
            .lock()
            .await
            .values()
            .find(|blueprint| blueprint.name() == name)
            .cloned())
    }

    async fn save_blueprint(&self, blueprint: ContentBlueprint) -> AppResult<()> {
        self.blueprints
            .lock()
            .await
            .insert(blueprint.id().to_owned(), blueprint);
        Ok(())
    }

    async fn delete_blueprint(&self, id: &str) -> AppResult<()> {
        self.blueprints.lock().await.remove(id);
        self.instances
            .lock()
            .await
            .retain(|_, instance| instance.blueprint_id() != id);
        Ok(())
    }

    async fn list_page_instances(&self, page_id: &str) -> AppResult<Vec<BlueprintInstance>> {
        let mut instances: Vec<_> = self
            .instances
            .lock()
            .await
            .values()
            .filter(|instance| instance.page_id() == Some(page_id))
            .cloned()
            .collect();
        instances.sort_by_key(BlueprintInstance::order);
        Ok(instances)
    }

    async fn find_instance(&self, id: &str) -> AppResult<Option<BlueprintInstance>> {
        Ok(self.instances.lock().await.get(id).cloned())
    }

    async fn save_instance(&self, instance: BlueprintInstance) -> AppResult<()> {
        self.instances
            .lock()
            .await
            .insert(instance.id().to_owned(), instance);
        Ok(())
    }

    async fn delete_instance(&self, id: &str) -> AppResult<()> {
        self.instances.lock().await.remove(id);
        Ok(())
    }

    async fn replace_page_instances(
        &self,
        page_id: &str,
        instances: Vec<BlueprintInstance>,
    ) -> AppResult<()> {
        let mut stored = self.instances.lock().await;
        stored.retain(|_, instance| instance.page_id() != Some(page_id));
        for instance in instances {
            stored.insert(instance.id().to_owned(), instance);
        }
        Ok(())
    }
}

fn service() -> (Arc<FakeContentRepository>, BlueprintService) {
    let repository = Arc::new(FakeContentRepository::default());
    (repository.clone(), BlueprintService::new(repository))
}

fn input(name: &str) -> SaveBlueprintInput {
    SaveBlueprintInput {
        name: name.to_owned(),
        display_name: "Custom Banner".to_owned(),
        description: None,
        blueprint_type: BlueprintType::Component,
        allow_multiple: true,
        icon: None,
        category: "Headers".to_owned(),
        fields: vec![
            FieldDefinition::new("headline", "Headline", FieldType::Text)
                .bilingual()
                .required(),
        ],
    }
}

fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

async fn seeded_hero(service: &BlueprintService) -> ContentBlueprint {
    assert!(service.seed_system_blueprints().await.is_ok());
    service
        .list_blueprints(BlueprintFilter::default())
        .await
        .unwrap_or_else(|_| unreachable!())
        .into_iter()
        .find(|blueprint| blueprint.name() == "hero_banner")
        .unwrap_or_else(|| unreachable!())
}

#[tokio::test]
async fn seeding_is_idempotent() {
    let (_, service) = service();

    let first = service.seed_system_blueprints().await;
    let second = service.seed_system_blueprints().await;

    assert_eq!(first.ok(), Some(17));
    assert_eq!(second.ok(), Some(0));
}

#[tokio::test]
async fn list_is_ordered_by_name_and_filterable() {
    let (_, service) = service();
    assert!(service.seed_system_blueprints().await.is_ok());
    let mut document = input("zz_form");
    document.blueprint_type = BlueprintType::Document;
    assert!(service.create_blueprint(document).await.is_ok());

    let all = service
        .list_blueprints(BlueprintFilter::default())
        .await
        .unwrap_or_else(|_| unreachable!());
    let names: Vec<&str> = all.iter().map(ContentBlueprint::name).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert_eq!(all.len(), 18);

    let components = service
        .list_blueprints(BlueprintFilter {
            blueprint_type: Some(BlueprintType::Component),
        })
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(components.len(), 17);
}

#[tokio::test]
async fn blueprint_names_are_unique() {
    let (_, service) = service();
    assert!(service.create_blueprint(input("custom_banner")).await.is_ok());

    let result = service.create_blueprint(input("custom_banner")).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn system_blueprints_are_read_only() {
    let (_, service) = service();
    let hero = seeded_hero(&service).await;

    let update = service.update_blueprint(hero.id(), input("hero_banner")).await;
    let delete = service.delete_blueprint(hero.id()).await;

    assert!(matches!(update, Err(AppError::Conflict(_))));
    assert!(matches!(delete, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn deleting_a_blueprint_removes_its_instances() {
    let (repository, service) = service();
    let custom = service
        .create_blueprint(input("custom_banner"))
        .await
        .unwrap_or_else(|_| unreachable!());
    let instance = service
        .create_instance(CreateInstanceInput {
            page_id: "home".to_owned(),
            blueprint_id: custom.id().to_owned(),
            data: Map::new(),
            status: None,
        })
        .await
        .unwrap_or_else(|_| unreachable!());

    assert!(service.delete_blueprint(custom.id()).await.is_ok());
    assert!(repository.instances.lock().await.get(instance.id()).is_none());
}

#[tokio::test]
async fn save_replaces_temporary_ids_and_densifies_order() {
    let (_, service) = service();
    let hero = seeded_hero(&service).await;
    let kept = service
        .create_instance(CreateInstanceInput {
            page_id: "home".to_owned(),
            blueprint_id: hero.id().to_owned(),
            data: object(json!({"title": {"en": "Hi", "ar": "أهلا"}})),
            status: Some(InstanceStatus::Published),
        })
        .await
        .unwrap_or_else(|_| unreachable!());
    let dropped = service
        .create_instance(CreateInstanceInput {
            page_id: "home".to_owned(),
            blueprint_id: hero.id().to_owned(),
            data: Map::new(),
            status: None,
        })
        .await
        .unwrap_or_else(|_| unreachable!());

    let fresh = BlueprintInstance::with_temporary_id(hero.id());
    let stored = service
        .save_page_components("home", vec![fresh, kept.clone()])
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(stored.len(), 2);
    assert!(!stored[0].has_temporary_id());
    assert_eq!(stored[1].id(), kept.id());
    assert_eq!(stored[0].order(), 0);
    assert_eq!(stored[1].order(), 1);
    assert!(stored.iter().all(|instance| instance.blueprint().is_some()));

    let listed = service
        .list_page_components("home")
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|instance| instance.id() != dropped.id()));
}

#[tokio::test]
async fn save_rejects_unknown_blueprints() {
    let (_, service) = service();
    let result = service
        .save_page_components("home", vec![BlueprintInstance::with_temporary_id("nope")])
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn update_merges_into_one_locale() {
    let (_, service) = service();
    let hero = seeded_hero(&service).await;
    let instance = service
        .create_instance(CreateInstanceInput {
            page_id: "home".to_owned(),
            blueprint_id: hero.id().to_owned(),
            data: object(json!({"title": {"en": "Hi", "ar": "أهلا"}, "ctaLink": "/work"})),
            status: None,
        })
        .await
        .unwrap_or_else(|_| unreachable!());

    let updated = service
        .update_instance(
            instance.id(),
            UpdateInstanceInput {
                locale: Locale::Ar,
                data: Some(object(json!({"ctaLink": "/ar/work"}))),
                status: Some(InstanceStatus::Published),
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(updated.data(Locale::Ar)["ctaLink"], json!("/ar/work"));
    assert_eq!(updated.data(Locale::Ar)["title"], json!({"en": "Hi", "ar": "أهلا"}));
    assert_eq!(updated.data(Locale::En)["ctaLink"], json!("/work"));
    assert_eq!(updated.status(), InstanceStatus::Published);
}

#[tokio::test]
async fn duplicate_is_a_draft_at_the_end() {
    let (_, service) = service();
    let hero = seeded_hero(&service).await;
    let mut ids = Vec::new();
    for _ in 0..2 {
        let instance = service
            .create_instance(CreateInstanceInput {
                page_id: "home".to_owned(),
                blueprint_id: hero.id().to_owned(),
                data: object(json!({"ctaLink": "/work"})),
                status: Some(InstanceStatus::Published),
            })
            .await
            .unwrap_or_else(|_| unreachable!());
        ids.push(instance.id().to_owned());
    }

    let copy = service
        .duplicate_instance(&ids[0])
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_ne!(copy.id(), ids[0]);
    assert_eq!(copy.order(), 2);
    assert_eq!(copy.status(), InstanceStatus::Draft);
    assert_eq!(copy.data(Locale::En)["ctaLink"], json!("/work"));
}

#[tokio::test]
async fn delete_closes_the_gap() {
    let (_, service) = service();
    let hero = seeded_hero(&service).await;
    let mut ids = Vec::new();
    for _ in 0..3 {
        let instance = service
            .create_instance(CreateInstanceInput {
                page_id: "home".to_owned(),
                blueprint_id: hero.id().to_owned(),
                data: Map::new(),
                status: None,
            })
            .await
            .unwrap_or_else(|_| unreachable!());
        ids.push(instance.id().to_owned());
    }

    assert!(service.delete_instance(&ids[1]).await.is_ok());

    let listed = service
        .list_page_components("home")
        .await
        .unwrap_or_else(|_| unreachable!());
    let orders: Vec<usize> = listed.iter().map(BlueprintInstance::order).collect();
    assert_eq!(orders, vec![0, 1]);
    assert_eq!(listed[1].id(), ids[2]);
    assert!(matches!(
        service.delete_instance(&ids[1]).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn validation_uses_registry_schema_for_system_blocks() {
    let (_, service) = service();
    let hero = seeded_hero(&service).await;
    let instance = service
        .create_instance(CreateInstanceInput {
            page_id: "home".to_owned(),
            blueprint_id: hero.id().to_owned(),
            data: object(json!({"title": {"en": "Hi", "ar": ""}})),
            status: None,
        })
        .await
        .unwrap_or_else(|_| unreachable!());

    let english = service.validate_instance(instance.id(), Locale::En).await;
    let arabic = service.validate_instance(instance.id(), Locale::Ar).await;

    assert_eq!(english.map(|result| result.valid).ok(), Some(true));
    assert_eq!(
        arabic.map(|result| result.errors).ok(),
        Some(vec!["Title is required".to_owned()])
    );
}

#[tokio::test]
async fn validation_falls_back_to_blueprint_fields() {
    let (_, service) = service();
    let custom = service
        .create_blueprint(input("custom_banner"))
        .await
        .unwrap_or_else(|_| unreachable!());
    let instance = service
        .create_instance(CreateInstanceInput {
            page_id: "home".to_owned(),
            blueprint_id: custom.id().to_owned(),
            data: Map::new(),
            status: None,
        })
        .await
        .unwrap_or_else(|_| unreachable!());

    let result = service
        .validate_instance(instance.id(), Locale::En)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(result.errors, vec!["Headline is required".to_owned()]);
}

#[tokio::test]
async fn page_window_projects_one_locale() {
    let (_, service) = service();
    let hero = seeded_hero(&service).await;
    for title in ["one", "two", "three"] {
        let created = service
            .create_instance(CreateInstanceInput {
                page_id: "home".to_owned(),
                blueprint_id: hero.id().to_owned(),
                data: object(json!({"headline": title})),
                status: None,
            })
            .await;
        assert!(created.is_ok());
    }

    let page = service
        .page_components_page("home", Locale::En, PageQuery { limit: 2, offset: 1 })
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(page.total, 3);
    assert!(!page.has_more);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0]["headline"], json!("two"));
    assert_eq!(page.items[0]["order"], json!(1));
    assert_eq!(page.items[0]["blueprintId"], json!(hero.id()));
}

#[tokio::test]
async fn service_serves_as_composer_backend() {
    let (_, service) = service();
    seeded_hero(&service).await;
    let backend: Arc<dyn ComposerBackend> = Arc::new(service);

    let blueprints = backend.load_blueprints().await.unwrap_or_else(|_| unreachable!());
    let instances = backend.load_instances("home").await.unwrap_or_else(|_| unreachable!());

    assert_eq!(blueprints.len(), 17);
    assert!(instances.is_empty());
}

use atelier_application::{BlueprintFilter, BlueprintService, CreateInstanceInput};
use atelier_core::{AppError, AppResult};
use atelier_domain::InstanceStatus;
use serde_json::{Map, Value, json};
use tracing::info;

const DEV_SEED_PAGE_ID: &str = "home";

/// Places a demo composition on the home page when it is still empty.
pub async fn run(service: &BlueprintService) -> AppResult<()> {
    service.seed_system_blueprints().await?;

    if !service
        .list_page_components(DEV_SEED_PAGE_ID)
        .await?
        .is_empty()
    {
        info!(page_id = DEV_SEED_PAGE_ID, "dev seed skipped, page already composed");
        return Ok(());
    }

    let blueprints = service.list_blueprints(BlueprintFilter::default()).await?;
    let blueprint_id = |name: &str| {
        blueprints
            .iter()
            .find(|blueprint| blueprint.name() == name)
            .map(|blueprint| blueprint.id().to_owned())
            .ok_or_else(|| AppError::Internal(format!("system blueprint '{name}' is missing")))
    };

    let placements = [
        (
            "hero_banner",
            json!({
                "title": {"en": "Spaces that tell your story", "ar": "مساحات تروي قصتك"},
                "subtitle": {
                    "en": "Interior design and fit-out studio",
                    "ar": "استوديو للتصميم الداخلي والتنفيذ"
                },
                "ctaText": {"en": "Explore Our Work", "ar": "استكشف أعمالنا"},
                "ctaLink": "/portfolio",
                "maskLayer": true
            }),
        ),
        (
            "stats_section",
            json!({
                "title": {"en": "By the numbers", "ar": "بالأرقام"},
                "stats": [
                    {"number": "250+", "label": {"en": "Projects", "ar": "مشروع"}, "icon": "🏆"},
                    {"number": "15", "label": {"en": "Years", "ar": "سنة"}, "icon": "📐"}
                ]
            }),
        ),
        (
            "contact_form",
            json!({
                "title": {"en": "Start your project", "ar": "ابدأ مشروعك"},
                "recipientEmail": "studio@example.com"
            }),
        ),
    ];

    for (name, data) in placements {
        service
            .create_instance(CreateInstanceInput {
                page_id: DEV_SEED_PAGE_ID.to_owned(),
                blueprint_id: blueprint_id(name)?,
                data: object(data),
                status: Some(InstanceStatus::Published),
            })
            .await?;
    }

    info!(page_id = DEV_SEED_PAGE_ID, "dev seed placed demo components");
    Ok(())
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(object) => object,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use atelier_application::BlueprintService;
    use atelier_core::Locale;
    use atelier_infrastructure::InMemoryContentRepository;

    use super::{DEV_SEED_PAGE_ID, run};

    #[tokio::test]
    async fn seeding_twice_places_the_demo_page_once() {
        let service = BlueprintService::new(Arc::new(InMemoryContentRepository::new()));

        assert!(run(&service).await.is_ok());
        assert!(run(&service).await.is_ok());

        let placed = service
            .list_page_components(DEV_SEED_PAGE_ID)
            .await
            .unwrap_or_default();
        assert_eq!(placed.len(), 3);
        for instance in &placed {
            let validation = service
                .validate_instance(instance.id(), Locale::Ar)
                .await
                .map(|result| result.valid);
            assert_eq!(validation.ok(), Some(true));
        }
    }
}

use std::collections::HashSet;

use atelier_core::{AppError, AppResult, Locale};
use atelier_domain::{
    BlockValidation, BlueprintInstance, InstanceStatus, PageComposition,
    get_block_field_definition, validate_fields,
};
use serde_json::Value;
use tracing::info;

use super::BlueprintService;
use crate::content_ports::{
    CreateInstanceInput, PageComponentsPage, PageQuery, UpdateInstanceInput,
};

impl BlueprintService {
    /// Lists a page's instances in render order with their blueprints.
    pub async fn list_page_components(&self, page_id: &str) -> AppResult<Vec<BlueprintInstance>> {
        let instances = self.repository.list_page_instances(page_id).await?;
        let composition = PageComposition::from_instances(instances);
        self.with_blueprints(composition.into_instances()).await
    }

    /// Returns one window of a page's instances projected to `locale`.
    pub async fn page_components_page(
        &self,
        page_id: &str,
        locale: Locale,
        query: PageQuery,
    ) -> AppResult<PageComponentsPage> {
        let instances = PageComposition::from_instances(
            self.repository.list_page_instances(page_id).await?,
        )
        .into_instances();
        let total = instances.len();
        let items: Vec<_> = instances
            .iter()
            .skip(query.offset)
            .take(query.limit)
            .map(|instance| instance.localized_view(locale))
            .collect();
        let has_more = query.offset.saturating_add(items.len()) < total;

        Ok(PageComponentsPage {
            items,
            total,
            has_more,
        })
    }

    /// Replaces a page's ordered instance list and returns the stored list.
    ///
    /// Temporary ids and ids that do not belong to the page are replaced
    /// with server ids; `order` follows the submitted position.
    pub async fn save_page_components(
        &self,
        page_id: &str,
        instances: Vec<BlueprintInstance>,
    ) -> AppResult<Vec<BlueprintInstance>> {
        let blueprints = self.blueprints_by_id().await?;
        if let Some(unknown) = instances
            .iter()
            .find(|instance| !blueprints.contains_key(instance.blueprint_id()))
        {
            return Err(AppError::Validation(format!(
                "blueprint '{}' does not exist",
                unknown.blueprint_id()
            )));
        }

        let persisted: HashSet<String> = self
            .repository
            .list_page_instances(page_id)
            .await?
            .into_iter()
            .map(|instance| instance.id().to_owned())
            .collect();

        let mut seen = HashSet::new();
        let mut composition = PageComposition::new();
        for mut instance in instances {
            let keeps_id = !instance.has_temporary_id()
                && persisted.contains(instance.id())
                && seen.insert(instance.id().to_owned());
            if !keeps_id {
                instance.set_id(uuid::Uuid::new_v4().to_string());
            }
            instance.set_page_id(page_id);
            instance.clear_blueprint();
            composition.push(instance);
        }

        let stored = composition.into_instances();
        let count = stored.len();
        self.repository
            .replace_page_instances(page_id, stored.clone())
            .await?;
        info!(page_id = %page_id, count, "page components saved");

        self.with_blueprints(stored).await
    }

    /// Places one instance at the end of a page.
    pub async fn create_instance(&self, input: CreateInstanceInput) -> AppResult<BlueprintInstance> {
        let blueprint = self.require_blueprint(input.blueprint_id.as_str()).await?;
        let order = self
            .repository
            .list_page_instances(input.page_id.as_str())
            .await?
            .len();

        let mut instance = BlueprintInstance::new(uuid::Uuid::new_v4().to_string(), blueprint.id())
            .with_page_id(input.page_id)
            .with_data(input.data.clone(), input.data)
            .with_status(input.status.unwrap_or_default());
        instance.set_order(order);

        self.repository.save_instance(instance.clone()).await?;
        Ok(instance.with_blueprint(blueprint))
    }

    /// Merges data into one locale of an instance and updates its status.
    pub async fn update_instance(
        &self,
        id: &str,
        input: UpdateInstanceInput,
    ) -> AppResult<BlueprintInstance> {
        let mut instance = self.require_instance(id).await?;
        if let Some(data) = input.data {
            instance.merge_data(input.locale, data);
        }
        if let Some(status) = input.status {
            instance.set_status(status);
        }

        self.repository.save_instance(instance.clone()).await?;
        let blueprint = self.repository.find_blueprint(instance.blueprint_id()).await?;
        Ok(match blueprint {
            Some(blueprint) => instance.with_blueprint(blueprint),
            None => instance,
        })
    }

    /// Copies an instance as a draft at the end of its page.
    pub async fn duplicate_instance(&self, id: &str) -> AppResult<BlueprintInstance> {
        let source = self.require_instance(id).await?;
        let page_id = source
            .page_id()
            .ok_or_else(|| AppError::Internal(format!("component '{id}' has no page")))?
            .to_owned();
        let order = self.repository.list_page_instances(&page_id).await?.len();

        let mut copy = source.duplicate_as(uuid::Uuid::new_v4().to_string());
        copy.set_status(InstanceStatus::Draft);
        copy.set_order(order);
        copy.clear_blueprint();

        self.repository.save_instance(copy.clone()).await?;
        Ok(copy)
    }

    /// Deletes an instance and closes the gap it leaves on its page.
    pub async fn delete_instance(&self, id: &str) -> AppResult<()> {
        let instance = self.require_instance(id).await?;
        self.repository.delete_instance(id).await?;

        if let Some(page_id) = instance.page_id() {
            let remaining = PageComposition::from_instances(
                self.repository.list_page_instances(page_id).await?,
            );
            self.repository
                .replace_page_instances(page_id, remaining.into_instances())
                .await?;
        }
        Ok(())
    }

    /// Validates one locale of an instance. Blocks known to the registry
    /// use the registry schema; others use the blueprint's own fields.
    pub async fn validate_instance(&self, id: &str, locale: Locale) -> AppResult<BlockValidation> {
        let instance = self.require_instance(id).await?;
        let blueprint = self.require_blueprint(instance.blueprint_id()).await?;
        let data = Value::Object(instance.data(locale).clone());

        Ok(match get_block_field_definition(blueprint.name()) {
            Some(definition) => definition.validate_data(&data, locale),
            None => validate_fields(blueprint.fields(), &data, locale),
        })
    }
}

use std::sync::Arc;

use atelier_core::{AppError, AppResult, Locale};
use atelier_domain::{
    BlueprintInstance, BlueprintType, ContentBlueprint, DynamicForm, FieldDefinition, FieldEdit,
    FormSnapshot, MoveDirection, PageComposition,
};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::content_ports::ComposerBackend;


/// Palette filter over blueprint categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,
    /// One named category.
    Category(String),
}

impl CategoryFilter {
    /// Builds a filter from the palette value, where `all` means no filter.
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        if value.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Category(value.to_owned())
        }
    }

    fn matches(&self, blueprint: &ContentBlueprint) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => blueprint.category() == category,
        }
    }
}

#[derive(Debug, Clone)]
struct OpenEditor {
    instance_id: String,
    form: DynamicForm,
}

/// Page builder state: the component palette, the ordered instances of one
/// page and the form of the instance being edited.
pub struct VisualBlockComposer {
    backend: Arc<dyn ComposerBackend>,
    page_id: String,
    locale: Locale,
    blueprints: Vec<ContentBlueprint>,
    composition: PageComposition,
    category_filter: CategoryFilter,
    editor: Option<OpenEditor>,
    loading: bool,
}

impl VisualBlockComposer {
    /// Creates a composer for one page. Nothing is loaded until
    /// [`VisualBlockComposer::load`] runs.
    #[must_use]
    pub fn new(backend: Arc<dyn ComposerBackend>, page_id: impl Into<String>, locale: Locale) -> Self {
        Self {
            backend,
            page_id: page_id.into(),
            locale,
            blueprints: Vec::new(),
            composition: PageComposition::new(),
            category_filter: CategoryFilter::All,
            editor: None,
            loading: true,
        }
    }

    /// Loads the component palette and the page's instances.
    ///
    /// Failures leave the affected list empty and are logged; loading always
    /// completes.
    pub async fn load(&mut self) {
        self.blueprints = match self.backend.load_blueprints().await {
            Ok(blueprints) => blueprints
                .into_iter()
                .filter(|blueprint| blueprint.blueprint_type() == BlueprintType::Component)
                .collect(),
            Err(error) => {
                warn!(page_id = %self.page_id, error = %error, "failed to load blueprints");
                Vec::new()
            }
        };

        let instances = match self.backend.load_instances(&self.page_id).await {
            Ok(instances) => instances,
            Err(error) => {
                warn!(page_id = %self.page_id, error = %error, "failed to load page components");
                Vec::new()
            }
        };
        self.composition = PageComposition::from_instances(self.resolve_blueprints(instances));
        self.editor = None;
        self.loading = false;
    }

    /// Returns whether the initial load is still running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the edited page.
    #[must_use]
    pub fn page_id(&self) -> &str {
        self.page_id.as_str()
    }

    /// Returns the active locale.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Returns every loaded component blueprint.
    #[must_use]
    pub fn blueprints(&self) -> &[ContentBlueprint] {
        &self.blueprints
    }

    /// Returns the distinct blueprint categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for blueprint in &self.blueprints {
            if !categories.contains(&blueprint.category()) {
                categories.push(blueprint.category());
            }
        }
        categories
    }

    /// Sets the palette filter.
    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.category_filter = filter;
    }

    /// Returns the blueprints matching the palette filter.
    #[must_use]
    pub fn palette(&self) -> Vec<&ContentBlueprint> {
        self.blueprints
            .iter()
            .filter(|blueprint| self.category_filter.matches(blueprint))
            .collect()
    }

    /// Returns the instances in render order.
    #[must_use]
    pub fn instances(&self) -> &[BlueprintInstance] {
        self.composition.instances()
    }

    /// Returns the id of the instance open for editing.
    #[must_use]
    pub fn editing_instance_id(&self) -> Option<&str> {
        self.editor
            .as_ref()
            .map(|editor| editor.instance_id.as_str())
    }

    /// Returns the form of the instance open for editing.
    #[must_use]
    pub fn form(&self) -> Option<&DynamicForm> {
        self.editor.as_ref().map(|editor| &editor.form)
    }

    /// Appends a draft instance of a loaded blueprint and opens it.
    pub fn add_instance(&mut self, blueprint_id: &str) -> AppResult<String> {
        let blueprint = self
            .blueprints
            .iter()
            .find(|blueprint| blueprint.id() == blueprint_id)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!("blueprint '{blueprint_id}' is not in the palette"))
            })?;

        let instance = BlueprintInstance::with_temporary_id(blueprint.id())
            .with_page_id(self.page_id.as_str())
            .with_blueprint(blueprint);
        let id = instance.id().to_owned();
        self.composition.push(instance);
        self.open_instance(&id)?;
        Ok(id)
    }

    /// Removes an instance, closing its editor when it was open.
    pub fn remove_instance(&mut self, id: &str) -> AppResult<()> {
        self.composition
            .remove(id)
            .ok_or_else(|| AppError::NotFound(format!("instance '{id}' is not on this page")))?;
        if self.editing_instance_id() == Some(id) {
            self.editor = None;
        }
        Ok(())
    }

    /// Appends a copy of an instance under a fresh temporary id.
    pub fn duplicate_instance(&mut self, id: &str) -> AppResult<String> {
        self.composition.duplicate(id)
    }

    /// Swaps the instance at `index` with its neighbour; edge moves are
    /// ignored.
    pub fn move_instance(&mut self, index: usize, direction: MoveDirection) -> bool {
        self.composition.move_instance(index, direction)
    }

    /// Opens an instance for editing with the active locale's data. The
    /// seeded form data becomes the active locale's payload.
    pub fn open_instance(&mut self, id: &str) -> AppResult<()> {
        let mut seeded = FormSnapshot::default();
        let form = self.seed_form(id, &mut seeded)?;
        self.composition.update_data(id, self.locale, seeded.data)?;
        self.editor = Some(OpenEditor {
            instance_id: id.to_owned(),
            form,
        });
        Ok(())
    }

    /// Closes the editor.
    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Switches the active locale and re-seeds the open form from that
    /// locale's data.
    pub fn set_locale(&mut self, locale: Locale) -> AppResult<()> {
        self.locale = locale;
        if let Some(id) = self.editing_instance_id().map(str::to_owned) {
            self.open_instance(&id)?;
        }
        Ok(())
    }

    /// Applies an edit to the open form and stores the form's data as the
    /// active locale's payload. Returns the form state after the edit.
    pub fn apply_edit(&mut self, edit: FieldEdit) -> AppResult<FormSnapshot> {
        let editor = self
            .editor
            .as_mut()
            .ok_or_else(|| AppError::Validation("no component is open for editing".to_owned()))?;

        let mut snapshot = FormSnapshot::default();
        editor.form.apply(edit, &mut snapshot)?;
        let id = editor.instance_id.clone();
        self.composition
            .update_data(&id, self.locale, snapshot.data.clone())?;
        Ok(snapshot)
    }

    /// Replaces the active locale's payload of an instance. The other
    /// locale is left untouched.
    pub fn update_instance_data(&mut self, id: &str, data: Map<String, Value>) -> AppResult<()> {
        self.composition.update_data(id, self.locale, data)?;
        if self.editing_instance_id() == Some(id) {
            self.open_instance(id)?;
        }
        Ok(())
    }

    /// Sends the ordered list to the backend and adopts the stored list.
    ///
    /// On failure the local list is kept and the error is returned.
    pub async fn save_all(&mut self) -> AppResult<()> {
        let instances = self.composition.instances().to_vec();
        let editing_position = self
            .editing_instance_id()
            .and_then(|id| self.composition.position(id));

        let stored = match self.backend.save_instances(&self.page_id, instances).await {
            Ok(stored) => stored,
            Err(error) => {
                warn!(page_id = %self.page_id, error = %error, "failed to save page components");
                return Err(error);
            }
        };

        self.composition = PageComposition::from_instances(self.resolve_blueprints(stored));
        info!(
            page_id = %self.page_id,
            count = self.composition.len(),
            "page components saved"
        );

        let reopened = editing_position
            .and_then(|position| self.composition.instances().get(position))
            .map(|instance| instance.id().to_owned());
        match reopened {
            Some(id) => {
                if let Some(editor) = self.editor.as_mut() {
                    editor.instance_id = id;
                }
            }
            None => self.editor = None,
        }
        Ok(())
    }

    fn seed_form(&self, id: &str, observer: &mut FormSnapshot) -> AppResult<DynamicForm> {
        let instance = self
            .composition
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("instance '{id}' is not on this page")))?;
        Ok(DynamicForm::new(
            self.fields_for(instance),
            instance.data(self.locale),
            observer,
        ))
    }

    fn fields_for(&self, instance: &BlueprintInstance) -> Vec<FieldDefinition> {
        instance
            .blueprint()
            .or_else(|| {
                self.blueprints
                    .iter()
                    .find(|blueprint| blueprint.id() == instance.blueprint_id())
            })
            .map(|blueprint| blueprint.fields().to_vec())
            .unwrap_or_default()
    }

    fn resolve_blueprints(&self, instances: Vec<BlueprintInstance>) -> Vec<BlueprintInstance> {
        instances
            .into_iter()
            .map(|instance| {
                if instance.blueprint().is_some() {
                    return instance;
                }
                match self
                    .blueprints
                    .iter()
                    .find(|blueprint| blueprint.id() == instance.blueprint_id())
                {
                    Some(blueprint) => instance.with_blueprint(blueprint.clone()),
                    None => instance,
                }
            })
            .collect()
    }
}

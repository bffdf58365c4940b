use async_graphql::{Json, SimpleObject};
use atelier_application::PageComponentsPage;
use atelier_core::Locale;
use atelier_domain::{
    BlockFieldDefinition, BlockValidation, BlueprintInstance, ContentBlueprint, FieldDefinition,
};
use serde_json::{Map, Value};

/// Blueprint as exposed to GraphQL clients.
#[derive(Debug, SimpleObject)]
#[graphql(name = "Blueprint")]
pub struct BlueprintObject {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub blueprint_type: String,
    pub allow_multiple: bool,
    pub is_system: bool,
    pub icon: Option<String>,
    pub category: String,
    pub fields: Json<Vec<FieldDefinition>>,
}

impl From<&ContentBlueprint> for BlueprintObject {
    fn from(blueprint: &ContentBlueprint) -> Self {
        Self {
            id: blueprint.id().to_owned(),
            name: blueprint.name().to_owned(),
            display_name: blueprint.display_name().to_owned(),
            description: blueprint.description().map(str::to_owned),
            blueprint_type: blueprint.blueprint_type().as_str().to_owned(),
            allow_multiple: blueprint.allow_multiple(),
            is_system: blueprint.is_system(),
            icon: blueprint.icon().map(str::to_owned),
            category: blueprint.category().to_owned(),
            fields: Json(blueprint.fields().to_vec()),
        }
    }
}

/// Placed blueprint instance.
#[derive(Debug, SimpleObject)]
#[graphql(name = "BlueprintInstance")]
pub struct InstanceObject {
    pub id: String,
    pub blueprint_id: String,
    pub page_id: Option<String>,
    pub data_en: Json<Map<String, Value>>,
    pub data_ar: Json<Map<String, Value>>,
    pub status: String,
    pub order: usize,
    pub blueprint: Option<BlueprintObject>,
}

impl From<&BlueprintInstance> for InstanceObject {
    fn from(instance: &BlueprintInstance) -> Self {
        Self {
            id: instance.id().to_owned(),
            blueprint_id: instance.blueprint_id().to_owned(),
            page_id: instance.page_id().map(str::to_owned),
            data_en: Json(instance.data(Locale::En).clone()),
            data_ar: Json(instance.data(Locale::Ar).clone()),
            status: instance.status().as_str().to_owned(),
            order: instance.order(),
            blueprint: instance.blueprint().map(BlueprintObject::from),
        }
    }
}

/// Page-local window of projected components.
#[derive(Debug, SimpleObject)]
#[graphql(name = "PageComponentsResponse")]
pub struct PageComponentsObject {
    pub items: Json<Vec<Map<String, Value>>>,
    pub total: usize,
    pub has_more: bool,
}

impl From<PageComponentsPage> for PageComponentsObject {
    fn from(page: PageComponentsPage) -> Self {
        Self {
            items: Json(page.items),
            total: page.total,
            has_more: page.has_more,
        }
    }
}

/// Registry block types of one palette category.
#[derive(Debug, SimpleObject)]
#[graphql(name = "BlockCategory")]
pub struct BlockCategoryObject {
    pub category: String,
    pub blocks: Json<Vec<BlockFieldDefinition>>,
}

/// Validation outcome for block data.
#[derive(Debug, SimpleObject)]
#[graphql(name = "BlockValidation")]
pub struct BlockValidationObject {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl From<BlockValidation> for BlockValidationObject {
    fn from(validation: BlockValidation) -> Self {
        Self {
            valid: validation.valid,
            errors: validation.errors,
        }
    }
}

mod composer_backend;
mod content_inputs;
mod content_repository;

pub use composer_backend::ComposerBackend;
pub use content_inputs::{
    BlueprintFilter, CreateInstanceInput, PageComponentsPage, PageQuery, SaveBlueprintInput,
    UpdateInstanceInput,
};
pub use content_repository::ContentRepository;

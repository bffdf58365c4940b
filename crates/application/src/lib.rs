//! Application services and ports.

#![forbid(unsafe_code)]

mod blueprint_service;
mod content_ports;
mod visual_block_composer;

pub use blueprint_service::BlueprintService;
pub use content_ports::{
    BlueprintFilter, ComposerBackend, ContentRepository, CreateInstanceInput, PageComponentsPage,
    PageQuery, SaveBlueprintInput, UpdateInstanceInput,
};
pub use visual_block_composer::{CategoryFilter, VisualBlockComposer};

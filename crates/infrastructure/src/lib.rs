//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_composer_backend;
mod in_memory_content_repository;
mod postgres_content_repository;

pub use http_composer_backend::HttpComposerBackend;
pub use in_memory_content_repository::InMemoryContentRepository;
pub use postgres_content_repository::PostgresContentRepository;

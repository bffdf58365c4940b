pub mod block_definitions;
pub mod blueprints;
pub mod components;
pub mod graphql;
pub mod health;
pub mod page_components;

//! GraphQL surface over blueprints, block definitions and page components.

use std::str::FromStr;

use async_graphql::{EmptySubscription, ErrorExtensions, Schema};
use atelier_application::BlueprintService;
use atelier_core::{AppError, Locale};

mod mutation;
mod query;
mod types;

#[cfg(test)]
mod tests;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

/// Executable content schema.
pub type ContentSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Query protection limits applied to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphqlLimits {
    pub max_depth: usize,
    pub max_complexity: usize,
}

/// Builds the schema with the blueprint service as resolver context.
pub fn build_schema(service: BlueprintService, limits: GraphqlLimits) -> ContentSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .limit_depth(limits.max_depth)
        .limit_complexity(limits.max_complexity)
        .finish()
}

fn graphql_error(error: AppError) -> async_graphql::Error {
    let code = match &error {
        AppError::Validation(_) => "VALIDATION",
        AppError::NotFound(_) => "NOT_FOUND",
        AppError::Conflict(_) => "CONFLICT",
        AppError::Unavailable(_) => "UNAVAILABLE",
        AppError::Internal(_) => "INTERNAL",
    };

    async_graphql::Error::new(error.to_string()).extend_with(|_, extensions| {
        extensions.set("code", code);
    })
}

fn parse_locale(locale: Option<String>) -> async_graphql::Result<Locale> {
    locale
        .as_deref()
        .map(Locale::from_str)
        .transpose()
        .map(Option::unwrap_or_default)
        .map_err(graphql_error)
}

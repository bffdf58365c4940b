use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;

use crate::state::AppState;

pub async fn graphql_handler(
    State(state): State<AppState>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    state.graphql_schema.execute(request.into_inner()).await.into()
}

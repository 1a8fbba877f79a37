use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    response::{Html, IntoResponse, Response},
    routing::post,
    Extension, Router,
};
use tracing::debug;

use crate::api::graphql::error::status_for;
use crate::api::graphql::resolver::EmailsSchema;

pub const GRAPHQL_PATH: &str = "/graphql";

/// Register the GraphQL endpoint on `router`.
///
/// `POST /graphql` executes requests; `GET /graphql` serves GraphiQL when
/// `enable_playground` is set.
pub fn register_routes(router: Router, schema: EmailsSchema, enable_playground: bool) -> Router {
    let mut endpoint = post(graphql_handler);
    if enable_playground {
        endpoint = endpoint.get(graphiql);
    }

    router
        .route(GRAPHQL_PATH, endpoint)
        .layer(Extension(schema))
}

/// Execute a GraphQL request and surface the first error as the HTTP status.
pub async fn graphql_handler(
    Extension(schema): Extension<EmailsSchema>,
    req: GraphQLRequest,
) -> Response {
    let resp = schema.execute(req.into_inner()).await;
    let status = status_for(&resp);
    if !status.is_success() {
        debug!(status = %status, errors = resp.errors.len(), "GraphQL request failed");
    }
    (status, GraphQLResponse::from(resp)).into_response()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

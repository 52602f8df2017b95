// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! HTTP transport of the blog schema.
//!
//! `POST /graphql` executes a JSON request body. `GET /graphql` executes the request
//! encoded in the query string, or serves the GraphiQL IDE when there is no `query`
//! parameter. Malformed requests are rejected with `400 Bad Request`.
//! `GET /schema.graphql` returns the schema in schema definition language.

mod config;

use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::{FromRequest, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use blog_schema::blog::BlogSchema;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// The rejection type of [`GraphQLRequest`]; not re-exported by `async-graphql-axum` 7.0.2.
type GraphQLRejection = <GraphQLRequest as FromRequest<()>>::Rejection;

pub use self::config::ServiceOptions;

/// The path of the GraphQL endpoint.
pub const GRAPHQL_PATH: &str = "/graphql";

/// The path serving the schema definition language.
pub const SDL_PATH: &str = "/schema.graphql";

#[derive(Clone)]
struct ServiceState {
    schema: Arc<BlogSchema>,
    graphiql: bool,
}

/// Builds the routes of the service.
pub fn router(schema: Arc<BlogSchema>, graphiql: bool) -> Router {
    Router::new()
        .route(GRAPHQL_PATH, get(graphql_get).post(graphql_post))
        .route(SDL_PATH, get(sdl))
        .layer(TraceLayer::new_for_http())
        .with_state(ServiceState { schema, graphiql })
}

async fn graphql_post(
    State(state): State<ServiceState>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    state.schema.execute(request.into_inner()).await.into()
}

/// Tells a GraphiQL page load apart from a query.
#[derive(Debug, Default, Deserialize)]
struct PageParameters {
    query: Option<String>,
}

async fn graphql_get(
    State(state): State<ServiceState>,
    Query(page): Query<PageParameters>,
    request: Result<GraphQLRequest, GraphQLRejection>,
) -> axum::response::Response {
    if page.query.is_none() {
        if state.graphiql {
            return Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish()).into_response();
        }
        return (StatusCode::BAD_REQUEST, "Missing `query` parameter").into_response();
    }

    match request {
        Ok(request) => GraphQLResponse::from(state.schema.execute(request.into_inner()).await)
            .into_response(),
        Err(rejection) => {
            warn!(error = %rejection.0, "Rejected malformed request");
            rejection.into_response()
        }
    }
}

async fn sdl(State(state): State<ServiceState>) -> String {
    state.schema.sdl()
}

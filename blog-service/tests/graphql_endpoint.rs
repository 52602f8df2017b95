// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Requests to the HTTP routes of the service, driven in-process.

use std::sync::Arc;

use axum::{body::Body, Router};
use blog_base::{Store, TestClock};
use blog_schema::blog::blog_schema;
use blog_service::router;
use http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt as _;

const RELEASE_POST: &str = "0be4bea0330ccb5ecf781a9f69a64bc8";

fn app(graphiql: bool) -> Router {
    let store = Store::with_seed_data(Arc::new(TestClock::default()));
    let schema = blog_schema(Arc::new(store)).unwrap();
    router(Arc::new(schema), graphiql)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_str(&body).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

fn encode(text: &str) -> String {
    text.bytes()
        .map(|byte| match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' => char::from(byte).to_string(),
            _ => format!("%{byte:02X}"),
        })
        .collect()
}

#[tokio::test]
async fn post_query() {
    let body = json!({ "query": format!(r#"{{ post(id: "{RELEASE_POST}") {{ title author {{ id }} }} }}"#) });

    let (status, response) = post_json(app(true), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response,
        json!({ "data": { "post": { "title": "Swift 3.0 Released!", "author": { "id": "tkremenek" } } } })
    );
}

#[tokio::test]
async fn post_mutation_with_variables() {
    let body = json!({
        "query": "mutation Create($id: String!) { createAuthor(id: $id, name: \"Someone\") { id } }",
        "operationName": "Create",
        "variables": { "id": "seabaylea" },
    });

    let (status, response) = post_json(app(true), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["data"], json!(null));
    assert_eq!(response["errors"][0]["extensions"]["code"], json!("AUTHOR_ALREADY_EXISTS"));
}

#[tokio::test]
async fn get_query() {
    let query = encode("query Post($id: String!) { post(id: $id) { title } }");
    let variables = encode(&json!({ "id": RELEASE_POST }).to_string());
    let uri = format!("/graphql?query={query}&operationName=Post&variables={variables}");

    let (status, body) = get(app(true), &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "data": { "post": { "title": "Swift 3.0 Released!" } } })
    );
}

#[tokio::test]
async fn get_with_malformed_variables() {
    let uri = format!("/graphql?query={}&variables={}", encode("{ authors { id } }"), encode("{id"));

    let (status, _) = get(app(true), &uri).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn post_with_malformed_body() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ \"query\": "))
        .unwrap();

    let (status, _) = send(app(true), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn graphiql_page() {
    let (status, body) = get(app(true), "/graphql").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.to_lowercase().contains("graphiql"));

    let (status, _) = get(app(false), "/graphql").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn request_errors_are_reported_in_the_body() {
    let (status, response) = post_json(app(true), json!({ "query": "{ posts { id }" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["data"], json!(null));
    assert!(!response["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn schema_definition_language() {
    let (status, body) = get(app(true), "/schema.graphql").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("type Post implements HasAuthor {"));
    assert!(body.contains("  contributions(\n"));
}

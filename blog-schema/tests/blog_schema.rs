// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Queries and mutations against the blog schema over the seed data.

use std::sync::Arc;

use blog_base::{Store, TestClock};
use blog_schema::{
    blog::{blog_schema, BlogSchema},
    Request, Response, Variables,
};
use chrono::{DateTime, Duration};
use serde_json::{json, Value};
use test_case::test_case;

const SERVER_POST: &str = "0176413761b289e6d64c2c14a758c1c7";
const OPTIMIZATION_POST: &str = "03390abb5570ce03ae524397d215713b";
const RELEASE_POST: &str = "0be4bea0330ccb5ecf781a9f69a64bc8";
const SEED_TIMESTAMP: i64 = 1_475_000_000;

struct Blog {
    schema: BlogSchema,
    store: Arc<Store>,
    clock: Arc<TestClock>,
}

impl Blog {
    fn new() -> Self {
        let seed_date = DateTime::from_timestamp(SEED_TIMESTAMP, 0).unwrap();
        let clock = Arc::new(TestClock::new(seed_date));
        let store = Arc::new(Store::with_seed_data(clock.clone()));
        let schema = blog_schema(store.clone()).unwrap();
        Blog {
            schema,
            store,
            clock,
        }
    }

    async fn execute(&self, request: impl Into<Request>) -> Response {
        self.schema.execute(request).await
    }

    async fn data(&self, request: impl Into<Request>) -> Value {
        let response = self.execute(request).await;
        assert!(response.errors.is_empty(), "unexpected errors: {:?}", response.errors);
        serde_json::to_value(response.data).unwrap()
    }
}

fn json_of(response: &Response) -> Value {
    serde_json::to_value(response).unwrap()
}

fn post_ids(posts: &Value) -> Vec<&str> {
    posts
        .as_array()
        .unwrap()
        .iter()
        .map(|post| post["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn post_by_id() {
    let blog = Blog::new();

    let data = blog.data(format!(
        r#"{{ post(id: "{RELEASE_POST}") {{ title category author {{ id name twitterHandle }} }} }}"#
    )).await;

    assert_eq!(
        data,
        json!({
            "post": {
                "title": "Swift 3.0 Released!",
                "category": "RELEASE",
                "author": { "id": "tkremenek", "name": "Ted Kremenek", "twitterHandle": "@tkremenek" },
            }
        })
    );
}

#[tokio::test]
async fn unknown_post_and_author_are_null() {
    let blog = Blog::new();

    let data = blog.data(r#"{ post(id: "missing") { id } author(id: "missing") { id } }"#).await;

    assert_eq!(data, json!({ "post": null, "author": null }));
}

#[tokio::test]
async fn create_post_with_unknown_author() {
    let blog = Blog::new();

    let response = blog.execute(
        r#"mutation { createPost(id: "X", title: "T", content: "C", author: "nope") { id } }"#,
    ).await;

    assert_eq!(
        json_of(&response),
        json!({
            "data": null,
            "errors": [{
                "message": "No such author: nope",
                "locations": [{ "line": 1, "column": 12 }],
                "path": ["createPost"],
                "extensions": { "code": "NO_SUCH_AUTHOR" },
            }],
        })
    );
    assert_eq!(blog.store.post_count(), 3);
    assert_eq!(blog.data(r#"{ post(id: "X") { id } }"#).await, json!({ "post": null }));
}

#[tokio::test]
async fn create_post_with_existing_id() {
    let blog = Blog::new();

    let response = blog.execute(format!(
        r#"mutation {{ createPost(id: "{SERVER_POST}", title: "T", content: "C", author: "seabaylea") {{ id }} }}"#
    )).await;

    assert_eq!(
        json_of(&response)["errors"][0]["extensions"]["code"],
        json!("POST_ALREADY_EXISTS")
    );
    assert_eq!(blog.store.post_count(), 3);
}

#[tokio::test]
async fn create_author_twice() {
    let blog = Blog::new();
    let mutation = r#"mutation { createAuthor(id: "seabaylea", name: "Someone else") { id } }"#;

    let response = blog.execute(mutation).await;

    let response = json_of(&response);
    assert_eq!(response["data"], json!(null));
    assert_eq!(response["errors"][0]["message"], json!("Author already exists: seabaylea"));
    assert_eq!(response["errors"][0]["extensions"]["code"], json!("AUTHOR_ALREADY_EXISTS"));
    assert_eq!(blog.store.author_count(), 3);
    assert_eq!(blog.store.author("seabaylea").unwrap().name, "Chris Bailey");
}

#[tokio::test]
async fn create_author_then_post() {
    let blog = Blog::new();

    let data = blog.data(
        r#"mutation {
            createAuthor(id: "jdoe", name: "Jane Doe", twitterHandle: "@jdoe") { id name twitterHandle }
        }"#,
    ).await;
    assert_eq!(
        data,
        json!({ "createAuthor": { "id": "jdoe", "name": "Jane Doe", "twitterHandle": "@jdoe" } })
    );

    blog.clock.advance(Duration::seconds(60));
    let content = "x".repeat(150);
    let request = Request::new(
        r#"mutation ($content: String!) {
            createPost(id: "new", title: "New", content: $content, category: SERVER, author: "jdoe") {
                id summary category timestamp author { name }
            }
        }"#,
    )
    .variables(Variables::from_json(json!({ "content": content })));

    let data = blog.data(request).await;
    assert_eq!(
        data,
        json!({
            "createPost": {
                "id": "new",
                "summary": "x".repeat(100),
                "category": "SERVER",
                "timestamp": 1_475_000_060.0,
                "author": { "name": "Jane Doe" },
            }
        })
    );
    assert_eq!(blog.store.post("new").unwrap().content, content);
}

#[tokio::test]
async fn explicit_summary_is_kept() {
    let blog = Blog::new();

    let data = blog.data(
        r#"mutation { createPost(id: "s", title: "S", content: "Body", summary: "Short", author: "eeckstein") { summary category } }"#,
    ).await;

    assert_eq!(data, json!({ "createPost": { "summary": "Short", "category": null } }));
}

#[test_case("RELEASE", &[RELEASE_POST])]
#[test_case("SERVER", &[SERVER_POST])]
#[test_case("OPTIMIZATION", &[OPTIMIZATION_POST])]
#[tokio::test]
async fn posts_by_category(category: &str, expected: &[&str]) {
    let blog = Blog::new();

    let data = blog.data(format!("{{ posts(category: {category}) {{ id }} }}")).await;
    assert_eq!(post_ids(&data["posts"]), expected);

    let request = Request::new("query ($category: Category) { posts(category: $category) { id } }")
        .variables(Variables::from_json(json!({ "category": category })));
    let data = blog.data(request).await;
    assert_eq!(post_ids(&data["posts"]), expected);
}

#[tokio::test]
async fn posts_keep_table_order() {
    let blog = Blog::new();
    blog.data(
        r#"mutation { createPost(id: "late", title: "Late", content: "C", category: RELEASE, author: "tkremenek") { id } }"#,
    ).await;

    let data = blog.data("{ all: posts { id } releases: posts(category: RELEASE) { id } }").await;

    assert_eq!(
        post_ids(&data["all"]),
        [SERVER_POST, OPTIMIZATION_POST, RELEASE_POST, "late"]
    );
    assert_eq!(post_ids(&data["releases"]), [RELEASE_POST, "late"]);
}

#[tokio::test]
async fn invalid_category() {
    let blog = Blog::new();

    let response = json_of(&blog.execute(r#"{ posts(category: "DRAFT") { id } }"#).await);

    assert_eq!(response["data"], json!(null));
    let message = response["errors"][0]["message"].as_str().unwrap();
    assert!(message.contains("DRAFT"), "unexpected message: {message}");
}

#[tokio::test]
async fn mutations_run_in_order() {
    let blog = Blog::new();

    let response = json_of(
        &blog
            .execute(
                r#"mutation {
                    createAuthor(id: "jdoe", name: "Jane Doe") { id }
                    again: createAuthor(id: "jdoe", name: "Jane Doe") { id }
                }"#,
            )
            .await,
    );

    // The second creation fails, and `createAuthor` can't be null.
    assert_eq!(response["data"], json!(null));
    assert_eq!(response["errors"][0]["path"], json!(["again"]));
    assert_eq!(response["errors"][0]["extensions"]["code"], json!("AUTHOR_ALREADY_EXISTS"));
    assert_eq!(blog.store.author_count(), 4);
}

#[tokio::test]
async fn self_referencing_fragments_are_rejected() {
    let blog = Blog::new();

    let response = json_of(
        &blog
            .execute(
                "{ posts { comments(limit: -1) { ...R } } } fragment R on Comment { id replies { ...R } }",
            )
            .await,
    );

    assert_eq!(response["data"], json!(null));
    assert!(!response["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn deeply_nested_replies_are_rejected() {
    let blog = Blog::new();
    let nested = (0..40).fold("id".to_owned(), |inner, _| format!("replies {{ {inner} }}"));

    let response = json_of(
        &blog
            .execute(format!("{{ posts {{ comments(limit: -1) {{ {nested} }} }} }}"))
            .await,
    );

    assert_eq!(response["data"], json!(null));
    assert!(!response["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn latest_and_recent_posts_follow_ascending_date_order() {
    let blog = Blog::new();
    blog.clock.advance(Duration::days(1));
    blog.data(
        r#"mutation { createPost(id: "newest", title: "N", content: "C", author: "eeckstein") { id } }"#,
    ).await;

    let data = blog.data(
        "{ latestPost { id } two: recentPosts(count: 2) { id } all: recentPosts(count: 10) { id } }",
    ).await;

    // Seed posts share a date and keep their table order.
    assert_eq!(data["latestPost"]["id"], json!(SERVER_POST));
    assert_eq!(post_ids(&data["two"]), [SERVER_POST, OPTIMIZATION_POST]);
    assert_eq!(
        post_ids(&data["all"]),
        [SERVER_POST, OPTIMIZATION_POST, RELEASE_POST, "newest"]
    );
}

#[test_case(0 ; "zero")]
#[test_case(-1 ; "negative")]
#[tokio::test]
async fn recent_posts_without_a_positive_count(count: i32) {
    let blog = Blog::new();

    let data = blog.data(format!("{{ recentPosts(count: {count}) {{ id }} }}")).await;

    assert_eq!(data, json!({ "recentPosts": [] }));
}

#[tokio::test]
async fn latest_post_of_an_empty_store() {
    let store = Arc::new(Store::new(Arc::new(TestClock::default())));
    let schema = blog_schema(store).unwrap();

    let response = schema.execute("{ latestPost { id } posts { id } authors { id } }").await;

    assert_eq!(
        serde_json::to_value(response.data).unwrap(),
        json!({ "latestPost": null, "posts": [], "authors": [] })
    );
}

#[test_case(0, 0)]
#[test_case(1, 1)]
#[test_case(5, 2 ; "limit above the comment count")]
#[test_case(-1, 2 ; "negative limit returns everything")]
#[tokio::test]
async fn comments_limit(limit: i32, expected: usize) {
    let blog = Blog::new();

    let data = blog.data(format!(
        r#"{{ post(id: "{SERVER_POST}") {{ comments(limit: {limit}) {{ id content }} }} }}"#
    )).await;

    assert_eq!(data["post"]["comments"].as_array().unwrap().len(), expected);
}

#[tokio::test]
async fn comments_and_replies() {
    let blog = Blog::new();

    let data = blog.data(format!(
        r#"{{ post(id: "{SERVER_POST}") {{
            comments(limit: -1) {{ content timestamp author {{ id }} replies {{ content author {{ id }} }} }}
        }} }}"#
    )).await;

    let replies = json!([
        { "content": "Thank You!", "author": { "id": "eeckstein" } },
        { "content": "If you need more information, just contact me.", "author": { "id": "eeckstein" } },
    ]);
    assert_eq!(
        data["post"]["comments"],
        json!([
            {
                "content": "This is a very good blog post",
                "timestamp": null,
                "author": { "id": "tkremenek" },
                "replies": replies,
            },
            {
                "content": "Keep up the good work",
                "timestamp": null,
                "author": { "id": "seabaylea" },
                "replies": replies,
            },
        ])
    );
}

#[tokio::test]
async fn contributions_dispatch_to_concrete_types() {
    let blog = Blog::new();

    let data = blog.data(
        r#"{ contributions(author: "eeckstein") {
            __typename
            author { id }
            ... on Post { id title }
            ... on Comment { content }
        } }"#,
    ).await;

    assert_eq!(
        data,
        json!({
            "contributions": [
                {
                    "__typename": "Post",
                    "author": { "id": "eeckstein" },
                    "id": OPTIMIZATION_POST,
                    "title": "Whole-Module Optimization in Swift 3",
                },
                {
                    "__typename": "Comment",
                    "author": { "id": "eeckstein" },
                    "content": "Thank You!",
                },
                {
                    "__typename": "Comment",
                    "author": { "id": "eeckstein" },
                    "content": "If you need more information, just contact me.",
                },
            ]
        })
    );
}

#[tokio::test]
async fn post_fields_are_not_resolved_on_comments() {
    let blog = Blog::new();

    let data = blog.data(
        r#"{ contributions(author: "tkremenek") { ... on Post { title } ... on Comment { content } } }"#,
    ).await;

    assert_eq!(
        data,
        json!({
            "contributions": [
                { "title": "Swift 3.0 Released!" },
                { "content": "This is a very good blog post" },
            ]
        })
    );
}

#[tokio::test]
async fn timestamps() {
    let blog = Blog::new();

    let data = blog.data(format!(r#"{{ post(id: "{SERVER_POST}") {{ timestamp }} }}"#)).await;

    assert_eq!(data, json!({ "post": { "timestamp": 1_475_000_000.0 } }));
}

#[tokio::test]
async fn sdl_lists_the_blog_types() {
    let blog = Blog::new();

    let sdl = blog.schema.sdl();

    for expected in [
        "enum Category {\n  SERVER\n  OPTIMIZATION\n  RELEASE\n}",
        "interface HasAuthor {\n  author: Author!\n}",
        "type Comment implements HasAuthor {",
        "type Post implements HasAuthor {",
        "  createPost(\n    id: String!\n    title: String!\n    content: String!\n    summary: String\n    category: Category\n    \"\"\"\n    Id of the author\n    \"\"\"\n    author: String!\n  ): Post!",
        "  recentPosts(\n    \"\"\"\n    Number of recent items\n    \"\"\"\n    count: Int!\n  ): [Post!]!",
        "schema {\n  query: BlogSchema\n  mutation: BlogMutations\n}",
    ] {
        assert!(sdl.contains(expected), "missing {expected:?} in:\n{sdl}");
    }
}

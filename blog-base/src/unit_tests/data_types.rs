// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use assert_matches::assert_matches;
use chrono::{DateTime, TimeZone, Utc};
use test_case::test_case;

use super::*;

/// Test that every category goes to its wire name and back.
#[test_case(Category::Server, "SERVER"; "server")]
#[test_case(Category::Optimization, "OPTIMIZATION"; "optimization")]
#[test_case(Category::Release, "RELEASE"; "release")]
fn category_wire_name_round_trip(category: Category, wire_name: &str) {
    assert_eq!(category.wire_name(), wire_name);
    assert_eq!(category.to_string(), wire_name);
    assert_eq!(wire_name.parse::<Category>(), Ok(category));

    let json = serde_json::to_value(category).unwrap();
    assert_eq!(json, serde_json::json!(wire_name));
    assert_eq!(serde_json::from_value::<Category>(json).unwrap(), category);
}

/// Test that names which are not wire names are rejected.
#[test_case("server"; "lowercase")]
#[test_case("server-side-swift"; "slug")]
#[test_case(""; "empty")]
#[test_case("DRAFT"; "unknown")]
fn category_rejects_unknown_names(name: &str) {
    assert_matches!(
        name.parse::<Category>(),
        Err(UnknownCategory(rejected)) if rejected == name
    );
    assert!(serde_json::from_value::<Category>(serde_json::json!(name)).is_err());
}

#[test]
fn category_slugs() {
    let slugs = Category::ALL.map(|category| category.slug());
    assert_eq!(slugs, ["server-side-swift", "optimization", "release"]);
}

fn new_post(content: String, summary: Option<&str>) -> NewPost {
    NewPost {
        id: "post".to_owned(),
        title: "Title".to_owned(),
        content,
        summary: summary.map(str::to_owned),
        category: None,
        author: "author".to_owned(),
    }
}

/// Test that a missing summary is the content cut at 100 characters.
#[test_case(0; "empty content")]
#[test_case(99; "shorter content")]
#[test_case(100; "exact length content")]
#[test_case(250; "longer content")]
fn default_summary_is_content_prefix(length: usize) {
    let content = "abcdefghij".repeat(30)[..length].to_owned();
    let post = new_post(content.clone(), None).into_post(DateTime::<Utc>::UNIX_EPOCH);

    if length >= SUMMARY_LENGTH {
        assert_eq!(post.summary, content[..SUMMARY_LENGTH]);
    } else {
        assert_eq!(post.summary, content);
    }
}

#[test]
fn default_summary_counts_characters_not_bytes() {
    let content = "é".repeat(150);
    let post = new_post(content, None).into_post(DateTime::<Utc>::UNIX_EPOCH);

    assert_eq!(post.summary.chars().count(), SUMMARY_LENGTH);
    assert_eq!(post.summary, "é".repeat(SUMMARY_LENGTH));

    // An `e` followed by a combining acute accent is one user-perceived character.
    let content = "e\u{301}".repeat(150);
    let post = new_post(content, None).into_post(DateTime::<Utc>::UNIX_EPOCH);

    assert_eq!(post.summary.graphemes(true).count(), SUMMARY_LENGTH);
    assert_eq!(post.summary.chars().count(), 2 * SUMMARY_LENGTH);
    assert_eq!(post.summary, "e\u{301}".repeat(SUMMARY_LENGTH));
}

#[test]
fn explicit_summary_is_kept() {
    let post = new_post("x".repeat(200), Some("short")).into_post(DateTime::<Utc>::UNIX_EPOCH);
    assert_eq!(post.summary, "short");
}

#[test]
fn timestamp_is_seconds_since_epoch() {
    let date = Utc.timestamp_opt(1_475_000_000, 500_000_000).unwrap();
    let post = new_post("content".to_owned(), None).into_post(date);

    assert_eq!(post.date, date);
    assert_eq!(post.timestamp(), 1_475_000_000.5);
}

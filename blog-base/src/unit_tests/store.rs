// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::{sync::Arc, thread};

use assert_matches::assert_matches;
use chrono::{DateTime, Duration, Utc};

use super::*;
use crate::{clock::TestClock, data_types::Category};

fn seeded_store() -> (Store, Arc<TestClock>) {
    let clock = Arc::new(TestClock::default());
    (Store::with_seed_data(clock.clone()), clock)
}

fn author(id: &str) -> Author {
    Author {
        id: id.to_owned(),
        name: format!("Name of {id}"),
        twitter_handle: None,
    }
}

fn new_post(id: &str, author: &str) -> NewPost {
    NewPost {
        id: id.to_owned(),
        title: "T".to_owned(),
        content: "C".to_owned(),
        author: author.to_owned(),
        ..NewPost::default()
    }
}

#[test]
fn seed_data() {
    let (store, _) = seeded_store();

    let author_ids = store
        .authors()
        .into_iter()
        .map(|author| author.id)
        .collect::<Vec<_>>();
    assert_eq!(author_ids, ["eeckstein", "seabaylea", "tkremenek"]);

    let posts = store.posts();
    let post_ids = posts.iter().map(|post| post.id.as_str()).collect::<Vec<_>>();
    assert_eq!(
        post_ids,
        [
            "0176413761b289e6d64c2c14a758c1c7",
            "03390abb5570ce03ae524397d215713b",
            "0be4bea0330ccb5ecf781a9f69a64bc8",
        ]
    );
    let categories = posts.iter().map(|post| post.category).collect::<Vec<_>>();
    assert_eq!(
        categories,
        [
            Some(Category::Server),
            Some(Category::Optimization),
            Some(Category::Release)
        ]
    );

    let release = store.post("0be4bea0330ccb5ecf781a9f69a64bc8").unwrap();
    assert_eq!(release.title, "Swift 3.0 Released!");
    assert_eq!(release.author, "tkremenek");

    assert_eq!(store.comments().len(), 2);
    assert_eq!(store.replies().len(), 2);
    assert!(store
        .replies()
        .iter()
        .all(|reply| reply.author == "eeckstein"));
}

#[test]
fn seed_foreign_keys_resolve() {
    let (store, _) = seeded_store();

    for post in store.posts() {
        assert!(store.author(&post.author).is_some(), "{}", post.author);
    }
    for comment in store.comments().iter().chain(store.replies()) {
        assert!(store.author(&comment.author).is_some(), "{}", comment.author);
    }
}

#[test]
fn empty_store() {
    let store = Store::new(Arc::new(TestClock::default()));

    assert_eq!(store.author_count(), 0);
    assert_eq!(store.post_count(), 0);
    assert!(store.comments().is_empty());
    assert!(store.replies().is_empty());
    assert_eq!(store.post("0be4bea0330ccb5ecf781a9f69a64bc8"), None);
}

#[test]
fn create_author() {
    let (store, _) = seeded_store();

    let created = store.create_author(author("lattner")).unwrap();

    assert_eq!(created, author("lattner"));
    assert_eq!(store.author("lattner"), Some(created));
    assert_eq!(store.author_count(), 4);
}

#[test]
fn duplicate_author_is_rejected_without_changes() {
    let (store, _) = seeded_store();
    let before = store.authors();

    let result = store.create_author(author("seabaylea"));

    assert_matches!(result, Err(BlogError::AuthorAlreadyExists(id)) if id == "seabaylea");
    assert_eq!(store.authors(), before);
    assert_eq!(store.author("seabaylea").unwrap().name, "Chris Bailey");
}

#[test]
fn author_ids_stay_unique() {
    let store = Store::new(Arc::new(TestClock::default()));

    for id in ["a", "b", "a", "c", "b", "a"] {
        let _ = store.create_author(author(id));
    }

    let ids = store
        .authors()
        .into_iter()
        .map(|author| author.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, ["a", "b", "c"]);
}

#[test]
fn create_post_uses_clock() {
    let (store, clock) = seeded_store();
    let date = DateTime::<Utc>::UNIX_EPOCH + Duration::days(365);
    clock.set(date);

    let post = store.create_post(new_post("X", "eeckstein")).unwrap();

    assert_eq!(post.date, date);
    assert_eq!(post.summary, "C");
    assert_eq!(store.post("X"), Some(post.clone()));
    assert_eq!(store.posts().last(), Some(&post));
}

#[test]
fn post_by_unknown_author_is_rejected_without_changes() {
    let (store, _) = seeded_store();

    let result = store.create_post(new_post("X", "nope"));

    assert_matches!(result, Err(BlogError::NoSuchAuthor(id)) if id == "nope");
    assert_eq!(store.post_count(), 3);
    assert_eq!(store.post("X"), None);
}

#[test]
fn duplicate_post_is_rejected_without_changes() {
    let (store, _) = seeded_store();
    let before = store.posts();

    let result = store.create_post(new_post("0176413761b289e6d64c2c14a758c1c7", "eeckstein"));

    assert_matches!(
        result,
        Err(BlogError::PostAlreadyExists(id)) if id == "0176413761b289e6d64c2c14a758c1c7"
    );
    assert_eq!(store.posts(), before);
}

#[test]
fn duplicate_post_is_reported_before_unknown_author() {
    let (store, _) = seeded_store();

    let result = store.create_post(new_post("0176413761b289e6d64c2c14a758c1c7", "nope"));

    assert_matches!(result, Err(BlogError::PostAlreadyExists(_)));
}

#[test]
fn concurrent_creations_keep_ids_unique() {
    let store = Store::new(Arc::new(TestClock::default()));
    store.create_author(author("writer")).unwrap();

    let (authors_created, posts_created) = thread::scope(|scope| {
        let tasks = (0..16)
            .map(|_| {
                scope.spawn(|| {
                    (
                        store.create_author(author("racer")).is_ok(),
                        store.create_post(new_post("race", "writer")).is_ok(),
                    )
                })
            })
            .collect::<Vec<_>>();

        tasks
            .into_iter()
            .map(|task| task.join().unwrap())
            .fold((0, 0), |(authors, posts), (author, post)| {
                (authors + usize::from(author), posts + usize::from(post))
            })
    });

    assert_eq!(authors_created, 1);
    assert_eq!(posts_created, 1);
    assert_eq!(store.author_count(), 2);
    assert_eq!(store.post_count(), 1);
}

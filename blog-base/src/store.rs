// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The in-memory tables of the blog.

#[cfg(test)]
#[path = "unit_tests/store.rs"]
mod tests;

use std::{
    collections::BTreeMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use tracing::{debug, info};

use crate::{
    clock::Clock,
    data_types::{Author, Comment, NewPost, Post},
    error::BlogError,
    seed,
};

/// The in-memory tables of authors and posts, plus the fixed comment and reply lists.
///
/// The tables only grow. Both tables sit behind a single lock, so that every creation
/// checks its invariants and inserts its record without any other write interleaving.
pub struct Store {
    tables: RwLock<Tables>,
    comments: Vec<Comment>,
    replies: Vec<Comment>,
    clock: Arc<dyn Clock>,
}

#[derive(Default)]
struct Tables {
    authors: BTreeMap<String, Author>,
    posts: Vec<Post>,
}

impl Store {
    /// Creates an empty [`Store`] dating new posts with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Store {
            tables: RwLock::new(Tables::default()),
            comments: Vec::new(),
            replies: Vec::new(),
            clock,
        }
    }

    /// Creates a [`Store`] populated with the seed authors, posts, comments and replies.
    ///
    /// Seed posts are all dated at the clock's current time.
    pub fn with_seed_data(clock: Arc<dyn Clock>) -> Self {
        let date = clock.now();
        let tables = Tables {
            authors: seed::authors()
                .into_iter()
                .map(|author| (author.id.clone(), author))
                .collect(),
            posts: seed::posts(date),
        };
        Store {
            tables: RwLock::new(tables),
            comments: seed::comments(),
            replies: seed::replies(),
            clock,
        }
    }

    /// Returns every author, ordered by ID.
    pub fn authors(&self) -> Vec<Author> {
        self.read_tables().authors.values().cloned().collect()
    }

    /// Returns the author with the ID `id`, if registered.
    pub fn author(&self, id: &str) -> Option<Author> {
        self.read_tables().authors.get(id).cloned()
    }

    /// Returns the number of registered authors.
    pub fn author_count(&self) -> usize {
        self.read_tables().authors.len()
    }

    /// Returns every post, in insertion order.
    pub fn posts(&self) -> Vec<Post> {
        self.read_tables().posts.clone()
    }

    /// Returns the post with the ID `id`, if stored.
    pub fn post(&self, id: &str) -> Option<Post> {
        self.read_tables()
            .posts
            .iter()
            .find(|post| post.id == id)
            .cloned()
    }

    /// Returns the number of stored posts.
    pub fn post_count(&self) -> usize {
        self.read_tables().posts.len()
    }

    /// Returns the fixed list of comments shown under every post.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns the fixed list of replies shown under every comment.
    pub fn replies(&self) -> &[Comment] {
        &self.replies
    }

    /// Publishes a new post, dated at the current time of the store's clock.
    ///
    /// Fails without touching the tables if the post ID is taken or the author is not
    /// registered.
    pub fn create_post(&self, new_post: NewPost) -> Result<Post, BlogError> {
        let mut tables = self.write_tables();

        if tables.posts.iter().any(|post| post.id == new_post.id) {
            debug!(post = %new_post.id, "Rejecting duplicate post");
            return Err(BlogError::PostAlreadyExists(new_post.id));
        }
        if !tables.authors.contains_key(&new_post.author) {
            debug!(author = %new_post.author, "Rejecting post by unknown author");
            return Err(BlogError::NoSuchAuthor(new_post.author));
        }

        let post = new_post.into_post(self.clock.now());
        tables.posts.push(post.clone());
        info!(post = %post.id, author = %post.author, "Created post");
        Ok(post)
    }

    /// Registers a new author.
    ///
    /// Fails without touching the tables if the author ID is taken.
    pub fn create_author(&self, author: Author) -> Result<Author, BlogError> {
        let mut tables = self.write_tables();

        if tables.authors.contains_key(&author.id) {
            debug!(author = %author.id, "Rejecting duplicate author");
            return Err(BlogError::AuthorAlreadyExists(author.id));
        }

        tables.authors.insert(author.id.clone(), author.clone());
        info!(author = %author.id, "Created author");
        Ok(author)
    }

    fn read_tables(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_tables(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

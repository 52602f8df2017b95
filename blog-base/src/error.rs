// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Errors raised by the store and when parsing category names.

use thiserror::Error;

/// Errors raised by the [`Store`](crate::Store) when an operation would break one of its
/// invariants, or when a foreign key does not resolve.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum BlogError {
    /// A post with the same ID is already stored.
    #[error("Post already exists: {0}")]
    PostAlreadyExists(String),

    /// The referenced author is not registered.
    #[error("No such author: {0}")]
    NoSuchAuthor(String),

    /// An author with the same ID is already registered.
    #[error("Author already exists: {0}")]
    AuthorAlreadyExists(String),
}

/// A string that is not the wire name of any [`Category`](crate::Category).
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

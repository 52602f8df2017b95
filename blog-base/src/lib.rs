// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Base definitions of the blog service: the records it keeps, the in-memory [`Store`]
//! holding them, and the errors raised when a write would break the store's invariants.

#![deny(missing_docs)]

pub mod clock;
pub mod data_types;
pub mod error;
mod seed;
pub mod store;

pub use self::{
    clock::{Clock, SystemClock},
    data_types::{Author, Category, Comment, NewPost, Post},
    error::{BlogError, UnknownCategory},
    store::Store,
};

#[cfg(any(test, feature = "test"))]
pub use self::clock::TestClock;

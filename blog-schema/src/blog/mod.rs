// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The schema of the blog: its types, the query root `BlogSchema` and the mutation root
//! `BlogMutations`, resolved against a [`Store`].

mod mutation;
mod query;
mod types;

use std::sync::Arc;

use blog_base::{Author, Comment, Post, Store};

use crate::{
    error::{FieldError, SchemaError},
    executor::Schema,
    registry::Registry,
    value::{Node, Value},
};

pub use self::{
    mutation::MUTATION_TYPE,
    query::QUERY_TYPE,
    types::{AUTHOR, CATEGORY, COMMENT, HAS_AUTHOR, POST},
};

/// The values the fields of the blog schema are resolved on.
#[derive(Clone, Debug, PartialEq)]
pub enum BlogNode {
    /// The value of the root operation types.
    Root,
    /// A value of the `Author` type.
    Author(Author),
    /// A value of the `Post` type.
    Post(Post),
    /// A value of the `Comment` type, top-level or reply.
    Comment(Comment),
}

impl BlogNode {
    fn kind(&self) -> &'static str {
        self.type_name().unwrap_or("root")
    }

    fn as_post(&self) -> Result<&Post, FieldError> {
        match self {
            BlogNode::Post(post) => Ok(post),
            other => Err(FieldError::TypeMismatch {
                expected: POST.to_owned(),
                found: other.kind().to_owned(),
            }),
        }
    }

    fn as_comment(&self) -> Result<&Comment, FieldError> {
        match self {
            BlogNode::Comment(comment) => Ok(comment),
            other => Err(FieldError::TypeMismatch {
                expected: COMMENT.to_owned(),
                found: other.kind().to_owned(),
            }),
        }
    }
}

impl Node for BlogNode {
    fn type_name(&self) -> Option<&'static str> {
        match self {
            BlogNode::Root => None,
            BlogNode::Author(_) => Some(AUTHOR),
            BlogNode::Post(_) => Some(POST),
            BlogNode::Comment(_) => Some(COMMENT),
        }
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        let record = match self {
            BlogNode::Root => return None,
            BlogNode::Author(author) => async_graphql::to_value(author),
            BlogNode::Post(post) => async_graphql::to_value(post),
            BlogNode::Comment(comment) => async_graphql::to_value(comment),
        };
        match record.ok()? {
            Value::Object(mut attributes) => attributes.swap_remove(name),
            _ => None,
        }
    }
}

/// The executable schema of the blog.
pub type BlogSchema = Schema<BlogNode>;

/// Builds the schema of the blog, resolving fields against `store`.
pub fn blog_schema(store: Arc<Store>) -> Result<BlogSchema, SchemaError> {
    let mut builder = Registry::builder(QUERY_TYPE);
    builder.mutation(MUTATION_TYPE);
    builder
        .register(types::category())?
        .register(types::author())?
        .register(types::has_author())?
        .register(types::comment(&store))?
        .register(types::post(&store))?
        .register(query::query_root(&store))?
        .register(mutation::mutation_root(&store))?;

    Schema::new(builder.finish()?, BlogNode::Root)
}

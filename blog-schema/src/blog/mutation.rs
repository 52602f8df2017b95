// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use blog_base::{Author, NewPost, Store};

use super::{
    types::{parse_category, AUTHOR, CATEGORY, POST},
    BlogNode,
};
use crate::{
    registry::{ArgumentSpec, Field, ObjectType, TypeRef},
    value::FieldValue,
};

pub const MUTATION_TYPE: &str = "BlogMutations";

pub(super) fn mutation_root(store: &Arc<Store>) -> ObjectType<BlogNode> {
    ObjectType::new(MUTATION_TYPE)
        .field(create_post(store.clone()))
        .field(create_author(store.clone()))
}

fn create_post(store: Arc<Store>) -> Field<BlogNode> {
    let string = || TypeRef::named_nn(TypeRef::STRING);

    Field::new("createPost", TypeRef::named_nn(POST))
        .description("Create a new blog post")
        .argument(ArgumentSpec::new("id", string()))
        .argument(ArgumentSpec::new("title", string()))
        .argument(ArgumentSpec::new("content", string()))
        .argument(ArgumentSpec::new("summary", TypeRef::named(TypeRef::STRING)))
        .argument(ArgumentSpec::new("category", TypeRef::named(CATEGORY)))
        .argument(ArgumentSpec::new("author", string()).description("Id of the author"))
        .resolve(move |context| {
            let arguments = context.arguments;
            let new_post = NewPost {
                id: arguments.string("id")?.to_owned(),
                title: arguments.string("title")?.to_owned(),
                content: arguments.string("content")?.to_owned(),
                summary: arguments.optional_string("summary").map(str::to_owned),
                category: arguments
                    .enum_name("category")
                    .map(parse_category)
                    .transpose()?,
                author: arguments.string("author")?.to_owned(),
            };
            let post = store.create_post(new_post)?;
            Ok(FieldValue::node(BlogNode::Post(post)))
        })
}

fn create_author(store: Arc<Store>) -> Field<BlogNode> {
    Field::new("createAuthor", TypeRef::named_nn(AUTHOR))
        .description("Create a new author")
        .argument(ArgumentSpec::new("id", TypeRef::named_nn(TypeRef::STRING)))
        .argument(ArgumentSpec::new("name", TypeRef::named_nn(TypeRef::STRING)))
        .argument(ArgumentSpec::new("twitterHandle", TypeRef::named(TypeRef::STRING)))
        .resolve(move |context| {
            let arguments = context.arguments;
            let author = Author {
                id: arguments.string("id")?.to_owned(),
                name: arguments.string("name")?.to_owned(),
                twitter_handle: arguments.optional_string("twitterHandle").map(str::to_owned),
            };
            let author = store.create_author(author)?;
            Ok(FieldValue::node(BlogNode::Author(author)))
        })
}

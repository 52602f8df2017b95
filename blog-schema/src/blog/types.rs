// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use blog_base::{BlogError, Category, Store};

use super::BlogNode;
use crate::{
    error::FieldError,
    registry::{ArgumentSpec, EnumType, Field, InterfaceField, InterfaceType, ObjectType, TypeRef},
    value::FieldValue,
};

pub const CATEGORY: &str = "Category";
pub const AUTHOR: &str = "Author";
pub const HAS_AUTHOR: &str = "HasAuthor";
pub const COMMENT: &str = "Comment";
pub const POST: &str = "Post";

pub(super) fn category() -> EnumType {
    Category::ALL.into_iter().fold(
        EnumType::new(CATEGORY).description("A Category of the blog"),
        |enum_type, category| enum_type.value(category.wire_name()),
    )
}

pub(super) fn author() -> ObjectType<BlogNode> {
    ObjectType::new(AUTHOR)
        .description("Represent the type of an author of a blog post or a comment")
        .field(Field::new("id", TypeRef::named_nn(TypeRef::STRING)))
        .field(Field::new("name", TypeRef::named_nn(TypeRef::STRING)))
        .field(Field::new("twitterHandle", TypeRef::named(TypeRef::STRING)))
}

pub(super) fn has_author() -> InterfaceType {
    InterfaceType::new(HAS_AUTHOR)
        .description("This type has an author")
        .field(InterfaceField::new("author", TypeRef::named_nn(AUTHOR)))
}

pub(super) fn comment(store: &Arc<Store>) -> ObjectType<BlogNode> {
    let authors = store.clone();
    let replies = store.clone();

    ObjectType::new(COMMENT)
        .description("Represent the type of a comment")
        .implement(HAS_AUTHOR)
        .field(Field::new("id", TypeRef::named_nn(TypeRef::STRING)))
        .field(Field::new("content", TypeRef::named_nn(TypeRef::STRING)))
        .field(
            Field::<BlogNode>::new("author", TypeRef::named_nn(AUTHOR)).resolve(move |context| {
                let comment = context.parent.as_comment()?;
                author_by_id(&authors, &comment.author)
            }),
        )
        .field(Field::new("timestamp", TypeRef::named(TypeRef::FLOAT)))
        .field(
            Field::new("replies", TypeRef::named_nn_list_nn(COMMENT))
                .description("Replies for the comment")
                .resolve(move |_| {
                    let replies = replies.replies().iter().cloned().map(BlogNode::Comment);
                    Ok(FieldValue::nodes(replies))
                }),
        )
}

pub(super) fn post(store: &Arc<Store>) -> ObjectType<BlogNode> {
    let comments = store.clone();
    let authors = store.clone();

    ObjectType::new(POST)
        .description("Represent the type of a blog post")
        .implement(HAS_AUTHOR)
        .field(Field::new("id", TypeRef::named_nn(TypeRef::STRING)))
        .field(Field::new("title", TypeRef::named_nn(TypeRef::STRING)))
        .field(Field::new("category", TypeRef::named(CATEGORY)))
        .field(Field::new("summary", TypeRef::named_nn(TypeRef::STRING)))
        .field(Field::new("content", TypeRef::named_nn(TypeRef::STRING)))
        .field(
            Field::<BlogNode>::new("timestamp", TypeRef::named_nn(TypeRef::FLOAT)).resolve(|context| {
                let post = context.parent.as_post()?;
                Ok(FieldValue::float(post.timestamp()))
            }),
        )
        .field(
            Field::new("comments", TypeRef::named_nn_list_nn(COMMENT))
                .argument(
                    ArgumentSpec::new("limit", TypeRef::named_nn(TypeRef::INT))
                        .description("Limit the comments returing"),
                )
                .resolve(move |context| {
                    let limit = context.arguments.int("limit")?;
                    let comments = comments.comments();
                    // A negative limit returns every comment.
                    let comments = match usize::try_from(limit) {
                        Ok(limit) => &comments[..limit.min(comments.len())],
                        Err(_) => comments,
                    };
                    Ok(FieldValue::nodes(
                        comments.iter().cloned().map(BlogNode::Comment),
                    ))
                }),
        )
        .field(
            Field::<BlogNode>::new("author", TypeRef::named_nn(AUTHOR)).resolve(move |context| {
                let post = context.parent.as_post()?;
                author_by_id(&authors, &post.author)
            }),
        )
}

/// Follows the foreign key `id` to its author.
fn author_by_id(store: &Store, id: &str) -> Result<FieldValue<BlogNode>, FieldError> {
    let author = store
        .author(id)
        .ok_or_else(|| BlogError::NoSuchAuthor(id.to_owned()))?;
    Ok(FieldValue::node(BlogNode::Author(author)))
}

/// Parses the wire name of a category argument.
pub(super) fn parse_category(name: &str) -> Result<Category, FieldError> {
    name.parse().map_err(|_| FieldError::InvalidEnumValue {
        type_name: CATEGORY.to_owned(),
        value: name.to_owned(),
    })
}

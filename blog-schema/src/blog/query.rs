// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use blog_base::{Post, Store};

use super::{
    types::{parse_category, AUTHOR, CATEGORY, HAS_AUTHOR, POST},
    BlogNode,
};
use crate::{
    registry::{ArgumentSpec, Field, ObjectType, TypeRef},
    value::FieldValue,
};

pub const QUERY_TYPE: &str = "BlogSchema";

pub(super) fn query_root(store: &Arc<Store>) -> ObjectType<BlogNode> {
    ObjectType::new(QUERY_TYPE)
        .description("Root of the Blog Schema")
        .field(posts(store.clone()))
        .field(latest_post(store.clone()))
        .field(recent_posts(store.clone()))
        .field(post(store.clone()))
        .field(authors(store.clone()))
        .field(author(store.clone()))
        .field(contributions(store.clone()))
}

fn posts(store: Arc<Store>) -> Field<BlogNode> {
    Field::new("posts", TypeRef::named_nn_list_nn(POST))
        .description("List of posts in the blog")
        .argument(ArgumentSpec::new("category", TypeRef::named(CATEGORY)))
        .resolve(move |context| {
            let category = context
                .arguments
                .enum_name("category")
                .map(parse_category)
                .transpose()?;
            let posts = store
                .posts()
                .into_iter()
                .filter(|post| category.map_or(true, |category| post.category == Some(category)));
            Ok(FieldValue::nodes(posts.map(BlogNode::Post)))
        })
}

/// Posts sorted by ascending date, keeping the table order of posts with the same date.
fn posts_by_date(store: &Store) -> Vec<Post> {
    let mut posts = store.posts();
    posts.sort_by_key(|post| post.date);
    posts
}

fn latest_post(store: Arc<Store>) -> Field<BlogNode> {
    Field::new("latestPost", TypeRef::named(POST))
        .description("Latest post in the blog")
        .resolve(move |_| {
            // TODO: this is the oldest post. Take the last one of the sort, and reverse
            // the order of `recentPosts` along with it.
            let post = posts_by_date(&store).into_iter().next();
            Ok(FieldValue::optional_node(post.map(BlogNode::Post)))
        })
}

fn recent_posts(store: Arc<Store>) -> Field<BlogNode> {
    Field::new("recentPosts", TypeRef::named_nn_list_nn(POST))
        .description("Recent posts in the blog")
        .argument(
            ArgumentSpec::new("count", TypeRef::named_nn(TypeRef::INT))
                .description("Number of recent items"),
        )
        .resolve(move |context| {
            let count = usize::try_from(context.arguments.int("count")?).unwrap_or(0);
            let posts = posts_by_date(&store).into_iter().take(count);
            Ok(FieldValue::nodes(posts.map(BlogNode::Post)))
        })
}

fn post(store: Arc<Store>) -> Field<BlogNode> {
    Field::new("post", TypeRef::named(POST))
        .description("Post by id")
        .argument(ArgumentSpec::new("id", TypeRef::named_nn(TypeRef::STRING)))
        .resolve(move |context| {
            let post = store.post(context.arguments.string("id")?);
            Ok(FieldValue::optional_node(post.map(BlogNode::Post)))
        })
}

fn authors(store: Arc<Store>) -> Field<BlogNode> {
    Field::new("authors", TypeRef::named_nn_list_nn(AUTHOR))
        .description("Available authors in the blog")
        .resolve(move |_| Ok(FieldValue::nodes(store.authors().into_iter().map(BlogNode::Author))))
}

fn author(store: Arc<Store>) -> Field<BlogNode> {
    Field::new("author", TypeRef::named(AUTHOR))
        .description("Author by id")
        .argument(ArgumentSpec::new("id", TypeRef::named_nn(TypeRef::STRING)))
        .resolve(move |context| {
            let author = store.author(context.arguments.string("id")?);
            Ok(FieldValue::optional_node(author.map(BlogNode::Author)))
        })
}

fn contributions(store: Arc<Store>) -> Field<BlogNode> {
    Field::new("contributions", TypeRef::named_nn_list_nn(HAS_AUTHOR))
        .description("Posts and comments written by an author")
        .argument(
            ArgumentSpec::new("author", TypeRef::named_nn(TypeRef::STRING))
                .description("Id of the author"),
        )
        .resolve(move |context| {
            let author = context.arguments.string("author")?;
            let posts = store
                .posts()
                .into_iter()
                .filter(|post| post.author == author)
                .map(BlogNode::Post);
            let comments = store
                .comments()
                .iter()
                .chain(store.replies())
                .filter(|comment| comment.author == author)
                .cloned()
                .map(BlogNode::Comment);
            Ok(FieldValue::nodes(posts.chain(comments)))
        })
}

// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use assert_matches::assert_matches;

use super::*;
use crate::{
    registry::{Field, InterfaceField, InterfaceType, TypeRef},
    value::Value,
};

#[derive(Debug)]
enum Item {
    Post,
    Comment,
    Draft,
    Untyped,
}

impl Node for Item {
    fn type_name(&self) -> Option<&'static str> {
        match self {
            Item::Post => Some("Post"),
            Item::Comment => Some("Comment"),
            Item::Draft => Some("Draft"),
            Item::Untyped => None,
        }
    }

    fn attribute(&self, _name: &str) -> Option<Value> {
        None
    }
}

fn registry() -> Registry<Item> {
    let author = || Field::new("author", TypeRef::named_nn("String"));
    let mut builder = Registry::builder("Query");
    builder
        .register(InterfaceType::new("HasAuthor").field(InterfaceField::new("author", TypeRef::named_nn("String"))))
        .unwrap()
        .register(ObjectType::new("Post").implement("HasAuthor").field(author()))
        .unwrap()
        .register(ObjectType::new("Comment").implement("HasAuthor").field(author()))
        .unwrap()
        .register(ObjectType::new("Draft").field(author()))
        .unwrap()
        .register(ObjectType::new("Query").field(Field::new("items", TypeRef::named_nn_list_nn("HasAuthor"))))
        .unwrap();
    builder.finish().unwrap()
}

#[test]
fn dispatch_follows_the_variant_tag() {
    let registry = registry();

    let post = resolve_concrete_type(&registry, "HasAuthor", &Item::Post).unwrap();
    assert_eq!(post.name(), "Post");
    let comment = resolve_concrete_type(&registry, "HasAuthor", &Item::Comment).unwrap();
    assert_eq!(comment.name(), "Comment");
}

#[test]
fn values_of_non_implementing_types_fail_to_dispatch() {
    let registry = registry();

    for item in [Item::Draft, Item::Untyped] {
        assert_matches!(
            resolve_concrete_type(&registry, "HasAuthor", &item).err(),
            Some(FieldError::ResolutionError { interface }) if interface == "HasAuthor"
        );
    }
}

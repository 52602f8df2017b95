// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Values flowing between resolvers and the executor.

pub use async_graphql::{Name, Number, Value};

/// A runtime value that object fields are resolved against.
///
/// Implementors are closed sets of variants, one per concrete object type.
pub trait Node: Send + Sync + 'static {
    /// Returns the name of the concrete object type of this value, if it has one.
    fn type_name(&self) -> Option<&'static str>;

    /// Reads the attribute `name` off the value.
    ///
    /// Used by fields declared without a resolver.
    fn attribute(&self, name: &str) -> Option<Value>;
}

/// The output of a field resolver, before it's completed against the field's type.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue<N> {
    /// No value.
    Null,
    /// A scalar or enum value.
    Leaf(Value),
    /// An object, to be resolved further with the fields of its type.
    Node(N),
    /// A list of values.
    List(Vec<FieldValue<N>>),
}

impl<N> FieldValue<N> {
    /// Creates a [`FieldValue::Leaf`].
    pub fn leaf(value: impl Into<Value>) -> Self {
        FieldValue::Leaf(value.into())
    }

    /// Creates a [`FieldValue::Leaf`] holding a string.
    pub fn string(value: impl Into<String>) -> Self {
        FieldValue::Leaf(Value::String(value.into()))
    }

    /// Creates a [`FieldValue::Leaf`] holding a float, or [`FieldValue::Null`] if it's not
    /// finite.
    pub fn float(value: f64) -> Self {
        Number::from_f64(value).map_or(FieldValue::Null, |number| {
            FieldValue::Leaf(Value::Number(number))
        })
    }

    /// Creates a [`FieldValue::Node`].
    pub fn node(node: N) -> Self {
        FieldValue::Node(node)
    }

    /// Creates a [`FieldValue::Node`] from `node`, or [`FieldValue::Null`] if absent.
    pub fn optional_node(node: Option<N>) -> Self {
        node.map_or(FieldValue::Null, FieldValue::Node)
    }

    /// Creates a [`FieldValue::List`] of nodes.
    pub fn nodes(nodes: impl IntoIterator<Item = N>) -> Self {
        FieldValue::List(nodes.into_iter().map(FieldValue::Node).collect())
    }

    /// Returns `true` if this is [`FieldValue::Null`] or a null leaf.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null | FieldValue::Leaf(Value::Null))
    }

    /// Describes the shape of the value, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Leaf(_) => "leaf value",
            FieldValue::Node(_) => "object",
            FieldValue::List(_) => "list",
        }
    }
}

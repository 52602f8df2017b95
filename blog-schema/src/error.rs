// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Errors building a schema and resolving its fields.

use async_graphql::ErrorExtensions;
use blog_base::BlogError;
use thiserror::Error;

/// Errors detected while building a [`Registry`](crate::Registry).
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SchemaError {
    /// Two types share a name.
    #[error("Type `{0}` is registered more than once")]
    DuplicateType(String),

    /// A type declares two fields with the same name.
    #[error("Field `{field}` is declared more than once in type `{type_name}`")]
    DuplicateField { type_name: String, field: String },

    /// A field declares two arguments with the same name.
    #[error("Argument `{argument}` is declared more than once in field `{field}`")]
    DuplicateArgument { field: String, argument: String },

    /// An enum declares the same value twice.
    #[error("Value `{value}` is declared more than once in enum `{type_name}`")]
    DuplicateEnumValue { type_name: String, value: String },

    /// A field, argument or implementation refers to a type that isn't registered.
    #[error("`{referenced_by}` refers to the unknown type `{type_name}`")]
    UnknownType {
        referenced_by: String,
        type_name: String,
    },

    /// An argument is typed as an object or interface.
    #[error("Argument `{argument}` of field `{field}` has type `{type_name}`, which is not an input type")]
    NotAnInputType {
        field: String,
        argument: String,
        type_name: String,
    },

    /// A default value doesn't coerce to the type of its argument.
    #[error("Default value of argument `{argument}` of field `{field}` is invalid: {reason}")]
    InvalidDefaultValue {
        field: String,
        argument: String,
        reason: String,
    },

    /// An object type implements a type that isn't an interface.
    #[error("Type `{object}` implements `{interface}`, which is not an interface")]
    NotAnInterface { object: String, interface: String },

    /// An object type lacks a field of an interface it implements.
    #[error("Type `{object}` implements `{interface}` but has no field `{field}`")]
    MissingInterfaceField {
        object: String,
        interface: String,
        field: String,
    },

    /// An object type declares an interface field with a different type.
    #[error(
        "Field `{object}.{field}` has type `{found}` but interface `{interface}` declares `{expected}`"
    )]
    InterfaceFieldTypeMismatch {
        object: String,
        interface: String,
        field: String,
        expected: String,
        found: String,
    },

    /// A root operation type isn't a registered object type.
    #[error("Root type `{0}` is not a registered object type")]
    InvalidRootType(String),

    /// The registry could not be lowered into an executable schema.
    #[error("Cannot build an executable schema: {0}")]
    Executable(String),
}

/// Errors resolving a single field.
///
/// A field error only nulls out the field it happened in (and its non-null ancestors);
/// the rest of the response is still resolved.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FieldError {
    /// A non-null argument has no value and no default.
    #[error("Field `{field}` is missing required argument `{argument}`")]
    MissingArgument { field: String, argument: String },

    /// A value is not one of the names of its enum.
    #[error("Value `{value}` is not a member of enum `{type_name}`")]
    InvalidEnumValue { type_name: String, value: String },

    /// An argument value doesn't coerce to the declared type.
    #[error("Argument `{argument}` of field `{field}` expects type `{expected}`, found {found}")]
    InvalidArgument {
        field: String,
        argument: String,
        expected: String,
        found: String,
    },

    /// The client passed an argument the field doesn't declare.
    #[error("Field `{field}` has no argument `{argument}`")]
    UnknownArgument { field: String, argument: String },

    /// A value of interface type has no implementing object type.
    #[error("Could not resolve the concrete type of a value of interface `{interface}`")]
    ResolutionError { interface: String },

    /// A field is selected that its type doesn't declare.
    #[error("Type `{type_name}` has no field `{field}`")]
    UnknownField { type_name: String, field: String },

    /// A field without a resolver names an attribute its parent lacks.
    #[error("Value of type `{type_name}` has no attribute `{field}`")]
    MissingAttribute { type_name: String, field: String },

    /// A resolver returned a value of the wrong shape for the field type.
    #[error("Expected a value of type `{expected}`, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A resolver returned null for a non-null field.
    #[error("Cannot return null for non-null type `{type_name}`")]
    NullValue { type_name: String },

    /// The store rejected the operation.
    #[error(transparent)]
    Blog(#[from] BlogError),
}

impl FieldError {
    /// A stable identifier of the kind of error, reported in the `code` extension.
    pub fn code(&self) -> &'static str {
        match self {
            FieldError::MissingArgument { .. } => "MISSING_ARGUMENT",
            FieldError::InvalidEnumValue { .. } => "INVALID_ENUM_VALUE",
            FieldError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            FieldError::UnknownArgument { .. } => "UNKNOWN_ARGUMENT",
            FieldError::ResolutionError { .. } => "RESOLUTION_ERROR",
            FieldError::UnknownField { .. } => "UNKNOWN_FIELD",
            FieldError::MissingAttribute { .. } => "MISSING_ATTRIBUTE",
            FieldError::TypeMismatch { .. } => "TYPE_MISMATCH",
            FieldError::NullValue { .. } => "NULL_VALUE",
            FieldError::Blog(BlogError::NoSuchAuthor(_)) => "NO_SUCH_AUTHOR",
            FieldError::Blog(BlogError::PostAlreadyExists(_)) => "POST_ALREADY_EXISTS",
            FieldError::Blog(BlogError::AuthorAlreadyExists(_)) => "AUTHOR_ALREADY_EXISTS",
        }
    }
}

impl ErrorExtensions for FieldError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string())
            .extend_with(|_, extensions| extensions.set("code", self.code()))
    }
}

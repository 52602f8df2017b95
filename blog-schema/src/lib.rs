// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! A typed query and mutation surface over the blog [`Store`](blog_base::Store).
//!
//! The [`Registry`] declares the named types of the schema, their fields and the
//! resolvers computing each field. A [`Schema`] executes client requests against a
//! registry lowered into an `async_graphql` dynamic schema: it binds the arguments of every
//! selected field, calls the field's resolver, and dispatches values typed as interfaces
//! to their concrete object types.
//!
//! [`blog::blog_schema`] builds the schema of the blog itself.

#![warn(missing_docs)]

pub mod arguments;
pub mod blog;
pub mod dispatch;
pub mod error;
pub mod executor;
mod propagation;
pub mod registry;
mod sdl;
pub mod value;

pub use async_graphql::{Request, Response, ServerError, Variables};

pub use self::{
    arguments::BoundArguments,
    error::{FieldError, SchemaError},
    executor::{Schema, DEFAULT_DEPTH_LIMIT},
    registry::{
        ArgumentSpec, EnumType, Field, InterfaceField, InterfaceType, MetaType, ObjectType,
        Registry, RegistryBuilder, ResolverContext, ScalarType, TypeRef,
    },
    value::{FieldValue, Node, Value},
};

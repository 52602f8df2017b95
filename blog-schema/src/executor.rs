// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Execution of client requests against a [`Registry`].
//!
//! The registry is lowered into an [`async_graphql::dynamic::Schema`], which parses,
//! validates and executes requests. Each lowered field binds its arguments with
//! [`bind_arguments`], runs the resolver of the field on the parent [`Node`], and
//! completes the result against the declared type. Values of interface type are tagged
//! with the object type chosen by [`resolve_concrete_type`].
//!
//! Requests nesting fields or fragment spreads deeper than the depth limit are rejected
//! before execution, so self-referencing fragments can't recurse without bound.

#[cfg(test)]
#[path = "unit_tests/executor.rs"]
mod tests;

use std::sync::Arc;

use async_graphql::{dynamic, ErrorExtensions, Request, Response};
use indexmap::IndexMap;
use tracing::{debug, instrument, warn};

use crate::{
    arguments::bind_arguments,
    dispatch::resolve_concrete_type,
    error::{FieldError, SchemaError},
    propagation::NullPropagation,
    registry::{
        EnumType, Field, InterfaceType, MetaType, ObjectType, Registry, ResolverContext,
        ScalarType, TypeRef, BUILT_IN_SCALARS,
    },
    value::{FieldValue, Name, Node, Value},
};

/// The deepest nesting of fields accepted in a request, unless configured otherwise.
pub const DEFAULT_DEPTH_LIMIT: usize = 32;

/// A registry lowered into an executable schema, with the value its root fields are
/// resolved on.
pub struct Schema<N> {
    registry: Arc<Registry<N>>,
    executable: dynamic::Schema,
}

impl<N: Node> Schema<N> {
    /// Creates a schema resolving the root operation types of `registry` on `root`.
    pub fn new(registry: Registry<N>, root: N) -> Result<Self, SchemaError> {
        Self::with_depth_limit(registry, root, DEFAULT_DEPTH_LIMIT)
    }

    /// Creates a schema rejecting requests that nest fields, or fragment spreads, deeper
    /// than `depth_limit`.
    pub fn with_depth_limit(
        registry: Registry<N>,
        root: N,
        depth_limit: usize,
    ) -> Result<Self, SchemaError> {
        let registry = Arc::new(registry);
        let root = Arc::new(root);

        let mut builder = dynamic::Schema::build(
            registry.query_type_name(),
            registry.mutation_type_name(),
            None,
        );
        for meta_type in registry.types() {
            builder = match meta_type {
                MetaType::Scalar(scalar) if BUILT_IN_SCALARS.contains(&scalar.name()) => builder,
                MetaType::Scalar(scalar) => builder.register(lower_scalar(scalar)),
                MetaType::Enum(enum_type) => builder.register(lower_enum(enum_type)),
                MetaType::Interface(interface) => builder.register(lower_interface(interface)),
                MetaType::Object(object) => {
                    builder.register(lower_object(&registry, &root, object))
                }
            };
        }

        let executable = builder
            .extension(NullPropagation)
            .limit_depth(depth_limit)
            .limit_recursive_depth(depth_limit)
            .finish()
            .map_err(|error| SchemaError::Executable(error.to_string()))?;

        Ok(Schema {
            registry,
            executable,
        })
    }

    /// The registry the schema was built from.
    pub fn registry(&self) -> &Registry<N> {
        &self.registry
    }

    /// Renders the schema definition language of the registry.
    pub fn sdl(&self) -> String {
        self.registry.sdl()
    }

    /// Executes a request and returns the response.
    ///
    /// Errors in individual fields are reported in the response next to the data that
    /// could still be resolved. Requests that fail to parse or validate produce a
    /// response without data.
    pub async fn execute(&self, request: impl Into<Request>) -> Response {
        self.execute_request(request.into()).await
    }

    #[instrument(level = "debug", skip_all, fields(operation = request.operation_name.as_deref()))]
    async fn execute_request(&self, request: Request) -> Response {
        let response = self.executable.execute(request).await;
        for error in &response.errors {
            debug!(message = %error.message, path = ?error.path, "Request error");
        }
        if response.data == Value::Null && response.is_err() {
            warn!(errors = response.errors.len(), "Rejected request");
        }
        response
    }
}

fn lower_type(ty: &TypeRef) -> dynamic::TypeRef {
    match ty {
        TypeRef::Named(name) => dynamic::TypeRef::named(name.as_str()),
        TypeRef::NonNull(inner) => dynamic::TypeRef::NonNull(Box::new(lower_type(inner))),
        TypeRef::List(inner) => dynamic::TypeRef::List(Box::new(lower_type(inner))),
    }
}

fn lower_scalar(scalar: &ScalarType) -> dynamic::Scalar {
    let lowered = dynamic::Scalar::new(scalar.name());
    match &scalar.description {
        Some(description) => lowered.description(description.as_str()),
        None => lowered,
    }
}

fn lower_enum(enum_type: &EnumType) -> dynamic::Enum {
    let lowered = dynamic::Enum::new(enum_type.name()).items(enum_type.values());
    match &enum_type.description {
        Some(description) => lowered.description(description.as_str()),
        None => lowered,
    }
}

fn lower_interface(interface: &InterfaceType) -> dynamic::Interface {
    let mut lowered = dynamic::Interface::new(interface.name());
    if let Some(description) = &interface.description {
        lowered = lowered.description(description.as_str());
    }
    for field in interface.fields() {
        let mut lowered_field = dynamic::InterfaceField::new(field.name(), lower_type(field.ty()));
        if let Some(description) = &field.description {
            lowered_field = lowered_field.description(description.as_str());
        }
        lowered = lowered.field(lowered_field);
    }
    lowered
}

fn lower_object<N: Node>(
    registry: &Arc<Registry<N>>,
    root: &Arc<N>,
    object: &ObjectType<N>,
) -> dynamic::Object {
    let mut lowered = dynamic::Object::new(object.name());
    if let Some(description) = &object.description {
        lowered = lowered.description(description.as_str());
    }
    for interface in object.interfaces() {
        lowered = lowered.implement(interface);
    }
    for field in object.fields() {
        let resolver = FieldResolver {
            registry: registry.clone(),
            root: root.clone(),
            object: object.name().to_owned(),
            field: field.name().to_owned(),
        };
        lowered = lowered.field(lower_field(field, resolver));
    }
    lowered
}

fn lower_field<N: Node>(field: &Field<N>, resolver: FieldResolver<N>) -> dynamic::Field {
    let mut lowered = dynamic::Field::new(field.name(), lower_type(field.ty()), move |context| {
        let result = resolver.resolve(&context).map_err(|error| error.extend());
        dynamic::FieldFuture::new(async move { result })
    });
    if let Some(description) = &field.description {
        lowered = lowered.description(description.as_str());
    }
    for argument in field.arguments() {
        let mut input = dynamic::InputValue::new(argument.name(), lower_type(argument.ty()));
        if let Some(description) = &argument.description {
            input = input.description(description.as_str());
        }
        if let Some(default) = argument.default() {
            input = input.default_value(default.clone());
        }
        lowered = lowered.argument(input);
    }
    lowered
}

/// Resolves one field of an object type.
struct FieldResolver<N> {
    registry: Arc<Registry<N>>,
    root: Arc<N>,
    object: String,
    field: String,
}

impl<N: Node> FieldResolver<N> {
    fn resolve<'a>(
        &self,
        context: &dynamic::ResolverContext<'_>,
    ) -> Result<Option<dynamic::FieldValue<'a>>, FieldError> {
        let registry = &*self.registry;
        let definition = registry
            .object(&self.object)
            .and_then(|object| object.get_field(&self.field))
            .ok_or_else(|| FieldError::UnknownField {
                type_name: self.object.clone(),
                field: self.field.clone(),
            })?;
        // Root fields are resolved on the root value of the schema.
        let parent = context
            .parent_value
            .downcast_ref::<N>()
            .unwrap_or(&*self.root);

        let raw_arguments = context
            .args
            .as_index_map()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect::<IndexMap<_, _>>();
        let arguments = bind_arguments(
            registry,
            definition.name(),
            definition.arguments(),
            raw_arguments,
        )?;

        let value = match definition.resolver() {
            Some(resolver) => resolver(ResolverContext {
                parent,
                arguments: &arguments,
            })?,
            None => parent
                .attribute(definition.name())
                .map(FieldValue::Leaf)
                .ok_or_else(|| FieldError::MissingAttribute {
                    type_name: self.object.clone(),
                    field: definition.name().to_owned(),
                })?,
        };

        complete(registry, definition.ty(), value)
    }
}

/// Completes a resolved value against its declared type, or returns `None` for null.
fn complete<'a, N: Node>(
    registry: &Registry<N>,
    ty: &TypeRef,
    value: FieldValue<N>,
) -> Result<Option<dynamic::FieldValue<'a>>, FieldError> {
    if value.is_null() {
        return match ty {
            TypeRef::NonNull(_) => Err(FieldError::NullValue {
                type_name: ty.to_string(),
            }),
            _ => Ok(None),
        };
    }

    match (ty, value) {
        (TypeRef::NonNull(inner), value) => complete(registry, inner, value),
        (TypeRef::List(item_type), FieldValue::List(items)) => {
            let items = items
                .into_iter()
                .map(|item| {
                    let item = complete(registry, item_type, item)?;
                    Ok(item.unwrap_or(dynamic::FieldValue::NULL))
                })
                .collect::<Result<Vec<_>, FieldError>>()?;
            Ok(Some(dynamic::FieldValue::list(items)))
        }
        (TypeRef::Named(type_name), value) => complete_named(registry, type_name, value).map(Some),
        (ty, value) => Err(mismatch(ty, &value)),
    }
}

fn complete_named<'a, N: Node>(
    registry: &Registry<N>,
    type_name: &str,
    value: FieldValue<N>,
) -> Result<dynamic::FieldValue<'a>, FieldError> {
    match (registry.get(type_name), value) {
        (Some(MetaType::Scalar(_)), FieldValue::Leaf(leaf)) => Ok(dynamic::FieldValue::value(leaf)),
        (Some(MetaType::Enum(enum_type)), FieldValue::Leaf(leaf)) => {
            let wire_name = match &leaf {
                Value::Enum(name) => Some(name.as_str()),
                Value::String(name) => Some(name.as_str()),
                _ => None,
            };
            match wire_name {
                Some(name) if enum_type.contains(name) => {
                    Ok(dynamic::FieldValue::value(Value::Enum(Name::new(name))))
                }
                _ => Err(FieldError::InvalidEnumValue {
                    type_name: type_name.to_owned(),
                    value: wire_name.map_or_else(|| leaf.to_string(), str::to_owned),
                }),
            }
        }
        (Some(MetaType::Object(object)), FieldValue::Node(node)) => {
            if node.type_name() != Some(object.name()) {
                return Err(FieldError::TypeMismatch {
                    expected: object.name().to_owned(),
                    found: node.type_name().unwrap_or("root").to_owned(),
                });
            }
            Ok(dynamic::FieldValue::owned_any(node))
        }
        (Some(MetaType::Interface(interface)), FieldValue::Node(node)) => {
            let object = resolve_concrete_type(registry, interface.name(), &node)?;
            let concrete_type = object.name().to_owned();
            Ok(dynamic::FieldValue::owned_any(node).with_type(concrete_type))
        }
        (_, value) => Err(mismatch(&TypeRef::named(type_name), &value)),
    }
}

fn mismatch<N>(ty: &TypeRef, value: &FieldValue<N>) -> FieldError {
    FieldError::TypeMismatch {
        expected: ty.to_string(),
        found: value.kind().to_owned(),
    }
}

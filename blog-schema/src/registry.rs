// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Declarations of the named types of a schema, their fields and their resolvers.
//!
//! A [`Registry`] is assembled once with a [`RegistryBuilder`], which rejects duplicate
//! declarations and dangling type references. After [`RegistryBuilder::finish`] the
//! registry can no longer be changed.

#[cfg(test)]
#[path = "unit_tests/registry.rs"]
mod tests;

use std::{collections::HashSet, fmt, sync::Arc};

use indexmap::{map::Entry, IndexMap};

use crate::{
    arguments::{coerce_input, BoundArguments},
    error::{FieldError, SchemaError},
    value::{FieldValue, Value},
};

/// A reference to a named type, possibly wrapped in list and non-null modifiers.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TypeRef {
    /// A named type, nullable.
    Named(String),
    /// A non-null version of the inner type.
    NonNull(Box<TypeRef>),
    /// A nullable list of the inner type.
    List(Box<TypeRef>),
}

impl TypeRef {
    /// The built-in string scalar.
    pub const STRING: &'static str = "String";
    /// The built-in 32-bit integer scalar.
    pub const INT: &'static str = "Int";
    /// The built-in double precision float scalar.
    pub const FLOAT: &'static str = "Float";
    /// The built-in boolean scalar.
    pub const BOOLEAN: &'static str = "Boolean";
    /// The built-in identifier scalar.
    pub const ID: &'static str = "ID";

    /// `Name`
    pub fn named(type_name: impl Into<String>) -> Self {
        TypeRef::Named(type_name.into())
    }

    /// `Name!`
    pub fn named_nn(type_name: impl Into<String>) -> Self {
        TypeRef::named(type_name).non_null()
    }

    /// `[Name]`
    pub fn named_list(type_name: impl Into<String>) -> Self {
        TypeRef::named(type_name).list()
    }

    /// `[Name!]`
    pub fn named_nn_list(type_name: impl Into<String>) -> Self {
        TypeRef::named_nn(type_name).list()
    }

    /// `[Name]!`
    pub fn named_list_nn(type_name: impl Into<String>) -> Self {
        TypeRef::named_list(type_name).non_null()
    }

    /// `[Name!]!`
    pub fn named_nn_list_nn(type_name: impl Into<String>) -> Self {
        TypeRef::named_nn_list(type_name).non_null()
    }

    /// Wraps this type in a non-null modifier, unless it already is non-null.
    pub fn non_null(self) -> Self {
        match self {
            TypeRef::NonNull(_) => self,
            other => TypeRef::NonNull(Box::new(other)),
        }
    }

    /// Wraps this type in a list.
    pub fn list(self) -> Self {
        TypeRef::List(Box::new(self))
    }

    /// Returns `true` if null is not a valid value of this type.
    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }

    /// Returns the name of the innermost named type.
    pub fn base_name(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::NonNull(inner) | TypeRef::List(inner) => inner.base_name(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => write!(formatter, "{name}"),
            TypeRef::NonNull(inner) => write!(formatter, "{inner}!"),
            TypeRef::List(inner) => write!(formatter, "[{inner}]"),
        }
    }
}

/// The scalars every registry starts with.
pub(crate) const BUILT_IN_SCALARS: [&str; 5] = [
    TypeRef::STRING,
    TypeRef::INT,
    TypeRef::FLOAT,
    TypeRef::BOOLEAN,
    TypeRef::ID,
];

/// A named type of the schema.
pub enum MetaType<N> {
    /// A leaf type with a serialized value.
    Scalar(ScalarType),
    /// A leaf type restricted to a set of names.
    Enum(EnumType),
    /// A type with fields resolved on a node.
    Object(ObjectType<N>),
    /// An abstract type dispatched to an implementing object.
    Interface(InterfaceType),
}

impl<N> MetaType<N> {
    /// The name of the type.
    pub fn name(&self) -> &str {
        match self {
            MetaType::Scalar(scalar) => &scalar.name,
            MetaType::Enum(enum_type) => &enum_type.name,
            MetaType::Object(object) => &object.name,
            MetaType::Interface(interface) => &interface.name,
        }
    }

    /// The description of the type, if any.
    pub fn description(&self) -> Option<&str> {
        match self {
            MetaType::Scalar(scalar) => scalar.description.as_deref(),
            MetaType::Enum(enum_type) => enum_type.description.as_deref(),
            MetaType::Object(object) => object.description.as_deref(),
            MetaType::Interface(interface) => interface.description.as_deref(),
        }
    }

    /// Returns `true` if values of this type may be passed as arguments.
    pub fn is_input(&self) -> bool {
        matches!(self, MetaType::Scalar(_) | MetaType::Enum(_))
    }
}

impl<N> From<ScalarType> for MetaType<N> {
    fn from(scalar: ScalarType) -> Self {
        MetaType::Scalar(scalar)
    }
}

impl<N> From<EnumType> for MetaType<N> {
    fn from(enum_type: EnumType) -> Self {
        MetaType::Enum(enum_type)
    }
}

impl<N> From<ObjectType<N>> for MetaType<N> {
    fn from(object: ObjectType<N>) -> Self {
        MetaType::Object(object)
    }
}

impl<N> From<InterfaceType> for MetaType<N> {
    fn from(interface: InterfaceType) -> Self {
        MetaType::Interface(interface)
    }
}

/// A scalar type.
pub struct ScalarType {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
}

impl ScalarType {
    /// Declares a scalar type named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        ScalarType {
            name: name.into(),
            description: None,
        }
    }

    /// Sets the description shown in the schema definition language.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The name of the scalar.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An enum type, with the wire names of its values.
pub struct EnumType {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) values: Vec<String>,
}

impl EnumType {
    /// Declares an enum type named `name`, without values.
    pub fn new(name: impl Into<String>) -> Self {
        EnumType {
            name: name.into(),
            description: None,
            values: Vec::new(),
        }
    }

    /// Sets the description shown in the schema definition language.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a value with the wire name `name`.
    pub fn value(mut self, name: impl Into<String>) -> Self {
        self.values.push(name.into());
        self
    }

    /// The name of the enum.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wire names of the values, in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    /// Returns `true` if `name` is the wire name of one of the values.
    pub fn contains(&self, name: &str) -> bool {
        self.values.iter().any(|value| value == name)
    }
}

/// The arguments handed to a field resolver.
pub struct ResolverContext<'a, N> {
    /// The value the field is resolved on.
    pub parent: &'a N,
    /// The bound arguments of the field.
    pub arguments: &'a BoundArguments,
}

/// A function computing the value of a field.
pub type Resolver<N> =
    Arc<dyn Fn(ResolverContext<'_, N>) -> Result<FieldValue<N>, FieldError> + Send + Sync>;

/// A field of an object type.
pub struct Field<N> {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) ty: TypeRef,
    pub(crate) arguments: Vec<ArgumentSpec>,
    pub(crate) resolver: Option<Resolver<N>>,
}

impl<N> Field<N> {
    /// Creates a field named `name` of type `ty`.
    ///
    /// Unless a resolver is set with [`Field::resolve`], the field reads the same-named
    /// attribute off its parent value.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Field {
            name: name.into(),
            description: None,
            ty,
            arguments: Vec::new(),
            resolver: None,
        }
    }

    /// Sets the description shown in the schema definition language.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an argument to the field.
    pub fn argument(mut self, argument: ArgumentSpec) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Sets the function computing the field.
    pub fn resolve<F>(mut self, resolver: F) -> Self
    where
        F: Fn(ResolverContext<'_, N>) -> Result<FieldValue<N>, FieldError> + Send + Sync + 'static,
    {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// The name of the field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type of the field.
    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    /// The declared arguments, in declaration order.
    pub fn arguments(&self) -> &[ArgumentSpec] {
        &self.arguments
    }

    /// The explicit resolver of the field, if it has one.
    pub fn resolver(&self) -> Option<&Resolver<N>> {
        self.resolver.as_ref()
    }
}

/// The declaration of an argument: its name, type, and default value.
#[derive(Clone, Debug, PartialEq)]
pub struct ArgumentSpec {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) ty: TypeRef,
    pub(crate) default_value: Option<Value>,
}

impl ArgumentSpec {
    /// Declares an argument named `name` of type `ty`, without a default value.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        ArgumentSpec {
            name: name.into(),
            description: None,
            ty,
            default_value: None,
        }
    }

    /// Sets the description shown in the schema definition language.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the value used when the client leaves the argument out.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// The name of the argument.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type of the argument.
    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    /// The value used when the argument is left out, if any.
    pub fn default(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// Returns `true` if the argument can't be null.
    pub fn is_required(&self) -> bool {
        self.ty.is_non_null()
    }
}

/// An object type.
pub struct ObjectType<N> {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) fields: Vec<Field<N>>,
    pub(crate) interfaces: Vec<String>,
}

impl<N> ObjectType<N> {
    /// Declares an object type named `name`, without fields.
    pub fn new(name: impl Into<String>) -> Self {
        ObjectType {
            name: name.into(),
            description: None,
            fields: Vec::new(),
            interfaces: Vec::new(),
        }
    }

    /// Sets the description shown in the schema definition language.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a field to the type.
    pub fn field(mut self, field: Field<N>) -> Self {
        self.fields.push(field);
        self
    }

    /// Declares that the type implements the interface `interface`.
    pub fn implement(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// The name of the type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fields of the type, in declaration order.
    pub fn fields(&self) -> &[Field<N>] {
        &self.fields
    }

    /// Looks up the field `name`.
    pub fn get_field(&self, name: &str) -> Option<&Field<N>> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// The names of the implemented interfaces.
    pub fn interfaces(&self) -> impl Iterator<Item = &str> {
        self.interfaces.iter().map(String::as_str)
    }

    /// Returns `true` if the type implements the interface `interface`.
    pub fn implements(&self, interface: &str) -> bool {
        self.interfaces.iter().any(|name| name == interface)
    }
}

/// A field declared by an interface.
pub struct InterfaceField {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) ty: TypeRef,
}

impl InterfaceField {
    /// Declares an interface field named `name` of type `ty`.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        InterfaceField {
            name: name.into(),
            description: None,
            ty,
        }
    }

    /// Sets the description shown in the schema definition language.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The name of the field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type of the field.
    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }
}

/// An abstract type implemented by object types.
///
/// Its fields are always resolved by the concrete object type a value dispatches to.
pub struct InterfaceType {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) fields: Vec<InterfaceField>,
}

impl InterfaceType {
    /// Declares an interface named `name`, without fields.
    pub fn new(name: impl Into<String>) -> Self {
        InterfaceType {
            name: name.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    /// Sets the description shown in the schema definition language.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a field every implementing type must declare.
    pub fn field(mut self, field: InterfaceField) -> Self {
        self.fields.push(field);
        self
    }

    /// The name of the interface.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fields of the interface, in declaration order.
    pub fn fields(&self) -> &[InterfaceField] {
        &self.fields
    }

    /// Looks up the field `name`.
    pub fn get_field(&self, name: &str) -> Option<&InterfaceField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// The immutable set of types of a schema.
pub struct Registry<N> {
    pub(crate) types: IndexMap<String, MetaType<N>>,
    pub(crate) query_type: String,
    pub(crate) mutation_type: Option<String>,
}

impl<N> Registry<N> {
    /// Starts building a registry whose query root is the object type `query_type`.
    pub fn builder(query_type: impl Into<String>) -> RegistryBuilder<N> {
        RegistryBuilder::new(query_type)
    }

    /// Looks up the type `name`.
    pub fn get(&self, name: &str) -> Option<&MetaType<N>> {
        self.types.get(name)
    }

    /// Iterates over the types in registration order, built-in scalars first.
    pub fn types(&self) -> impl Iterator<Item = &MetaType<N>> {
        self.types.values()
    }

    /// Looks up the object type `name`.
    pub fn object(&self, name: &str) -> Option<&ObjectType<N>> {
        match self.types.get(name)? {
            MetaType::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Looks up the interface `name`.
    pub fn interface(&self, name: &str) -> Option<&InterfaceType> {
        match self.types.get(name)? {
            MetaType::Interface(interface) => Some(interface),
            _ => None,
        }
    }

    /// Looks up the enum type `name`.
    pub fn enum_type(&self, name: &str) -> Option<&EnumType> {
        match self.types.get(name)? {
            MetaType::Enum(enum_type) => Some(enum_type),
            _ => None,
        }
    }

    /// The name of the query root type.
    pub fn query_type_name(&self) -> &str {
        &self.query_type
    }

    /// The name of the mutation root type, if any.
    pub fn mutation_type_name(&self) -> Option<&str> {
        self.mutation_type.as_deref()
    }

    /// The query root type.
    pub fn query_type(&self) -> Option<&ObjectType<N>> {
        self.object(&self.query_type)
    }

    /// The mutation root type, if the schema supports mutations.
    pub fn mutation_type(&self) -> Option<&ObjectType<N>> {
        self.object(self.mutation_type.as_deref()?)
    }

    fn validate(&self) -> Result<(), SchemaError> {
        for root in std::iter::once(&self.query_type).chain(&self.mutation_type) {
            if self.object(root).is_none() {
                return Err(SchemaError::InvalidRootType(root.clone()));
            }
        }

        for meta_type in self.types.values() {
            match meta_type {
                MetaType::Object(object) => self.validate_object(object)?,
                MetaType::Interface(interface) => {
                    for field in &interface.fields {
                        self.ensure_type_exists(
                            &format!("{}.{}", interface.name, field.name),
                            &field.ty,
                        )?;
                    }
                }
                MetaType::Scalar(_) | MetaType::Enum(_) => {}
            }
        }

        Ok(())
    }

    fn validate_object(&self, object: &ObjectType<N>) -> Result<(), SchemaError> {
        for field in &object.fields {
            let field_name = format!("{}.{}", object.name, field.name);
            self.ensure_type_exists(&field_name, &field.ty)?;

            for argument in &field.arguments {
                let argument_type = self.ensure_type_exists(
                    &format!("{field_name}({})", argument.name),
                    &argument.ty,
                )?;
                if !argument_type.is_input() {
                    return Err(SchemaError::NotAnInputType {
                        field: field_name,
                        argument: argument.name.clone(),
                        type_name: argument_type.name().to_owned(),
                    });
                }
                if let Some(default) = &argument.default_value {
                    coerce_input(self, &argument.ty, default.clone()).map_err(|error| {
                        SchemaError::InvalidDefaultValue {
                            field: field_name.clone(),
                            argument: argument.name.clone(),
                            reason: error.to_string(),
                        }
                    })?;
                }
            }
        }

        for interface_name in &object.interfaces {
            let interface = match self.types.get(interface_name) {
                Some(MetaType::Interface(interface)) => interface,
                Some(_) => {
                    return Err(SchemaError::NotAnInterface {
                        object: object.name.clone(),
                        interface: interface_name.clone(),
                    })
                }
                None => {
                    return Err(SchemaError::UnknownType {
                        referenced_by: object.name.clone(),
                        type_name: interface_name.clone(),
                    })
                }
            };

            for interface_field in &interface.fields {
                let field = object.get_field(&interface_field.name).ok_or_else(|| {
                    SchemaError::MissingInterfaceField {
                        object: object.name.clone(),
                        interface: interface.name.clone(),
                        field: interface_field.name.clone(),
                    }
                })?;
                if field.ty != interface_field.ty {
                    return Err(SchemaError::InterfaceFieldTypeMismatch {
                        object: object.name.clone(),
                        interface: interface.name.clone(),
                        field: field.name.clone(),
                        expected: interface_field.ty.to_string(),
                        found: field.ty.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    fn ensure_type_exists(
        &self,
        referenced_by: &str,
        ty: &TypeRef,
    ) -> Result<&MetaType<N>, SchemaError> {
        self.types
            .get(ty.base_name())
            .ok_or_else(|| SchemaError::UnknownType {
                referenced_by: referenced_by.to_owned(),
                type_name: ty.base_name().to_owned(),
            })
    }
}

/// Collects type declarations into a [`Registry`].
pub struct RegistryBuilder<N> {
    pub(crate) types: IndexMap<String, MetaType<N>>,
    pub(crate) query_type: String,
    pub(crate) mutation_type: Option<String>,
}

impl<N> RegistryBuilder<N> {
    /// Creates a builder with the built-in scalars already registered.
    pub fn new(query_type: impl Into<String>) -> Self {
        let descriptions = [
            "A UTF-8 character sequence.",
            "A signed 32-bit integer.",
            "A signed double-precision floating-point value.",
            "`true` or `false`.",
            "A unique identifier, serialized as a string.",
        ];
        let types = BUILT_IN_SCALARS
            .into_iter()
            .zip(descriptions)
            .map(|(name, description)| {
                let scalar = ScalarType::new(name).description(description);
                (name.to_owned(), MetaType::Scalar(scalar))
            })
            .collect();

        RegistryBuilder {
            types,
            query_type: query_type.into(),
            mutation_type: None,
        }
    }

    /// Sets the object type used as the mutation root.
    pub fn mutation(&mut self, mutation_type: impl Into<String>) -> &mut Self {
        self.mutation_type = Some(mutation_type.into());
        self
    }

    /// Adds a type declaration.
    ///
    /// Fails if a type with the same name is already registered, or if the type declares
    /// the same field, argument or enum value twice.
    pub fn register(
        &mut self,
        meta_type: impl Into<MetaType<N>>,
    ) -> Result<&mut Self, SchemaError> {
        let meta_type = meta_type.into();
        check_unique_members(&meta_type)?;

        match self.types.entry(meta_type.name().to_owned()) {
            Entry::Occupied(entry) => Err(SchemaError::DuplicateType(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(meta_type);
                Ok(self)
            }
        }
    }

    /// Checks every type reference and interface implementation, and returns the
    /// finished [`Registry`].
    pub fn finish(self) -> Result<Registry<N>, SchemaError> {
        let registry = Registry {
            types: self.types,
            query_type: self.query_type,
            mutation_type: self.mutation_type,
        };
        registry.validate()?;
        Ok(registry)
    }
}

fn check_unique_members<N>(meta_type: &MetaType<N>) -> Result<(), SchemaError> {
    let type_name = meta_type.name();
    let duplicate_field = |field: &str| SchemaError::DuplicateField {
        type_name: type_name.to_owned(),
        field: field.to_owned(),
    };

    match meta_type {
        MetaType::Scalar(_) => {}
        MetaType::Enum(enum_type) => {
            if let Some(value) = first_duplicate(enum_type.values()) {
                return Err(SchemaError::DuplicateEnumValue {
                    type_name: type_name.to_owned(),
                    value: value.to_owned(),
                });
            }
        }
        MetaType::Object(object) => {
            if let Some(field) = first_duplicate(object.fields.iter().map(Field::name)) {
                return Err(duplicate_field(field));
            }
            for field in &object.fields {
                if let Some(argument) = first_duplicate(field.arguments.iter().map(ArgumentSpec::name)) {
                    return Err(SchemaError::DuplicateArgument {
                        field: format!("{type_name}.{}", field.name),
                        argument: argument.to_owned(),
                    });
                }
            }
        }
        MetaType::Interface(interface) => {
            if let Some(field) = first_duplicate(interface.fields.iter().map(InterfaceField::name)) {
                return Err(duplicate_field(field));
            }
        }
    }

    Ok(())
}

fn first_duplicate<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    names.into_iter().find(|name| !seen.insert(*name))
}

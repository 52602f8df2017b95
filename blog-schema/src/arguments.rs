// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Binding of client-supplied arguments to the argument declarations of a field.

#[cfg(test)]
#[path = "unit_tests/arguments.rs"]
mod tests;

use indexmap::IndexMap;
use thiserror::Error;

use crate::{
    error::FieldError,
    registry::{ArgumentSpec, MetaType, Registry, TypeRef},
    value::{Name, Value},
};

/// The arguments of a field after coercion and default application.
///
/// An argument the client left out, with no declared default, is absent from the record.
/// An argument explicitly set to `null` is present with a null value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundArguments {
    field: String,
    values: IndexMap<String, Value>,
}

impl BoundArguments {
    /// Creates an empty record for the field `field`.
    pub fn new(field: impl Into<String>) -> Self {
        BoundArguments {
            field: field.into(),
            values: IndexMap::new(),
        }
    }

    /// Sets the argument `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Adds the argument `name` and returns the record.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value.into());
        self
    }

    /// The name of the field the arguments are bound for.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the value of the argument `name`, or `None` if it is absent.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns `true` if the argument `name` is present, even if null.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterates over the present arguments, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the string argument `name`.
    pub fn string(&self, name: &str) -> Result<&str, FieldError> {
        self.optional_string(name)
            .ok_or_else(|| self.missing(name))
    }

    /// Returns the string argument `name`, or `None` if it is absent or null.
    pub fn optional_string(&self, name: &str) -> Option<&str> {
        match self.values.get(name)? {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the integer argument `name`.
    pub fn int(&self, name: &str) -> Result<i64, FieldError> {
        match self.values.get(name) {
            Some(Value::Number(number)) => number.as_i64().ok_or_else(|| FieldError::InvalidArgument {
                field: self.field.clone(),
                argument: name.to_owned(),
                expected: TypeRef::INT.to_owned(),
                found: number.to_string(),
            }),
            _ => Err(self.missing(name)),
        }
    }

    /// Returns the wire name of the enum argument `name`, or `None` if it is absent or
    /// null.
    pub fn enum_name(&self, name: &str) -> Option<&str> {
        match self.values.get(name)? {
            Value::Enum(value) => Some(value.as_str()),
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    fn missing(&self, name: &str) -> FieldError {
        FieldError::MissingArgument {
            field: self.field.clone(),
            argument: name.to_owned(),
        }
    }
}

/// Binds the raw arguments `raw` of the field `field` to the declarations `specs`.
///
/// Fails on the first argument that is unknown, missing, or can't be coerced to its
/// declared type.
pub fn bind_arguments<N>(
    registry: &Registry<N>,
    field: &str,
    specs: &[ArgumentSpec],
    mut raw: IndexMap<Name, Value>,
) -> Result<BoundArguments, FieldError> {
    if let Some(unknown) = raw
        .keys()
        .find(|name| specs.iter().all(|spec| spec.name() != name.as_str()))
    {
        return Err(FieldError::UnknownArgument {
            field: field.to_owned(),
            argument: unknown.to_string(),
        });
    }

    let mut arguments = BoundArguments::new(field);
    for spec in specs {
        let value = match raw.swap_remove(spec.name()) {
            Some(value) => value,
            None => match spec.default() {
                Some(default) => default.clone(),
                None if spec.is_required() => {
                    return Err(FieldError::MissingArgument {
                        field: field.to_owned(),
                        argument: spec.name().to_owned(),
                    })
                }
                None => continue,
            },
        };

        let value = coerce_input(registry, spec.ty(), value).map_err(|error| match error {
            CoercionError::InvalidEnumValue { type_name, value } => {
                FieldError::InvalidEnumValue { type_name, value }
            }
            CoercionError::Mismatch { expected, found } => FieldError::InvalidArgument {
                field: field.to_owned(),
                argument: spec.name().to_owned(),
                expected,
                found,
            },
        })?;
        arguments.insert(spec.name(), value);
    }

    Ok(arguments)
}

/// A value that can't be coerced to an input type.
#[derive(Clone, Debug, Error, PartialEq)]
pub(crate) enum CoercionError {
    #[error("Value `{value}` is not a member of enum `{type_name}`")]
    InvalidEnumValue { type_name: String, value: String },

    #[error("Expected a value of type `{expected}`, found {found}")]
    Mismatch { expected: String, found: String },
}

/// Coerces `value` to the input type `ty`.
///
/// Enum values may be given as enum literals or as strings holding a wire name, and are
/// always returned as enum literals. A single value given for a list type becomes a
/// list of one item.
pub(crate) fn coerce_input<N>(
    registry: &Registry<N>,
    ty: &TypeRef,
    value: Value,
) -> Result<Value, CoercionError> {
    match ty {
        TypeRef::NonNull(inner) => {
            if value == Value::Null {
                return Err(CoercionError::Mismatch {
                    expected: ty.to_string(),
                    found: value.to_string(),
                });
            }
            coerce_input(registry, inner, value)
        }
        _ if value == Value::Null => Ok(Value::Null),
        TypeRef::List(inner) => match value {
            Value::List(items) => items
                .into_iter()
                .map(|item| coerce_input(registry, inner, item))
                .collect::<Result<_, _>>()
                .map(Value::List),
            item => Ok(Value::List(vec![coerce_input(registry, inner, item)?])),
        },
        TypeRef::Named(type_name) => match registry.get(type_name) {
            Some(MetaType::Enum(enum_type)) => {
                let wire_name = match &value {
                    Value::Enum(name) => Some(name.as_str()),
                    Value::String(name) => Some(name.as_str()),
                    _ => None,
                };
                match wire_name {
                    Some(name) if enum_type.contains(name) => Ok(Value::Enum(Name::new(name))),
                    _ => Err(CoercionError::InvalidEnumValue {
                        type_name: type_name.clone(),
                        value: wire_name.map_or_else(|| value.to_string(), str::to_owned),
                    }),
                }
            }
            Some(MetaType::Scalar(_)) => coerce_scalar(type_name, value),
            _ => Err(CoercionError::Mismatch {
                expected: type_name.clone(),
                found: value.to_string(),
            }),
        },
    }
}

fn coerce_scalar(type_name: &str, value: Value) -> Result<Value, CoercionError> {
    let coerced = match (type_name, &value) {
        (TypeRef::STRING, Value::String(_)) => Some(value.clone()),
        (TypeRef::ID, Value::String(_)) => Some(value.clone()),
        (TypeRef::ID, Value::Number(number)) if number.is_i64() || number.is_u64() => {
            Some(Value::String(number.to_string()))
        }
        (TypeRef::INT, Value::Number(number)) => number
            .as_i64()
            .filter(|int| i32::try_from(*int).is_ok())
            .map(|_| value.clone()),
        (TypeRef::FLOAT, Value::Number(_)) => Some(value.clone()),
        (TypeRef::BOOLEAN, Value::Boolean(_)) => Some(value.clone()),
        _ => None,
    };

    coerced.ok_or_else(|| CoercionError::Mismatch {
        expected: type_name.to_owned(),
        found: value.to_string(),
    })
}

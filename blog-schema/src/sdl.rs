// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

#[cfg(test)]
#[path = "unit_tests/sdl.rs"]
mod tests;

use std::fmt::{self, Write};

use crate::registry::{
    ArgumentSpec, EnumType, Field, InterfaceType, MetaType, ObjectType, Registry,
    BUILT_IN_SCALARS,
};

impl<N> Registry<N> {
    /// Renders the registry in GraphQL schema definition language.
    ///
    /// Types are listed in registration order, built-in scalars omitted.
    pub fn sdl(&self) -> String {
        let mut sdl = String::new();
        // Writing to a `String` can't fail.
        let _ = self.write_sdl(&mut sdl);
        sdl
    }

    /// Writes the schema definition language of the registry to `out`.
    pub fn write_sdl(&self, out: &mut impl Write) -> fmt::Result {
        for meta_type in self.types.values() {
            match meta_type {
                MetaType::Scalar(scalar) if BUILT_IN_SCALARS.contains(&scalar.name.as_str()) => {
                    continue
                }
                MetaType::Scalar(scalar) => {
                    write_description(out, scalar.description.as_deref(), "")?;
                    writeln!(out, "scalar {}", scalar.name)?;
                }
                MetaType::Enum(enum_type) => write_enum(out, enum_type)?,
                MetaType::Object(object) => write_object(out, object)?,
                MetaType::Interface(interface) => write_interface(out, interface)?,
            }
            writeln!(out)?;
        }

        writeln!(out, "schema {{")?;
        writeln!(out, "  query: {}", self.query_type)?;
        if let Some(mutation_type) = &self.mutation_type {
            writeln!(out, "  mutation: {mutation_type}")?;
        }
        writeln!(out, "}}")
    }
}

fn write_enum(out: &mut impl Write, enum_type: &EnumType) -> fmt::Result {
    write_description(out, enum_type.description.as_deref(), "")?;
    writeln!(out, "enum {} {{", enum_type.name)?;
    for value in &enum_type.values {
        writeln!(out, "  {value}")?;
    }
    writeln!(out, "}}")
}

fn write_object<N>(out: &mut impl Write, object: &ObjectType<N>) -> fmt::Result {
    write_description(out, object.description.as_deref(), "")?;
    write!(out, "type {}", object.name)?;
    if !object.interfaces.is_empty() {
        write!(out, " implements {}", object.interfaces.join(" & "))?;
    }
    writeln!(out, " {{")?;
    for field in &object.fields {
        write_field(out, field)?;
    }
    writeln!(out, "}}")
}

fn write_interface(out: &mut impl Write, interface: &InterfaceType) -> fmt::Result {
    write_description(out, interface.description.as_deref(), "")?;
    writeln!(out, "interface {} {{", interface.name)?;
    for field in &interface.fields {
        write_description(out, field.description.as_deref(), "  ")?;
        writeln!(out, "  {}: {}", field.name, field.ty)?;
    }
    writeln!(out, "}}")
}

fn write_field<N>(out: &mut impl Write, field: &Field<N>) -> fmt::Result {
    write_description(out, field.description.as_deref(), "  ")?;
    write!(out, "  {}", field.name)?;

    let multiline = field
        .arguments
        .iter()
        .any(|argument| argument.description.is_some());
    if multiline {
        writeln!(out, "(")?;
        for argument in &field.arguments {
            write_description(out, argument.description.as_deref(), "    ")?;
            write!(out, "    ")?;
            write_argument(out, argument)?;
            writeln!(out)?;
        }
        write!(out, "  )")?;
    } else if !field.arguments.is_empty() {
        write!(out, "(")?;
        for (index, argument) in field.arguments.iter().enumerate() {
            if index > 0 {
                write!(out, ", ")?;
            }
            write_argument(out, argument)?;
        }
        write!(out, ")")?;
    }

    writeln!(out, ": {}", field.ty)
}

fn write_argument(out: &mut impl Write, argument: &ArgumentSpec) -> fmt::Result {
    write!(out, "{}: {}", argument.name, argument.ty)?;
    if let Some(default) = &argument.default_value {
        write!(out, " = {default}")?;
    }
    Ok(())
}

fn write_description(out: &mut impl Write, description: Option<&str>, indent: &str) -> fmt::Result {
    let Some(description) = description else {
        return Ok(());
    };
    writeln!(out, "{indent}\"\"\"")?;
    for line in description.lines() {
        writeln!(out, "{indent}{}", line.replace("\"\"\"", "\\\"\"\""))?;
    }
    writeln!(out, "{indent}\"\"\"")
}

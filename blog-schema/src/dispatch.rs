// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Selection of the concrete object type of values typed as interfaces.

#[cfg(test)]
#[path = "unit_tests/dispatch.rs"]
mod tests;

use crate::{
    error::FieldError,
    registry::{ObjectType, Registry},
    value::Node,
};

/// Returns the object type used to resolve the fields of `node`, a value of the interface
/// `interface`.
///
/// The type is selected by the variant tag of the node, which must name a registered
/// object type implementing the interface.
pub fn resolve_concrete_type<'r, N: Node>(
    registry: &'r Registry<N>,
    interface: &str,
    node: &N,
) -> Result<&'r ObjectType<N>, FieldError> {
    node.type_name()
        .and_then(|type_name| registry.object(type_name))
        .filter(|object| object.implements(interface))
        .ok_or_else(|| FieldError::ResolutionError {
            interface: interface.to_owned(),
        })
}

// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Null propagation of field errors.
//!
//! An error raised while resolving a field nulls the nearest enclosing position whose
//! type is nullable, and is reported next to the data with the path of the field that
//! failed. An error with no nullable position above it nulls the whole response.

use std::sync::{Arc, Mutex, PoisonError};

use async_graphql::{
    extensions::{
        Extension, ExtensionContext, ExtensionFactory, NextExecute, NextResolve, ResolveInfo,
    },
    PathSegment, QueryPathNode, QueryPathSegment, Response, ServerError, ServerResult, Value,
};
use async_trait::async_trait;
use tracing::debug;

/// Installs [`NullPropagationExtension`] on every request.
pub(crate) struct NullPropagation;

impl ExtensionFactory for NullPropagation {
    fn create(&self) -> Arc<dyn Extension> {
        Arc::new(NullPropagationExtension::default())
    }
}

/// Collects the errors caught at nullable positions during one request.
#[derive(Default)]
struct NullPropagationExtension {
    errors: Mutex<Vec<ServerError>>,
}

#[async_trait]
impl Extension for NullPropagationExtension {
    async fn execute(
        &self,
        ctx: &ExtensionContext<'_>,
        operation_name: Option<&str>,
        next: NextExecute<'_>,
    ) -> Response {
        let mut response = next.run(ctx, operation_name).await;
        let caught = std::mem::take(
            &mut *self.errors.lock().unwrap_or_else(PoisonError::into_inner),
        );
        response.errors.extend(caught);
        response
    }

    async fn resolve(
        &self,
        ctx: &ExtensionContext<'_>,
        info: ResolveInfo<'_>,
        next: NextResolve<'_>,
    ) -> ServerResult<Option<Value>> {
        let path = response_path(info.path_node);
        let nullable = !info.return_type.ends_with('!');

        let mut error = match next.run(ctx, info).await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };
        if error.path.is_empty() {
            error.path = path;
        }
        if !nullable {
            return Err(error);
        }

        debug!(message = %error.message, path = ?error.path, "Nulled field after error");
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(error);
        Ok(None)
    }
}

/// The path of `node` in the response, from the root.
fn response_path(node: &QueryPathNode<'_>) -> Vec<PathSegment> {
    let mut path = std::iter::once(node)
        .chain(node.parents())
        .map(|node| match node.segment {
            QueryPathSegment::Name(name) => PathSegment::Field(name.to_owned()),
            QueryPathSegment::Index(index) => PathSegment::Index(index),
        })
        .collect::<Vec<_>>();
    path.reverse();
    path
}

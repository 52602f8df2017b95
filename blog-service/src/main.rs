// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use anyhow::Context as _;
use blog_base::{Store, SystemClock};
use blog_schema::blog::blog_schema;
use blog_service::{router, ServiceOptions, GRAPHQL_PATH};
use clap::Parser as _;
use tokio::net::TcpListener;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options = ServiceOptions::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let clock = Arc::new(SystemClock);
    let store = if options.empty {
        Store::new(clock)
    } else {
        Store::with_seed_data(clock)
    };
    let schema = blog_schema(Arc::new(store)).context("Failed to build the blog schema")?;
    let app = router(Arc::new(schema), !options.no_graphiql);

    let address = options.address();
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to listen on {address}"))?;
    info!("Serving GraphQL on http://{address}{GRAPHQL_PATH}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "Failed to listen for the shutdown signal");
    }
}

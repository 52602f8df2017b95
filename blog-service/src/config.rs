// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

#[cfg(test)]
#[path = "unit_tests/config.rs"]
mod tests;

use std::net::{IpAddr, SocketAddr};

use clap::Parser;

/// Serves the blog schema over HTTP.
#[derive(Clone, Debug, Parser)]
#[command(name = "blog-service", version, about)]
pub struct ServiceOptions {
    /// The address to listen on.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// The port to listen on.
    #[arg(long, env = "BLOG_SERVICE_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Don't serve the GraphiQL IDE on `GET /graphql`.
    #[arg(long)]
    pub no_graphiql: bool,

    /// Start with empty tables instead of the seed data.
    #[arg(long)]
    pub empty: bool,
}

impl ServiceOptions {
    /// The socket address to listen on.
    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use test_case::test_case;

use super::*;

#[test]
fn defaults() {
    let options = ServiceOptions::try_parse_from(["blog-service"]).unwrap();

    assert_eq!(options.host, IpAddr::from([127, 0, 0, 1]));
    assert!(!options.no_graphiql);
    assert!(!options.empty);
}

#[test]
fn flags() {
    let options = ServiceOptions::try_parse_from([
        "blog-service",
        "--host",
        "0.0.0.0",
        "--port",
        "9000",
        "--no-graphiql",
        "--empty",
    ])
    .unwrap();

    assert_eq!(options.address(), "0.0.0.0:9000".parse().unwrap());
    assert!(options.no_graphiql);
    assert!(options.empty);
}

#[test_case("--port", "http" ; "non numeric port")]
#[test_case("--port", "65536" ; "port out of range")]
#[test_case("--host", "localhost" ; "host name")]
fn invalid_option(flag: &str, value: &str) {
    assert!(ServiceOptions::try_parse_from(["blog-service", flag, value]).is_err());
}

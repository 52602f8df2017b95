// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The records a freshly started blog is populated with.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::data_types::{Author, Category, Comment, Post};

pub(crate) fn authors() -> Vec<Author> {
    [
        ("seabaylea", "Chris Bailey", "@Chris__Bailey"),
        ("eeckstein", "Erik Eckstein", "@eeckstein"),
        ("tkremenek", "Ted Kremenek", "@tkremenek"),
    ]
    .into_iter()
    .map(|(id, name, twitter_handle)| Author {
        id: id.to_owned(),
        name: name.to_owned(),
        twitter_handle: Some(twitter_handle.to_owned()),
    })
    .collect()
}

pub(crate) fn posts(date: DateTime<Utc>) -> Vec<Post> {
    vec![
        Post {
            id: "0176413761b289e6d64c2c14a758c1c7".to_owned(),
            author: "seabaylea".to_owned(),
            category: Some(Category::Server),
            content: "Since Swift became available on Linux there has been a huge amount of \
                interest in using Swift on the server, resulting in the emergence of a number of \
                Web Frameworks, including Kitura, Vapor, Perfect, and Zewo, along with many \
                others. As an important part of the Swift ecosystem, and one that we are keen to \
                foster, we are today announcing the formation of the Server APIs work group.\n\n\
                The work group provides the framework for participants in the the community with \
                an interest in building server applications and frameworks to come together to \
                work on providing new Swift APIs. These APIs will provide low level “server” \
                functions as the basic building blocks for developing server-side capabilities, \
                removing the reliance on interfacing with generally platform specific C \
                libraries for these functions. This will enable more developers to create \
                frameworks and server applications using pure-Swift code, without the need to \
                also have systems programming skills and knowledge of multiple platforms.\n\n\
                The work group will initially be looking at APIs for networking, security, and \
                HTTP/WebSocket parsing, with the goal of making it possible for anyone to build \
                a simple, secure, HTTP server, or to start to build other server frameworks like \
                pub/sub message brokers.\n\n\
                For more information, take a look at the Server APIs project page."
                .to_owned(),
            date,
            summary: "Since Swift became available on Linux there has been a huge amount of \
                interest in using Swift on the server..."
                .to_owned(),
            title: "Server APIs Work Group".to_owned(),
        },
        Post {
            id: "03390abb5570ce03ae524397d215713b".to_owned(),
            author: "eeckstein".to_owned(),
            category: Some(Category::Optimization),
            content: "Whole-module optimization is an optimization mode of the Swift compiler. \
                The performance win of whole-module optimization heavily depends on the project, \
                but it can be up to two or even five times.\n\n\
                Whole-module optimization can be enabled with the -whole-module-optimization (or \
                -wmo) compiler flag, and in Xcode 8 it is turned on by default for new projects. \
                Also the Swift Package Manager compiles with whole-module optimizations in \
                release builds.\n\n\
                So what is it about? Let’s first look at how the compiler works without \
                whole-module optimizations."
                .to_owned(),
            date,
            summary: "Whole-module optimization is an optimization mode of the Swift compiler. \
                The performance win of whole-module optimization heavily depends on the project, \
                but it can be up to two or even five times..."
                .to_owned(),
            title: "Whole-Module Optimization in Swift 3".to_owned(),
        },
        Post {
            id: "0be4bea0330ccb5ecf781a9f69a64bc8".to_owned(),
            author: "tkremenek".to_owned(),
            category: Some(Category::Release),
            content: "Swift 3.0, the first major release of Swift since it was open-sourced, is \
                now officially released! Swift 3 is a huge release containing major improvements \
                and refinements to the core language and Standard Library, major additions to \
                the Linux port of Swift, and the first official release of the Swift Package \
                Manager."
                .to_owned(),
            date,
            summary: "Swift 3.0, the first major release of Swift since it was open-sourced, is \
                now officially released!.."
                .to_owned(),
            title: "Swift 3.0 Released!".to_owned(),
        },
    ]
}

pub(crate) fn comments() -> Vec<Comment> {
    vec![
        comment("This is a very good blog post", "tkremenek"),
        comment("Keep up the good work", "seabaylea"),
    ]
}

pub(crate) fn replies() -> Vec<Comment> {
    vec![
        comment("Thank You!", "eeckstein"),
        comment(
            "If you need more information, just contact me.",
            "eeckstein",
        ),
    ]
}

fn comment(content: &str, author: &str) -> Comment {
    Comment {
        id: Uuid::new_v4().to_string().to_uppercase(),
        content: content.to_owned(),
        author: author.to_owned(),
        timestamp: None,
    }
}

// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The records kept by the blog [`Store`](crate::Store).

#[cfg(test)]
#[path = "unit_tests/data_types.rs"]
mod tests;

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::UnknownCategory;

/// The number of user-perceived characters (grapheme clusters) of a post's content used as
/// its summary when none is given.
pub const SUMMARY_LENGTH: usize = 100;

/// A category of the blog.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Category {
    /// Posts about Swift on the server.
    #[serde(rename = "SERVER")]
    Server,

    /// Posts about compiler optimizations.
    #[serde(rename = "OPTIMIZATION")]
    Optimization,

    /// Release announcements.
    #[serde(rename = "RELEASE")]
    Release,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 3] = [Category::Server, Category::Optimization, Category::Release];

    /// The name used for the category on the wire.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Category::Server => "SERVER",
            Category::Optimization => "OPTIMIZATION",
            Category::Release => "RELEASE",
        }
    }

    /// The internal slug of the category.
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Server => "server-side-swift",
            Category::Optimization => "optimization",
            Category::Release => "release",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.wire_name())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.wire_name() == name)
            .ok_or_else(|| UnknownCategory(name.to_owned()))
    }
}

/// An author of posts and comments.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// The unique ID of the author.
    pub id: String,
    /// The display name.
    pub name: String,
    /// The Twitter handle, including the leading `@`.
    pub twitter_handle: Option<String>,
}

/// A comment on a post.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// The ID of the comment.
    pub id: String,
    /// The text of the comment.
    pub content: String,
    /// The ID of the [`Author`] who wrote the comment.
    pub author: String,
    /// Seconds since the Unix epoch at which the comment was written, if known.
    pub timestamp: Option<f64>,
}

/// A blog post.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// The unique ID of the post.
    pub id: String,
    /// The ID of the [`Author`] who wrote the post.
    pub author: String,
    /// The category the post is filed under, if any.
    pub category: Option<Category>,
    /// The full text.
    pub content: String,
    /// When the post was published.
    pub date: DateTime<Utc>,
    /// A short version of the content.
    pub summary: String,
    /// The title.
    pub title: String,
}

impl Post {
    /// Returns the publication date in seconds since the Unix epoch.
    pub fn timestamp(&self) -> f64 {
        self.date.timestamp() as f64 + f64::from(self.date.timestamp_subsec_nanos()) / 1e9
    }
}

/// The input of a post creation.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    /// The ID the post should have.
    pub id: String,
    /// The title.
    pub title: String,
    /// The full text.
    pub content: String,
    /// The summary, derived from the content when absent.
    pub summary: Option<String>,
    /// The category, if any.
    pub category: Option<Category>,
    /// The ID of the [`Author`] writing the post.
    pub author: String,
}

impl NewPost {
    /// Builds the [`Post`] published at `date`.
    ///
    /// A missing summary becomes the first [`SUMMARY_LENGTH`] grapheme clusters of the
    /// content.
    pub fn into_post(self, date: DateTime<Utc>) -> Post {
        let summary = self.summary.unwrap_or_else(|| {
            self.content
                .graphemes(true)
                .take(SUMMARY_LENGTH)
                .collect()
        });
        Post {
            id: self.id,
            author: self.author,
            category: self.category,
            content: self.content,
            date,
            summary,
            title: self.title,
        }
    }
}

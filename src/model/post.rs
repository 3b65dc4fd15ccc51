use chrono::{DateTime, Datelike, Local, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Comment;

/// A blog post document
///
/// Field order matches the stored layout. `post` is the raw markdown body
/// on disk; reads that render it hand back a copy with HTML in its place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    /// Generated identity (the document file stem)
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Author identifier
    pub name: String,
    /// Short excerpt shown in listings
    #[serde(default)]
    pub head: String,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub post: String,
    /// Pageviews
    #[serde(default)]
    pub pv: u64,
    pub time: PostTime,
}

impl Post {
    /// The `(name, day, title)` triple this post is looked up by
    pub fn key(&self) -> PostKey {
        PostKey::new(&self.name, &self.time.day, &self.title)
    }

    pub fn matches_key(&self, key: &PostKey) -> bool {
        self.name == key.name && self.time.day == key.day && self.title == key.title
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Creation instant plus the coarser forms queries filter on
///
/// Computed once when a post is created and never rewritten. The string
/// forms are not zero padded except for minutes (`2024-3-7 9:05`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostTime {
    pub date: DateTime<Local>,
    pub year: i32,
    /// `YYYY-M`
    pub month: String,
    /// `YYYY-M-D`
    pub day: String,
    /// `YYYY-M-D H:MM`
    pub minute: String,
}

impl PostTime {
    pub fn now() -> Self {
        Self::from_date(Local::now())
    }

    pub fn from_date(date: DateTime<Local>) -> Self {
        let year = date.year();
        let month = format!("{}-{}", year, date.month());
        let day = format!("{}-{}", month, date.day());
        let minute = format!("{} {}:{:02}", day, date.hour(), date.minute());

        Self {
            date,
            year,
            month,
            day,
            minute,
        }
    }
}

/// Fields a caller supplies when writing a new post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPost {
    pub name: String,
    pub head: String,
    pub title: String,
    pub tags: Vec<String>,
    pub post: String,
}

impl NewPost {
    pub fn new(name: impl Into<String>, title: impl Into<String>, post: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            post: post.into(),
            ..Default::default()
        }
    }

    pub fn with_head(mut self, head: impl Into<String>) -> Self {
        self.head = head.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Build the full document: no pageviews, no comments yet
    pub fn into_post(self, id: impl Into<String>, time: PostTime) -> Post {
        Post {
            id: id.into(),
            name: self.name,
            head: self.head,
            title: self.title,
            tags: self.tags,
            comments: Vec::new(),
            post: self.post,
            pv: 0,
            time,
        }
    }
}

/// Lookup triple identifying a post: author, creation day and title
///
/// Nothing enforces uniqueness; callers pick values that make it unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostKey {
    pub name: String,
    /// Same format as [`PostTime::day`]
    pub day: String,
    pub title: String,
}

impl PostKey {
    pub fn new(name: impl Into<String>, day: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            day: day.into(),
            title: title.into(),
        }
    }
}

impl fmt::Display for PostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.name, self.day, self.title)
    }
}

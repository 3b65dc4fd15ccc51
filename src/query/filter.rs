//! Post filters

use crate::error::{Error, Result};
use crate::model::{Post, PostKey};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// How a search keyword is turned into a title pattern
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// The keyword matches itself only; regex metacharacters are escaped
    #[default]
    Literal,
    /// The keyword is used as a regular expression as given
    Pattern,
}

/// A predicate over posts
#[derive(Debug, Clone)]
pub enum Filter {
    /// Every post
    All,
    /// Exact match on the `(name, time.day, title)` triple
    Key(PostKey),
    /// Posts whose tag list contains the tag
    Tag(String),
    /// Posts whose title matches the pattern anywhere
    Title(Regex),
}

impl Filter {
    /// Case-insensitive "title contains keyword"
    pub fn title_contains(keyword: &str, mode: SearchMode) -> Result<Self> {
        let pattern = match mode {
            SearchMode::Literal => regex::escape(keyword),
            SearchMode::Pattern => keyword.to_string(),
        };

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| Error::InvalidSearchPattern {
                pattern: keyword.to_string(),
                source,
            })?;

        Ok(Filter::Title(regex))
    }

    /// Evaluate the filter against a post
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            Filter::All => true,
            Filter::Key(key) => post.matches_key(key),
            Filter::Tag(tag) => post.has_tag(tag),
            Filter::Title(regex) => regex.is_match(&post.title),
        }
    }
}

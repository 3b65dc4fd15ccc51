//! mdblog - markdown-file post store for a single-author blog
//!
//! Posts live as markdown files with YAML frontmatter, one collection
//! directory per blog. Bodies are stored as raw markdown and rendered to
//! HTML only on the way out.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                          Blog                            │
//! │  ┌────────────┐   ┌────────────────────────────────────┐ │
//! │  │  Config    │──▶│          PostRepository            │ │
//! │  └────────────┘   │  create / get_one / get_raw /      │ │
//! │                   │  update / append_comment / remove /│ │
//! │                   │  list_page / archive / tags/search │ │
//! │                   └───────┬───────────────┬────────────┘ │
//! │                           ▼               ▼              │
//! │                   ┌──────────────┐ ┌──────────────────┐  │
//! │                   │ Query Engine │ │ MarkdownRenderer │  │
//! │                   └──────┬───────┘ └──────────────────┘  │
//! │                          ▼                               │
//! │                   ┌──────────────────────────────┐       │
//! │                   │ Collection (frontmatter + md)│       │
//! │                   └──────────────┬───────────────┘       │
//! └──────────────────────────────────┼───────────────────────┘
//!                                    ▼
//!                /collections/{collection}/{id}.md
//! ```

pub mod config;
pub mod error;
pub mod markdown;
pub mod model;
pub mod query;
pub mod repository;
pub mod storage;
pub mod validation;

pub use config::Config;
pub use error::{Error, Result};
pub use markdown::MarkdownRenderer;
pub use model::{Comment, NewPost, Page, Post, PostKey, PostTime};
pub use repository::PostRepository;
pub use storage::collection::Collection;

use std::path::PathBuf;
use tracing::debug;

/// The main blog handle
///
/// Owns the post store for one database root. Dropping it releases the
/// store; nothing is held globally.
pub struct Blog {
    /// Root path of the database
    pub root: PathBuf,
    /// Settings loaded from `.mdblog/config.yaml`
    pub config: Config,
    posts: PostRepository,
}

impl Blog {
    /// Open or create a blog at the given path
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let root = path.into();
        let config = Config::load(&root)?;

        let collection = Collection::open(&config.collection, &root);
        collection.ensure_exists().await?;
        debug!(root = %root.display(), collection = %config.collection, "blog opened");

        let posts = PostRepository::with_config(collection, &config);
        Ok(Self {
            root,
            config,
            posts,
        })
    }

    /// The post repository
    pub fn posts(&self) -> &PostRepository {
        &self.posts
    }
}

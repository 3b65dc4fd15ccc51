//! Post repository
//!
//! Every read and write against the post collection goes through
//! [`PostRepository`]. Point operations address a post by its
//! `(name, day, title)` triple and fail with [`Error::PostNotFound`] when
//! nothing matches; store failures are returned unchanged.
//!
//! Read-then-write operations (`get_one`, `update`, `append_comment`,
//! `remove`) are not atomic. Two concurrent calls on the same post can
//! both read the old document and the later write wins.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::config::{Config, DEFAULT_PAGE_SIZE};
use crate::error::{Error, Result};
use crate::markdown::MarkdownRenderer;
use crate::model::{Comment, NewPost, Page, Post, PostKey, PostTime};
use crate::query::{self, Filter, Query, SearchMode};
use crate::storage::collection::Collection;
use crate::validation::document_id;

pub struct PostRepository {
    collection: Collection,
    renderer: MarkdownRenderer,
    page_size: usize,
    search_mode: SearchMode,
}

impl PostRepository {
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            renderer: MarkdownRenderer::new(),
            page_size: DEFAULT_PAGE_SIZE,
            search_mode: SearchMode::default(),
        }
    }

    /// Build a repository with the paging and search settings of a config
    pub fn with_config(collection: Collection, config: &Config) -> Self {
        Self::new(collection)
            .with_page_size(config.page_size)
            .with_search_mode(config.search)
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Store a new post created now
    pub async fn create(&self, new_post: NewPost) -> Result<Post> {
        self.create_at(new_post, PostTime::now()).await
    }

    /// Store a new post with an explicit creation time
    pub async fn create_at(&self, new_post: NewPost, time: PostTime) -> Result<Post> {
        let id = document_id(&time.date, &new_post.title);
        let mut post = new_post.into_post(id, time);

        self.collection.insert(&mut post).await?;

        info!(id = %post.id, key = %post.key(), "post created");
        Ok(post)
    }

    /// Replace the markdown body of a post
    pub async fn update(&self, key: &PostKey, body: impl Into<String>) -> Result<()> {
        let mut post = self.find_by_key(key).await?;
        post.post = body.into();
        self.collection.update(&post).await?;

        info!(id = %post.id, "post updated");
        Ok(())
    }

    /// Append a comment after the existing ones
    pub async fn append_comment(&self, key: &PostKey, comment: Comment) -> Result<()> {
        let mut post = self.find_by_key(key).await?;
        post.comments.push(comment);
        self.collection.update(&post).await?;

        info!(id = %post.id, comments = post.comments.len(), "comment added");
        Ok(())
    }

    /// Delete a post
    pub async fn remove(&self, key: &PostKey) -> Result<()> {
        let post = self.find_by_key(key).await?;
        if !self.collection.delete(&post.id).await? {
            return Err(Error::not_found(key));
        }

        info!(id = %post.id, "post removed");
        Ok(())
    }

    // =========================================================================
    // Single-post reads
    // =========================================================================

    /// Fetch a post for display
    ///
    /// Counts one pageview, persists it, and returns a copy whose body and
    /// comment contents are rendered to HTML. The stored document keeps
    /// its markdown.
    pub async fn get_one(&self, key: &PostKey) -> Result<Post> {
        let mut post = self.find_by_key(key).await?;
        post.pv += 1;
        self.collection.update(&post).await?;

        debug!(id = %post.id, pv = post.pv, "post viewed");
        self.renderer.render_post(&mut post);
        Ok(post)
    }

    /// Fetch a post as stored, for editing
    ///
    /// No rendering and no pageview.
    pub async fn get_raw(&self, key: &PostKey) -> Result<Post> {
        self.find_by_key(key).await
    }

    // =========================================================================
    // Listings
    // =========================================================================

    /// One page of posts, newest first, bodies rendered
    ///
    /// Reads the whole collection and slices it, so `total` is the size of
    /// the full collection whatever the page.
    pub async fn list_page(&self, page: usize) -> Result<Page> {
        let all = query::execute(&self.collection, &Query::all()).await?;
        let total = all.len();

        let mut posts = query::paginate(all, page, self.page_size);
        for post in &mut posts {
            self.renderer.render_body(post);
        }

        Ok(Page {
            page,
            page_size: self.page_size,
            posts,
            total,
        })
    }

    /// Every post, newest first, unrendered
    pub async fn list_archive(&self) -> Result<Vec<Post>> {
        query::execute(&self.collection, &Query::all()).await
    }

    /// Distinct tags across all posts, sorted
    pub async fn list_tags(&self) -> Result<Vec<String>> {
        let posts = self.collection.list().await?;
        let tags: BTreeSet<String> = posts.into_iter().flat_map(|post| post.tags).collect();
        Ok(tags.into_iter().collect())
    }

    /// Posts carrying a tag, newest first
    pub async fn list_by_tag(&self, tag: &str) -> Result<Vec<Post>> {
        query::execute(&self.collection, &Query::new(Filter::Tag(tag.to_string()))).await
    }

    /// Posts whose title contains the keyword, ignoring case, newest first
    pub async fn search(&self, keyword: &str) -> Result<Vec<Post>> {
        let filter = Filter::title_contains(keyword, self.search_mode)?;
        query::execute(&self.collection, &Query::new(filter)).await
    }

    async fn find_by_key(&self, key: &PostKey) -> Result<Post> {
        let query = Query::new(Filter::Key(key.clone())).limit(1);
        query::execute(&self.collection, &query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(key))
    }
}

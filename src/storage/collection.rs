//! Collection - the directory of post documents
//!
//! One markdown file per post, named after the post's id:
//!
//! ```text
//! /collections/
//!   /posts/
//!     20240307-090500-hello.md
//!     20240308-211200-second-post.md
//! ```

use super::document;
use crate::error::{Error, Result};
use crate::model::Post;
use crate::validation::validate_document_id;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A collection of post documents
#[derive(Debug, Clone)]
pub struct Collection {
    /// Name of the collection (directory name)
    pub name: String,
    /// Path to the collection directory
    pub path: PathBuf,
}

impl Collection {
    /// Open a collection under the given database root
    pub fn open(name: impl Into<String>, base_path: &Path) -> Self {
        let name = name.into();
        let path = base_path.join("collections").join(&name);
        Self { name, path }
    }

    /// Create the collection directory if it doesn't exist
    pub async fn ensure_exists(&self) -> Result<()> {
        fs::create_dir_all(&self.path)
            .await
            .map_err(|source| Error::CollectionCreateFailed {
                name: self.name.clone(),
                source,
            })
    }

    /// List all posts in the collection, in no particular order
    ///
    /// A missing collection directory lists empty. Files that do not parse
    /// as posts are logged and skipped; IO failures abort the listing.
    pub async fn list(&self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();

        match fs::metadata(&self.path).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(Error::FileReadError {
                    path: self.path.clone(),
                    source: io::Error::new(ErrorKind::Other, "collection path is not a directory"),
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(posts),
            Err(source) => {
                return Err(Error::FileReadError {
                    path: self.path.clone(),
                    source,
                })
            }
        }

        for entry in WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|err| Error::FileReadError {
                path: err.path().unwrap_or(self.path.as_path()).to_path_buf(),
                source: io::Error::from(err),
            })?;
            let path = entry.path();
            if !path.extension().map(|e| e == "md").unwrap_or(false) {
                continue;
            }
            match self.read_document(path).await {
                Ok(post) => posts.push(post),
                Err(err @ Error::FileReadError { .. }) => return Err(err),
                Err(err) => warn!(path = %path.display(), error = %err, "skipping malformed post"),
            }
        }

        debug!(collection = %self.name, count = posts.len(), "listed posts");
        Ok(posts)
    }

    /// Insert a new post
    ///
    /// Never overwrites: if the post's id is taken, a `-2`, `-3`, ...
    /// suffix is appended and written back into `post.id`.
    pub async fn insert(&self, post: &mut Post) -> Result<()> {
        validate_document_id(&post.id)?;
        self.ensure_exists().await?;

        let content = document::render(post)?;
        let base_id = post.id.clone();
        let mut attempt = 1;

        loop {
            let path = self.document_path(&post.id);
            let opened = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await;

            match opened {
                Ok(mut file) => {
                    file.write_all(content.as_bytes())
                        .await
                        .map_err(|source| Error::FileWriteError {
                            path: path.clone(),
                            source,
                        })?;
                    file.flush()
                        .await
                        .map_err(|source| Error::FileWriteError { path, source })?;
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    attempt += 1;
                    post.id = format!("{}-{}", base_id, attempt);
                }
                Err(source) => return Err(Error::FileWriteError { path, source }),
            }
        }
    }

    /// Overwrite an existing post
    pub async fn update(&self, post: &Post) -> Result<()> {
        validate_document_id(&post.id)?;
        let path = self.document_path(&post.id);
        let content = document::render(post)?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .await
            .map_err(|source| Error::FileWriteError {
                path: path.clone(),
                source,
            })?;
        file.write_all(content.as_bytes())
            .await
            .map_err(|source| Error::FileWriteError {
                path: path.clone(),
                source,
            })?;
        file.flush()
            .await
            .map_err(|source| Error::FileWriteError { path, source })
    }

    /// Delete a post by ID
    pub async fn delete(&self, id: &str) -> Result<bool> {
        validate_document_id(id)?;
        let path = self.document_path(id);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(Error::FileRemoveError { path, source }),
        }
    }

    fn document_path(&self, id: &str) -> PathBuf {
        self.path.join(format!("{}.md", id))
    }

    /// Read a post from a path
    async fn read_document(&self, path: &Path) -> Result<Post> {
        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::MalformedDocument {
                path: path.to_path_buf(),
                message: "file name is not valid UTF-8".to_string(),
            })?;

        // Non-UTF-8 content is a bad document, not a store failure
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::InvalidData => Error::MalformedDocument {
                    path: path.to_path_buf(),
                    message: source.to_string(),
                },
                _ => Error::FileReadError {
                    path: path.to_path_buf(),
                    source,
                },
            })?;

        document::parse(id, &content).map_err(|e| Error::MalformedDocument {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

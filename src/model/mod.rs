//! Data model for blog posts
//!
//! A [`Post`] is one document in the post collection. Its `time` block is
//! derived once at creation, `pv` counts individual reads and `comments`
//! only ever grows.

mod comment;
mod page;
mod post;

pub use comment::Comment;
pub use page::Page;
pub use post::{NewPost, Post, PostKey, PostTime};

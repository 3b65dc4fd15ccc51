//! Storage layer for mdblog
//!
//! Handles reading/writing post documents as markdown with YAML frontmatter.

pub mod collection;
pub mod document;
pub mod frontmatter;

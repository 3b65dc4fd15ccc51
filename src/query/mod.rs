//! Query engine for mdblog
//!
//! Filters, newest-first ordering and paging over the post collection.

mod executor;
pub mod filter;

pub use executor::{execute, paginate, sort_newest_first, Query};
pub use filter::{Filter, SearchMode};

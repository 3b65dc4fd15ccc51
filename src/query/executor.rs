//! Query execution against a collection
//!
//! Every query reads the whole collection, filters in memory, then orders
//! newest first before applying the limit.

use crate::error::Result;
use crate::model::Post;
use crate::storage::collection::Collection;
use std::cmp::Ordering;
use tracing::debug;

use super::filter::Filter;

/// A filtered, newest-first read of the post collection
#[derive(Debug, Clone)]
pub struct Query {
    pub filter: Filter,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            limit: None,
        }
    }

    pub fn all() -> Self {
        Self::new(Filter::All)
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Execute a query
pub async fn execute(collection: &Collection, query: &Query) -> Result<Vec<Post>> {
    let mut posts = collection.list().await?;

    posts.retain(|post| query.filter.matches(post));
    sort_newest_first(&mut posts);

    if let Some(limit) = query.limit {
        posts.truncate(limit);
    }

    debug!(filter = ?query.filter, matched = posts.len(), "query executed");
    Ok(posts)
}

/// Order by creation instant, most recent first
///
/// Posts created in the same instant fall back to descending id.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| match b.time.date.cmp(&a.time.date) {
        Ordering::Equal => b.id.cmp(&a.id),
        other => other,
    });
}

/// Slice the 1-based `page` of `page_size` posts out of a full listing
///
/// Page `0` and pages past the end are empty.
pub fn paginate(posts: Vec<Post>, page: usize, page_size: usize) -> Vec<Post> {
    let Some(index) = page.checked_sub(1) else {
        return Vec::new();
    };
    let start = index.saturating_mul(page_size);

    posts.into_iter().skip(start).take(page_size).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewPost, PostTime};
    use chrono::{Duration, Local};

    fn posts(n: usize) -> Vec<Post> {
        let start = Local::now();
        (0..n)
            .map(|i| {
                NewPost::new("alice", format!("post {}", i), "")
                    .into_post(format!("p-{:02}", i), PostTime::from_date(start + Duration::minutes(i as i64)))
            })
            .collect()
    }

    #[test]
    fn test_sort_newest_first() {
        let mut list = posts(3);
        sort_newest_first(&mut list);

        let titles: Vec<_> = list.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["post 2", "post 1", "post 0"]);
    }

    #[test]
    fn test_sort_ties_by_id() {
        let time = PostTime::now();
        let mut list = vec![
            NewPost::new("a", "x", "").into_post("b", time.clone()),
            NewPost::new("a", "y", "").into_post("c", time.clone()),
            NewPost::new("a", "z", "").into_post("a", time),
        ];
        sort_newest_first(&mut list);

        let ids: Vec<_> = list.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_execute_filters_then_limits() {
        let tmp = tempfile::TempDir::new().unwrap();
        let collection = Collection::open("posts", tmp.path());
        for mut post in posts(5) {
            if post.id != "p-02" {
                post.tags.push("keep".to_string());
            }
            collection.insert(&mut post).await.unwrap();
        }

        let query = Query::new(Filter::Tag("keep".into())).limit(2);
        let found = execute(&collection, &query).await.unwrap();
        let ids: Vec<_> = found.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p-04", "p-03"]);

        let everything = execute(&collection, &Query::all()).await.unwrap();
        assert_eq!(everything.len(), 5);
    }

    #[test]
    fn test_paginate() {
        let list = posts(25);

        assert_eq!(paginate(list.clone(), 1, 10).len(), 10);
        assert_eq!(paginate(list.clone(), 3, 10).len(), 5);
        assert!(paginate(list.clone(), 4, 10).is_empty());
        assert!(paginate(list.clone(), 0, 10).is_empty());

        let second = paginate(list, 2, 10);
        assert_eq!(second[0].id, "p-10");
        assert_eq!(second[9].id, "p-19");
    }
}

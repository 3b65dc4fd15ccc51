use serde::Serialize;

use super::Post;

/// One window of the newest-first post listing
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// 1-based page number that was requested
    pub page: usize,
    /// Window size used for slicing
    pub page_size: usize,
    /// Posts on this page
    pub posts: Vec<Post>,
    /// Size of the whole collection, independent of the page
    pub total: usize,
}

impl Page {
    pub fn is_first_page(&self) -> bool {
        self.page <= 1
    }

    pub fn is_last_page(&self) -> bool {
        let before = self.page.saturating_sub(1) * self.page_size;
        before + self.posts.len() >= self.total
    }
}

//! Markdown to HTML rendering

use pulldown_cmark::{html, Options, Parser};

use crate::model::Post;

/// CommonMark renderer used on post reads
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }

    /// Replace a post's body with its HTML rendering
    pub fn render_body(&self, post: &mut Post) {
        post.post = self.render(&post.post);
    }

    /// Render the body and every comment's content
    pub fn render_post(&self, post: &mut Post) {
        self.render_body(post);
        for comment in &mut post.comments {
            comment.content = self.render(&comment.content);
        }
    }
}

//! Post documents on disk
//!
//! A post file holds every field in its frontmatter except `post`, which
//! is the markdown body of the file, and `_id`, which is the file stem.

use super::frontmatter;
use crate::error::{Error, Result};
use crate::model::Post;
use serde_yaml::{Mapping, Value};

const ID_FIELD: &str = "_id";
const BODY_FIELD: &str = "post";

/// Parse a post from the contents of its file
pub fn parse(id: &str, content: &str) -> Result<Post> {
    let (mut fields, body) = frontmatter::parse(content)?;

    fields.insert(Value::from(ID_FIELD), Value::from(id));
    fields.insert(Value::from(BODY_FIELD), Value::from(body));

    Ok(serde_yaml::from_value(Value::Mapping(fields))?)
}

/// Render a post back to file contents
pub fn render(post: &Post) -> Result<String> {
    let fields: Mapping = match serde_yaml::to_value(post) {
        Ok(Value::Mapping(map)) => map
            .into_iter()
            .filter(|(k, _)| !matches!(k.as_str(), Some(ID_FIELD | BODY_FIELD)))
            .collect(),
        Ok(_) => Mapping::new(),
        Err(e) => {
            return Err(Error::YamlSerializeError {
                message: e.to_string(),
            })
        }
    };

    frontmatter::render(&fields, &post.post)
}

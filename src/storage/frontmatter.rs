//! YAML frontmatter parsing and rendering
//!
//! Post files carry their fields as YAML frontmatter delimited by `---`,
//! followed by a blank line and the markdown body:
//!
//! ```markdown
//! ---
//! name: alice
//! title: Hello
//! tags:
//! - intro
//! ---
//!
//! **hi**
//! ```
//!
//! The body is returned byte for byte, so raw markdown survives a
//! render/parse cycle unchanged.

use crate::error::{Error, Result};
use serde_yaml::{Mapping, Value};

const DELIMITER: &str = "---";

/// Parse YAML frontmatter from markdown content
pub fn parse(content: &str) -> Result<(Mapping, String)> {
    let Some(rest) = content.strip_prefix(DELIMITER) else {
        // No frontmatter, entire content is body
        return Ok((Mapping::new(), content.to_string()));
    };

    let end_pos = rest.find("\n---").ok_or_else(|| Error::YamlParseError {
        message: "Unclosed frontmatter: missing closing ---".to_string(),
    })?;

    let yaml_content = rest[..end_pos].trim();
    let after = &rest[end_pos + 4..];
    let after = after.strip_prefix('\n').unwrap_or(after);
    let body = after.strip_prefix('\n').unwrap_or(after);

    let fields = match serde_yaml::from_str::<Value>(yaml_content)? {
        Value::Mapping(map) => map,
        Value::Null => Mapping::new(),
        _ => {
            return Err(Error::YamlParseError {
                message: "Frontmatter must be a YAML mapping".to_string(),
            })
        }
    };

    Ok((fields, body.to_string()))
}

/// Render fields and body back to markdown with frontmatter
pub fn render(fields: &Mapping, body: &str) -> Result<String> {
    let yaml_str = serde_yaml::to_string(fields).map_err(|e| Error::YamlSerializeError {
        message: e.to_string(),
    })?;

    Ok(format!("{DELIMITER}\n{yaml_str}{DELIMITER}\n\n{body}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter() {
        let content = r#"---
title: Hello World
pv: 42
tags:
  - rust
  - blog
---

# My Post

Some content here.
"#;

        let (fields, body) = parse(content).unwrap();

        assert_eq!(fields.get("title").and_then(Value::as_str), Some("Hello World"));
        assert_eq!(fields.get("pv").and_then(Value::as_u64), Some(42));
        assert_eq!(body, "# My Post\n\nSome content here.\n");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just a post\n\nWith no frontmatter.";
        let (fields, body) = parse(content).unwrap();

        assert!(fields.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unclosed_frontmatter() {
        let err = parse("---\ntitle: x\n\nbody").unwrap_err();
        assert!(matches!(err, Error::YamlParseError { .. }));
    }

    #[test]
    fn test_non_mapping_frontmatter() {
        let err = parse("---\n- a\n- b\n---\n\nbody").unwrap_err();
        assert!(err.to_string().contains("mapping"));
    }

    #[test]
    fn test_body_kept_verbatim() {
        let mut fields = Mapping::new();
        fields.insert("title".into(), "Test".into());

        let body = "\n\n  indented start\n---\nnot a delimiter for us\n\n";
        let rendered = render(&fields, body).unwrap();
        let (parsed_fields, parsed_body) = parse(&rendered).unwrap();

        assert_eq!(parsed_fields, fields);
        assert_eq!(parsed_body, body);
    }

    #[test]
    fn test_multiline_field_does_not_close_frontmatter() {
        let mut fields = Mapping::new();
        fields.insert("head".into(), "line one\n---\nline three".into());

        let rendered = render(&fields, "body").unwrap();
        let (parsed_fields, parsed_body) = parse(&rendered).unwrap();

        assert_eq!(
            parsed_fields.get("head").and_then(Value::as_str),
            Some("line one\n---\nline three")
        );
        assert_eq!(parsed_body, "body");
    }
}

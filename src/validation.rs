//! Input validation for mdblog
//!
//! Collection names and document ids become path components, so both are
//! restricted to a filesystem-safe alphabet. Post contents are never
//! validated.

use chrono::{DateTime, Local};
use thiserror::Error;

/// Validation errors
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid identifier '{0}': {1}")]
    InvalidIdentifier(String, &'static str),

    #[error("Identifier '{0}' is too long (max {1} characters)")]
    TooLong(String, usize),

    #[error("Identifier cannot be empty")]
    Empty,

    #[error("Reserved name: '{0}'")]
    Reserved(String),
}

/// Maximum length for identifiers
pub const MAX_IDENTIFIER_LENGTH: usize = 255;

/// Longest title slug kept in a generated document id
const MAX_SLUG_LENGTH: usize = 64;

/// Reserved names that cannot be used
const RESERVED_NAMES: &[&str] = &[
    ".", "..", "con", "prn", "aux", "nul",
    "com1", "com2", "com3", "com4", "com5", "com6", "com7", "com8", "com9",
    "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

/// Validate a collection name
///
/// Rules:
/// - Must be 1-255 characters
/// - Only alphanumeric, underscore, and hyphen allowed
/// - Cannot start with a hyphen or underscore
/// - Cannot be a reserved name (case-insensitive)
pub fn validate_collection_name(name: &str) -> Result<(), ValidationError> {
    validate_identifier(name)
}

/// Validate a document ID
///
/// Same rules as collection names
pub fn validate_document_id(id: &str) -> Result<(), ValidationError> {
    validate_identifier(id)
}

/// Core identifier validation
fn validate_identifier(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::Empty);
    }

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(ValidationError::TooLong(name.to_string(), MAX_IDENTIFIER_LENGTH));
    }

    for (i, c) in name.chars().enumerate() {
        if !c.is_ascii_alphanumeric() && c != '_' && c != '-' {
            return Err(ValidationError::InvalidIdentifier(
                name.to_string(),
                "contains invalid characters (only alphanumeric, underscore, and hyphen allowed)",
            ));
        }
        if i == 0 && (c == '-' || c == '_') {
            return Err(ValidationError::InvalidIdentifier(
                name.to_string(),
                "cannot start with hyphen or underscore",
            ));
        }
    }

    if RESERVED_NAMES.contains(&name.to_lowercase().as_str()) {
        return Err(ValidationError::Reserved(name.to_string()));
    }

    Ok(())
}

/// Derive a document id from a post's creation instant and title
///
/// `20240307-090500-hello-world`. Titles with nothing sluggable fall back
/// to `post`. The result always passes [`validate_document_id`].
pub fn document_id(date: &DateTime<Local>, title: &str) -> String {
    let mut slug = slug::slugify(title);
    if slug.len() > MAX_SLUG_LENGTH {
        slug.truncate(MAX_SLUG_LENGTH);
        let trimmed = slug.trim_end_matches('-').len();
        slug.truncate(trimmed);
    }
    if slug.is_empty() {
        slug = "post".to_string();
    }

    format!("{}-{}", date.format("%Y%m%d-%H%M%S"), slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_collection_name("posts").is_ok());
        assert!(validate_collection_name("my-posts").is_ok());
        assert!(validate_collection_name("Posts2024").is_ok());
        assert!(validate_document_id("20240307-090500-hello").is_ok());
    }

    #[test]
    fn test_path_traversal_blocked() {
        assert!(validate_collection_name("..").is_err());
        assert!(validate_collection_name("../secret").is_err());
        assert!(validate_collection_name("foo/bar").is_err());
        assert!(validate_collection_name("foo\\bar").is_err());
        assert!(validate_document_id("../../../etc/passwd").is_err());
    }

    #[test]
    fn test_invalid_characters() {
        assert!(validate_collection_name("foo bar").is_err());
        assert!(validate_collection_name("foo.bar").is_err());
        assert!(validate_collection_name("-foo").is_err());
        assert!(validate_collection_name("_foo").is_err());
    }

    #[test]
    fn test_reserved_and_empty() {
        assert!(validate_collection_name("con").is_err());
        assert!(validate_collection_name("NUL").is_err());
        assert!(validate_collection_name("").is_err());
        assert!(validate_collection_name(&"a".repeat(256)).is_err());
    }

    #[test]
    fn test_document_id_from_title() {
        let date = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 0).single().unwrap();

        assert_eq!(document_id(&date, "Hello World"), "20240307-090500-hello-world");
        assert_eq!(document_id(&date, "!!!"), "20240307-090500-post");
        assert!(validate_document_id(&document_id(&date, "Ünïcode & <tags>")).is_ok());
    }

    #[test]
    fn test_document_id_long_title() {
        let date = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 0).single().unwrap();
        let id = document_id(&date, &"word ".repeat(50));

        assert!(validate_document_id(&id).is_ok());
        assert!(!id.ends_with('-'));
        assert!(id.len() <= "20240307-090500-".len() + MAX_SLUG_LENGTH);
    }
}

//! Frontmatter parsing from markdown documents.

use super::types::{FrontMatter, ParsedDocument};
use thiserror::Error;

/// Errors that can occur during frontmatter parsing.
#[derive(Debug, Error)]
pub enum FrontmatterParseError {
    #[error("invalid YAML frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("frontmatter is not a mapping")]
    NotAMapping,
}

/// Parse frontmatter from markdown content.
///
/// Frontmatter is delimited by `---` at the start of the document:
/// ```markdown
/// ---
/// key: value
/// ---
/// # Document content
/// ```
pub fn parse(content: &str) -> Result<ParsedDocument, FrontmatterParseError> {
    let trimmed = content.trim_start();

    // Check if document starts with frontmatter delimiter
    if !trimmed.starts_with("---") {
        return Ok(ParsedDocument { frontmatter: None, body: content.to_string() });
    }

    let after_first = &trimmed[3..];

    // Skip the newline after opening ---
    let after_newline = after_first
        .strip_prefix('\n')
        .or_else(|| after_first.strip_prefix("\r\n"))
        .unwrap_or(after_first);

    let Some(end_pos) = find_closing_delimiter(after_newline) else {
        // No closing ---, treat as no frontmatter
        return Ok(ParsedDocument { frontmatter: None, body: content.to_string() });
    };

    let yaml_content = &after_newline[..end_pos];

    // Calculate body start (skip closing --- and following newline)
    let after_closing = after_newline[end_pos..].trim_start_matches([' ', '\t']);
    let after_closing = after_closing[3..].trim_start_matches([' ', '\t']);
    let body = after_closing
        .strip_prefix('\n')
        .or_else(|| after_closing.strip_prefix("\r\n"))
        .unwrap_or(after_closing)
        .to_string();

    let frontmatter = if yaml_content.trim().is_empty() {
        FrontMatter::default()
    } else {
        match serde_yaml::from_str::<serde_yaml::Value>(yaml_content)? {
            serde_yaml::Value::Mapping(mapping) => FrontMatter::from_mapping(mapping),
            serde_yaml::Value::Null => FrontMatter::default(),
            _ => return Err(FrontmatterParseError::NotAMapping),
        }
    };

    Ok(ParsedDocument { frontmatter: Some(frontmatter), body })
}

/// Byte offset of the line holding the closing `---` delimiter.
fn find_closing_delimiter(content: &str) -> Option<usize> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if line.trim() == "---" {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::FieldValue;

    #[test]
    fn parse_no_frontmatter() {
        let content = "# Hello\n\nSome content";
        let result = parse(content).unwrap();
        assert!(result.frontmatter.is_none());
        assert_eq!(result.body, content);
    }

    #[test]
    fn parse_simple_frontmatter() {
        let content = "---\ntitle: Hello\n---\n# Content";
        let result = parse(content).unwrap();
        let fm = result.frontmatter.unwrap();
        assert_eq!(fm.get_str("title"), Some("Hello"));
        assert_eq!(result.body, "# Content");
    }

    #[test]
    fn parse_keeps_field_order_and_types() {
        let content = "---\ntitle: Test\npublished: true\ndate_created: 2024-01-15 10:30\ntags:\n  - rust\n  - cli\nweight: 3\n---\n\nBody";
        let result = parse(content).unwrap();
        let fm = result.frontmatter.unwrap();

        let keys: Vec<_> = fm.keys().collect();
        assert_eq!(keys, vec!["title", "published", "date_created", "tags", "weight"]);
        assert_eq!(fm.get("published"), Some(&FieldValue::Bool(true)));
        assert_eq!(fm.get_str("date_created"), Some("2024-01-15 10:30"));
        assert_eq!(
            fm.get("tags").and_then(FieldValue::as_list),
            Some(&["rust".to_string(), "cli".to_string()][..])
        );
        assert!(matches!(fm.get("weight"), Some(FieldValue::Other(_))));
        assert_eq!(result.body, "\nBody");
    }

    #[test]
    fn parse_empty_frontmatter() {
        let content = "---\n---\n# Content";
        let result = parse(content).unwrap();
        assert!(result.frontmatter.unwrap().is_empty());
        assert_eq!(result.body, "# Content");
    }

    #[test]
    fn parse_crlf_frontmatter() {
        let content = "---\r\ntitle: Windows\r\n---\r\nBody\r\n";
        let result = parse(content).unwrap();
        assert_eq!(result.frontmatter.unwrap().get_str("title"), Some("Windows"));
        assert_eq!(result.body, "Body\r\n");
    }

    #[test]
    fn parse_unterminated_frontmatter_is_body() {
        let content = "---\ntitle: Nope\n# Content";
        let result = parse(content).unwrap();
        assert!(result.frontmatter.is_none());
        assert_eq!(result.body, content);
    }

    #[test]
    fn parse_invalid_yaml_fails() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        assert!(matches!(parse(content), Err(FrontmatterParseError::InvalidYaml(_))));
    }
}

//! Frontmatter serialization back to markdown.

use super::types::{FrontMatter, ParsedDocument};

/// Serialize a parsed document back to a markdown string.
pub fn serialize(doc: &ParsedDocument) -> String {
    if let Some(fm) = &doc.frontmatter
        && !fm.is_empty()
    {
        let yaml = frontmatter_to_yaml(fm);
        return format!("---\n{}---\n\n{}", yaml, doc.body);
    }
    doc.body.clone()
}

/// Serialize frontmatter to YAML (without delimiters), keeping field order.
pub fn frontmatter_to_yaml(fm: &FrontMatter) -> String {
    serde_yaml::to_string(&fm.to_mapping()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::FieldValue;
    use crate::frontmatter::parser::parse;

    #[test]
    fn serialize_document_without_frontmatter() {
        let doc =
            ParsedDocument { frontmatter: None, body: "# Hello\n\nWorld".to_string() };
        assert_eq!(serialize(&doc), "# Hello\n\nWorld");
    }

    #[test]
    fn serialize_document_with_frontmatter() {
        let mut fm = FrontMatter::new();
        fm.insert("title", FieldValue::Text("Test".to_string()));
        fm.insert("draft", FieldValue::Bool(false));

        let doc = ParsedDocument { frontmatter: Some(fm), body: "# Content".to_string() };

        let result = serialize(&doc);
        assert_eq!(result, "---\ntitle: Test\ndraft: false\n---\n\n# Content");
    }

    #[test]
    fn roundtrip_keeps_order() {
        let original = "---\nzeta: 1\ntitle: Hello\nalpha: true\n---\n\n# Body";
        let parsed = parse(original).unwrap();
        let reparsed = parse(&serialize(&parsed)).unwrap();

        let fm = reparsed.frontmatter.unwrap();
        let keys: Vec<_> = fm.keys().collect();
        assert_eq!(keys, vec!["zeta", "title", "alpha"]);
        assert!(reparsed.body.contains("# Body"));
    }
}

//! Wiki-style link extraction.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::code_spans::CodeSpans;

/// Matches `[[target]]`, `[[target#section|alias]]` and the embed form `![[...]]`.
pub(crate) static WIKILINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(!)?\[\[([^\[\]\r\n]+)\]\]").expect("wikilink regex is valid")
});

/// A wiki-style link found in a note body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperlink {
    /// Text before `#` and `|`, trimmed. May contain a folder path.
    pub target: String,
    /// Text after `#`, if any.
    pub section: Option<String>,
    /// Text after `|`, if non-empty.
    pub alias: Option<String>,
    /// Written as `![[...]]`.
    pub embed: bool,
    /// Byte range of the whole link in the scanned text.
    pub span: Range<usize>,
}

impl Hyperlink {
    /// Parse the text between `[[` and `]]`.
    pub fn parse(inner: &str, embed: bool, span: Range<usize>) -> Self {
        let (reference, alias) = match inner.split_once('|') {
            Some((r, a)) => (r, Some(a.trim()).filter(|a| !a.is_empty())),
            None => (inner, None),
        };
        let (target, section) = match reference.split_once('#') {
            Some((t, s)) => (t, Some(s.trim()).filter(|s| !s.is_empty())),
            None => (reference, None),
        };
        Self {
            target: target.trim().to_string(),
            section: section.map(ToOwned::to_owned),
            alias: alias.map(ToOwned::to_owned),
            embed,
            span,
        }
    }

    pub(crate) fn from_captures(caps: &Captures<'_>, offset: usize) -> Option<Self> {
        let whole = caps.get(0)?;
        let inner = caps.get(2)?.as_str();
        let span = offset + whole.start()..offset + whole.end();
        Some(Self::parse(inner, caps.get(1).is_some(), span))
    }

    /// Link to a heading of the same note (`[[#Section]]`).
    pub fn is_anchor(&self) -> bool {
        self.target.is_empty()
    }

    /// Last path component of the target.
    pub fn file_name(&self) -> &str {
        self.target.rsplit('/').next().unwrap_or(&self.target)
    }

    /// Name the link resolves by: the file name without a trailing `.md`.
    ///
    /// `[[Note.md]]` and `[[Note]]` point at the same note; a drawing stored as
    /// `Sketch.excalidraw.md` keeps its `.excalidraw` extension.
    pub fn name(&self) -> &str {
        let name = self.file_name();
        let len = name.len();
        if len > 3 && name.is_char_boundary(len - 3) && name[len - 3..].eq_ignore_ascii_case(".md")
        {
            &name[..len - 3]
        } else {
            name
        }
    }

    /// True when the link points at a non-markdown file.
    pub fn is_asset(&self) -> bool {
        has_extension(self.name())
    }

    /// Display text: the alias, else the section of a same-note link, else the
    /// target as written.
    pub fn label(&self) -> String {
        if let Some(alias) = &self.alias {
            return alias.clone();
        }
        match (&self.section, self.is_anchor()) {
            (Some(section), true) => section.clone(),
            (Some(section), false) => format!("{}#{}", self.target, section),
            (None, _) => self.target.clone(),
        }
    }
}

/// True if `name` ends in a file extension.
///
/// The extension must be ASCII alphanumeric and contain a letter, so note
/// names like `Release 1.2` or `Dr. Who` are not mistaken for files.
pub fn has_extension(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((stem, ext)) => {
            !stem.is_empty()
                && !ext.is_empty()
                && ext.bytes().all(|b| b.is_ascii_alphanumeric())
                && ext.bytes().any(|b| b.is_ascii_alphabetic())
        }
        None => false,
    }
}

/// Extract every wiki link of `text` that lies outside code.
pub fn extract_links(text: &str) -> Vec<Hyperlink> {
    extract_links_with(text, &CodeSpans::scan(text))
}

/// Like [`extract_links`] with code spans already computed.
pub fn extract_links_with(text: &str, spans: &CodeSpans) -> Vec<Hyperlink> {
    WIKILINK_RE
        .captures_iter(text)
        .filter_map(|caps| Hyperlink::from_captures(&caps, 0))
        .filter(|link| !spans.overlaps(link.span.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(text: &str) -> Vec<String> {
        extract_links(text).into_iter().map(|l| l.target).collect()
    }

    #[test]
    fn parses_all_parts() {
        let link = &extract_links("see [[Graph Theory#Trees|trees]] now")[0];
        assert_eq!(link.target, "Graph Theory");
        assert_eq!(link.section.as_deref(), Some("Trees"));
        assert_eq!(link.alias.as_deref(), Some("trees"));
        assert!(!link.embed);
        assert_eq!(link.span, 4..32);
        assert_eq!(link.label(), "trees");
    }

    #[test]
    fn embed_and_anchor_forms() {
        let links = extract_links("![[plot.png]] and [[#Intro]]");
        assert!(links[0].embed);
        assert!(links[0].is_asset());
        assert!(links[1].is_anchor());
        assert_eq!(links[1].label(), "Intro");
    }

    #[test]
    fn skips_links_in_code() {
        let text = "[[A]]\n```\n[[B]]\n```\n`[[C]]` [[D]]\n";
        assert_eq!(targets(text), vec!["A", "D"]);
    }

    #[test]
    fn link_touching_code_is_skipped() {
        assert_eq!(targets("`x`[[A]] `[[B]]` [[C]]"), vec!["A", "C"]);
    }

    #[test]
    fn name_strips_folders_and_md() {
        let link = Hyperlink::parse("Math/Algebra.md", false, 0..0);
        assert_eq!(link.file_name(), "Algebra.md");
        assert_eq!(link.name(), "Algebra");
        assert!(!link.is_asset());

        let drawing = Hyperlink::parse("Sketch.excalidraw.md", true, 0..0);
        assert_eq!(drawing.name(), "Sketch.excalidraw");
        assert!(drawing.is_asset());
    }

    #[test]
    fn extension_detection() {
        assert!(has_extension("a.pdf"));
        assert!(has_extension("b.excalidraw"));
        assert!(!has_extension("Release 1.2"));
        assert!(!has_extension("Dr. Who"));
        assert!(!has_extension(".hidden"));
        assert!(!has_extension("plain"));
    }

    #[test]
    fn empty_alias_is_ignored() {
        let link = Hyperlink::parse("Note|", false, 0..0);
        assert_eq!(link.alias, None);
        assert_eq!(link.label(), "Note");
    }

    #[test]
    fn stray_backtick_does_not_hide_later_paragraphs() {
        let text = "Press the ` key.\n\nSee [[Child]].\n\nThen ` again.\n";
        assert_eq!(targets(text), vec!["Child"]);
    }
}

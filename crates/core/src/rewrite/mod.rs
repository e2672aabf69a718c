//! Note rewriting: Obsidian markdown in, Hugo markdown out.

pub mod asset;
pub mod body;
pub mod metadata;
pub mod rules;
pub mod slug;

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

pub use asset::{AssetClass, AssetDirs, AssetRoutes, AssetSource};
pub use body::{BodyContext, rewrite_body};
pub use metadata::{parse_vault_date, transform_metadata};
pub use rules::{CodeTabs, DEFAULT_ALLOWED_KEYS, MathMacros, RewriteRules};
pub use slug::{slugify, slugify_anchor};

use crate::frontmatter::{FrontMatter, ParsedDocument, serialize};
use crate::report::Reporter;
use crate::vault::{AlternateLinkMap, NoteFlags, VaultIndex};

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("note '{note}' has no title")]
    MissingTitle { note: String },

    #[error("note '{note}' has an unreadable {key}: '{value}'")]
    InvalidDate { note: String, key: String, value: String },

    #[error("note '{note}' has neither hugo_section nor alternate_link")]
    MissingSection { note: String },

    #[error("note '{note}' has hugo_section '{section}', which leaves the content folder")]
    InvalidSection { note: String, section: String },
}

/// Shared, read-only inputs of every note rewrite.
#[derive(Clone, Copy)]
pub struct RewriteContext<'a> {
    pub index: &'a VaultIndex,
    pub alternates: &'a AlternateLinkMap,
    pub rules: &'a RewriteRules,
    pub reporter: &'a dyn Reporter,
}

/// A note ready for Hugo.
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteResult {
    pub metadata: FrontMatter,
    pub body: String,
    /// `None` when the note lives elsewhere (alternate link only) and is not written.
    pub destination_section: Option<String>,
}

impl RewriteResult {
    /// The complete markdown file.
    pub fn to_markdown(&self) -> String {
        serialize(&ParsedDocument {
            frontmatter: Some(self.metadata.clone()),
            body: self.body.clone(),
        })
    }

    /// `{content_root}/{section}/{slug}.md`, if the note is written at all.
    pub fn output_path(&self, content_root: &Path, note_id: &str) -> Option<PathBuf> {
        let section = self.destination_section.as_deref()?;
        Some(content_root.join(section).join(format!("{}.md", slugify(note_id))))
    }
}

/// Rewrite one reachable note.
///
/// A note with an alternate link but no `hugo_section` is returned
/// untouched with no destination. Otherwise the frontmatter is transformed
/// and the body rewritten.
pub fn rewrite_note(
    note_id: &str,
    doc: &ParsedDocument,
    ctx: RewriteContext<'_>,
) -> Result<RewriteResult, RewriteError> {
    let input = doc.metadata();
    let flags = NoteFlags::from_frontmatter(Some(&input));

    let section = match (flags.hugo_section, flags.alternate_link) {
        (Some(section), _) if is_relative_section(&section) => section,
        (Some(section), _) => {
            return Err(RewriteError::InvalidSection { note: note_id.to_string(), section });
        }
        (None, Some(_)) => {
            return Ok(RewriteResult {
                metadata: input,
                body: doc.body.clone(),
                destination_section: None,
            });
        }
        (None, None) => {
            return Err(RewriteError::MissingSection { note: note_id.to_string() });
        }
    };

    let metadata = transform_metadata(&input, ctx.rules, note_id)?;
    let body = rewrite_body(
        &doc.body,
        &BodyContext {
            note: note_id,
            index: ctx.index,
            alternates: ctx.alternates,
            rules: ctx.rules,
            reporter: ctx.reporter,
        },
    );

    Ok(RewriteResult { metadata, body, destination_section: Some(section) })
}

/// A section must be a plain relative path: no root, no `..`.
fn is_relative_section(section: &str) -> bool {
    Path::new(section).components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

//! Publication flags and the seed scan.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;

use super::index::{VaultIndex, note_id};
use crate::frontmatter::{
    self, FieldValue, FrontMatter, FrontmatterParseError, KnownKey, ParsedDocument,
};
use crate::report::{Event, Reporter};

/// Note id → external URL, for notes carrying `alternate_link`.
pub type AlternateLinkMap = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("broken frontmatter in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: FrontmatterParseError,
    },
}

/// The publication-relevant fields of a note's frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFlags {
    /// `published: true`.
    pub published: bool,
    /// `alternate_link: <url>`.
    pub alternate_link: Option<String>,
    /// `hugo_section: <name>`.
    pub hugo_section: Option<String>,
}

impl NoteFlags {
    pub fn from_frontmatter(fm: Option<&FrontMatter>) -> Self {
        let Some(fm) = fm else {
            return Self::default();
        };
        let text = |key: KnownKey| {
            fm.get(key.as_str())
                .and_then(FieldValue::scalar_text)
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
        };
        Self {
            published: fm
                .get(KnownKey::Published.as_str())
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            alternate_link: text(KnownKey::AlternateLink),
            hugo_section: text(KnownKey::HugoSection),
        }
    }

    /// A note may be part of the site only when it is published or linked elsewhere.
    pub fn is_publishable(&self) -> bool {
        self.published || self.alternate_link.is_some()
    }
}

/// Reads and parses notes.
pub trait NoteSource: Sync {
    fn load(&self, path: &Path) -> Result<ParsedDocument, GateError>;
}

/// Reads notes from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsNoteSource;

impl NoteSource for FsNoteSource {
    fn load(&self, path: &Path) -> Result<ParsedDocument, GateError> {
        let content = fs::read_to_string(path)
            .map_err(|source| GateError::Read { path: path.to_path_buf(), source })?;
        frontmatter::parse(&content)
            .map_err(|source| GateError::Parse { path: path.to_path_buf(), source })
    }
}

/// Outcome of scanning every note's frontmatter.
#[derive(Debug, Clone, Default)]
pub struct GateScan {
    /// Notes marked `published: true`, sorted by path.
    pub seeds: Vec<PathBuf>,
    /// Notes carrying `alternate_link`.
    pub alternates: AlternateLinkMap,
}

/// Read the frontmatter of every note in the index.
///
/// A note whose frontmatter cannot be parsed aborts the scan.
pub fn scan(
    index: &VaultIndex,
    source: &dyn NoteSource,
    reporter: &dyn Reporter,
) -> Result<GateScan, GateError> {
    let flags = index
        .notes()
        .into_par_iter()
        .map(|path| -> Result<_, GateError> {
            let doc = source.load(path)?;
            Ok((path, NoteFlags::from_frontmatter(doc.frontmatter.as_ref())))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut scan = GateScan::default();
    for (path, flags) in flags {
        if flags.published {
            reporter.report(Event::SeedFound { path: path.to_path_buf() });
            scan.seeds.push(path.to_path_buf());
        }
        if let Some(url) = flags.alternate_link {
            scan.alternates.insert(note_id(path), url);
        }
    }
    Ok(scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DuplicatePolicy;
    use crate::report::RecordingReporter;
    use std::fs;
    use tempfile::TempDir;

    fn flags(yaml: &str) -> NoteFlags {
        let doc = frontmatter::parse(&format!("---\n{yaml}\n---\nbody")).unwrap();
        NoteFlags::from_frontmatter(doc.frontmatter.as_ref())
    }

    #[test]
    fn reads_flags() {
        let f = flags("published: true\nhugo_section: blog\nalternate_link: https://x.dev");
        assert!(f.published);
        assert_eq!(f.hugo_section.as_deref(), Some("blog"));
        assert_eq!(f.alternate_link.as_deref(), Some("https://x.dev"));
        assert!(f.is_publishable());
    }

    #[test]
    fn numeric_values_count_as_text() {
        let f = flags("hugo_section: 2024\nalternate_link: 42");
        assert_eq!(f.hugo_section.as_deref(), Some("2024"));
        assert_eq!(f.alternate_link.as_deref(), Some("42"));
        assert_eq!(flags("hugo_section: ~").hugo_section, None);
    }

    #[test]
    fn published_must_be_a_boolean() {
        assert!(!flags("published: \"yes\"").published);
        assert!(!flags("published: false").is_publishable());
        assert_eq!(NoteFlags::from_frontmatter(None), NoteFlags::default());
    }

    #[test]
    fn scan_collects_seeds_and_alternates() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("B.md"), "---\npublished: true\n---\n").unwrap();
        fs::write(root.join("A.md"), "---\npublished: true\n---\n").unwrap();
        fs::write(root.join("Ext.md"), "---\nalternate_link: https://e.org\n---\n").unwrap();
        fs::write(root.join("Plain.md"), "no frontmatter").unwrap();

        let paths = ["A.md", "B.md", "Ext.md", "Plain.md"].map(|n| root.join(n));
        let reporter = RecordingReporter::new();
        let index =
            VaultIndex::from_paths(root, paths.clone(), DuplicatePolicy::Warn, &reporter)
                .unwrap();

        let scan = scan(&index, &FsNoteSource, &reporter).unwrap();
        assert_eq!(scan.seeds, vec![paths[0].clone(), paths[1].clone()]);
        assert_eq!(scan.alternates.get("Ext").map(String::as_str), Some("https://e.org"));
        assert_eq!(scan.alternates.len(), 1);
    }

    #[test]
    fn broken_yaml_aborts_scan() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Bad.md");
        fs::write(&path, "---\ntitle: [oops\n---\n").unwrap();

        let reporter = RecordingReporter::new();
        let index =
            VaultIndex::from_paths(dir.path(), [path], DuplicatePolicy::Warn, &reporter)
                .unwrap();
        assert!(matches!(
            scan(&index, &FsNoteSource, &reporter),
            Err(GateError::Parse { .. })
        ));
    }
}

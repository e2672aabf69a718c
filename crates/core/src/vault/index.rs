//! Base-name lookup over every file of the vault.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::walker::{VaultWalker, VaultWalkerError};
use crate::config::DuplicatePolicy;
use crate::report::{Event, Reporter};

#[derive(Debug, Error)]
pub enum IndexError {
    #[error(transparent)]
    Walk(#[from] VaultWalkerError),

    #[error("file name '{name}' is used by both {first} and {second}")]
    DuplicateName { name: String, first: PathBuf, second: PathBuf },
}

/// Maps each file's base name (extension included) to its absolute path.
///
/// Obsidian links by base name, so two files with the same name in
/// different folders are ambiguous; [`DuplicatePolicy`] decides what happens.
#[derive(Debug, Clone, Default)]
pub struct VaultIndex {
    root: PathBuf,
    files: HashMap<String, PathBuf>,
}

impl VaultIndex {
    /// Walk the vault and index every file.
    pub fn build(
        walker: &VaultWalker,
        policy: DuplicatePolicy,
        reporter: &dyn Reporter,
    ) -> Result<Self, IndexError> {
        let files = walker.walk()?.into_iter().map(|f| f.absolute_path);
        let index = Self::from_paths(walker.root(), files, policy, reporter)?;
        reporter.report(Event::IndexBuilt { files: index.len() });
        Ok(index)
    }

    /// Index an explicit list of paths. Later paths win on duplicates.
    pub fn from_paths(
        root: &Path,
        paths: impl IntoIterator<Item = PathBuf>,
        policy: DuplicatePolicy,
        reporter: &dyn Reporter,
    ) -> Result<Self, IndexError> {
        let mut files: HashMap<String, PathBuf> = HashMap::new();

        for path in paths {
            let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_owned)
            else {
                continue;
            };

            if let Some(previous) = files.get(&name) {
                match policy {
                    DuplicatePolicy::Error => {
                        return Err(IndexError::DuplicateName {
                            name,
                            first: previous.clone(),
                            second: path,
                        });
                    }
                    DuplicatePolicy::Warn => reporter.report(Event::DuplicateName {
                        name: name.clone(),
                        kept: path.clone(),
                        shadowed: previous.clone(),
                    }),
                }
            }
            files.insert(name, path);
        }

        Ok(Self { root: root.to_path_buf(), files })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file called `name` (extension included).
    pub fn resolve(&self, name: &str) -> Option<&Path> {
        self.files.get(name).map(PathBuf::as_path)
    }

    /// Path of the note whose id is `id`, i.e. the file `{id}.md`.
    pub fn resolve_note(&self, id: &str) -> Option<&Path> {
        self.resolve(&format!("{id}.md"))
    }

    /// All markdown files, sorted by path.
    pub fn notes(&self) -> Vec<&Path> {
        let mut notes: Vec<&Path> = self
            .files
            .values()
            .filter(|p| p.extension().is_some_and(|e| e == "md"))
            .map(PathBuf::as_path)
            .collect();
        notes.sort();
        notes
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Note id of a markdown path: its file name without `.md`.
pub fn note_id(path: &Path) -> String {
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    name.strip_suffix(".md").unwrap_or(&name).to_string()
}

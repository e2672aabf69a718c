//! Breadth-first closure of the link graph from the published seeds.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::report::{Event, Reporter};
use crate::vault::{
    AlternateLinkMap, GateError, NoteFlags, NoteSource, VaultIndex, extract_links, note_id,
};

#[derive(Debug, Error)]
pub enum ReachabilityError {
    #[error(transparent)]
    Load(#[from] GateError),

    #[error("link [[{link}]] in note '{note}' does not resolve to any note in the vault")]
    UnresolvedLink { link: String, note: String },

    #[error(
        "note '{note}' ({path}) is linked from published notes but is neither published nor has an alternate link"
    )]
    UnpublishedTarget { note: String, path: PathBuf },
}

/// Everything that ends up on the site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReachableSet {
    /// Note ids (file names without `.md`).
    pub notes: BTreeSet<String>,
    /// Asset file names, extension included.
    pub assets: BTreeSet<String>,
}

/// Grow the reachable set from `seeds`.
///
/// Seeds are always publishable. Every other note reached must be published
/// or carry an alternate link; a note with only an alternate link is a leaf
/// whose own links are not followed. Links to names in `alternates` are
/// external and never enter the set.
pub fn grow(
    seeds: &[PathBuf],
    index: &VaultIndex,
    alternates: &AlternateLinkMap,
    source: &dyn NoteSource,
    reporter: &dyn Reporter,
) -> Result<ReachableSet, ReachabilityError> {
    let seed_set: HashSet<&Path> = seeds.iter().map(PathBuf::as_path).collect();
    let mut visited: HashSet<PathBuf> = HashSet::new();
    let mut queue: VecDeque<PathBuf> = VecDeque::new();
    let mut reachable = ReachableSet::default();

    for seed in seeds {
        if visited.insert(seed.clone()) {
            queue.push_back(seed.clone());
        }
    }

    while let Some(path) = queue.pop_front() {
        let id = note_id(&path);
        let doc = source.load(&path)?;

        if !seed_set.contains(path.as_path()) {
            let flags = NoteFlags::from_frontmatter(doc.frontmatter.as_ref());
            if !flags.is_publishable() {
                return Err(ReachabilityError::UnpublishedTarget { note: id, path });
            }
            if !flags.published {
                continue;
            }
        }

        reporter.report(Event::NoteReached { id: id.clone() });
        reachable.notes.insert(id.clone());

        for link in extract_links(&doc.body) {
            if link.is_anchor() {
                continue;
            }
            let name = link.name();

            if link.is_asset() {
                if reachable.assets.insert(name.to_string()) {
                    reporter.report(Event::AssetReached {
                        id: name.to_string(),
                        note: id.clone(),
                    });
                }
                continue;
            }

            if alternates.contains_key(name) {
                reporter.report(Event::ExternalLink {
                    target: name.to_string(),
                    note: id.clone(),
                });
                continue;
            }

            let Some(target) = index.resolve_note(name) else {
                return Err(ReachabilityError::UnresolvedLink {
                    link: link.target.clone(),
                    note: id,
                });
            };

            if visited.insert(target.to_path_buf()) {
                queue.push_back(target.to_path_buf());
            }
        }
    }

    reporter.report(Event::ReachComplete {
        notes: reachable.notes.len(),
        assets: reachable.assets.len(),
    });
    Ok(reachable)
}

//! Progress and problem reporting.
//!
//! Components never log through a global; they receive a [`Reporter`] and
//! describe what happened as [`Event`]s. The CLI uses [`TracingReporter`],
//! tests use [`RecordingReporter`] to assert on what was reported.

use std::path::PathBuf;
use std::sync::Mutex;

/// Something worth telling the user about during a publish run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The vault index was built.
    IndexBuilt { files: usize },
    /// Two files share a base name; `kept` shadows `shadowed`.
    DuplicateName { name: String, kept: PathBuf, shadowed: PathBuf },
    /// A note is explicitly marked `published: true`.
    SeedFound { path: PathBuf },
    /// A note joined the reachable set.
    NoteReached { id: String },
    /// An asset link was found in `note`.
    AssetReached { id: String, note: String },
    /// A link in `note` points at an alternate (external) link.
    ExternalLink { target: String, note: String },
    /// Traversal finished.
    ReachComplete { notes: usize, assets: usize },
    /// A note was rewritten for `section`.
    NoteRendered { id: String, section: String },
    /// A reachable note is not written.
    NoteSkipped { id: String, reason: String },
    /// A note was written to disk.
    NoteWritten { path: PathBuf },
    /// An asset link in `note` has no file in the vault.
    MissingAsset { id: String, note: String },
    /// An asset was copied or converted to `destination`.
    AssetCopied { id: String, destination: PathBuf },
    /// An asset could not be copied; the run continues.
    AssetFailed { id: String, error: String },
}

/// Receiver of [`Event`]s. Must be shareable across the rewrite workers.
pub trait Reporter: Send + Sync {
    fn report(&self, event: Event);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: Event) {
        match event {
            Event::IndexBuilt { files } => {
                tracing::info!("Indexed {} vault files", files);
            }
            Event::DuplicateName { name, kept, shadowed } => {
                tracing::warn!(
                    "Duplicate file name '{}': using {}, ignoring {}",
                    name,
                    kept.display(),
                    shadowed.display()
                );
            }
            Event::SeedFound { path } => {
                tracing::info!("To publish: {}", path.display());
            }
            Event::NoteReached { id } => tracing::debug!("Reached note {}", id),
            Event::AssetReached { id, note } => {
                tracing::debug!("Reached asset {} from {}", id, note);
            }
            Event::ExternalLink { target, note } => {
                tracing::debug!("Link to {} in {} uses its alternate link", target, note);
            }
            Event::ReachComplete { notes, assets } => {
                tracing::info!("Reachable: {} notes, {} assets", notes, assets);
            }
            Event::NoteRendered { id, section } => {
                tracing::debug!("Rendered {} into section {}", id, section);
            }
            Event::NoteSkipped { id, reason } => {
                tracing::info!("Skipping {}: {}", id, reason);
            }
            Event::NoteWritten { path } => tracing::debug!("Wrote {}", path.display()),
            Event::MissingAsset { id, note } => {
                tracing::warn!("Asset {} linked from {} is not in the vault", id, note);
            }
            Event::AssetCopied { id, destination } => {
                tracing::debug!("Copied {} to {}", id, destination.display());
            }
            Event::AssetFailed { id, error } => {
                tracing::warn!("Failed to copy asset {}: {}", id, error);
            }
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<Event>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far, in arrival order.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _event: Event) {}
}

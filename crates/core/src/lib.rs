//! Core library for vaultpress.
//!
//! Publishes the part of an Obsidian vault that is reachable from explicitly
//! published notes into a Hugo content tree.
//!
//! # Modules
//!
//! - `config`: TOML configuration loading and path resolution
//! - `frontmatter`: YAML frontmatter parsing and serialization
//! - `vault`: vault walking, the file-name index, link extraction, publish gate
//! - `graph`: reachability over the wiki-link graph
//! - `rewrite`: Obsidian to Hugo content rewriting
//! - `publish`: orchestration, asset copying and site output
//! - `report`: progress and problem events handed to a [`Reporter`]

pub mod config;
pub mod frontmatter;
pub mod graph;
pub mod publish;
pub mod report;
pub mod rewrite;
pub mod vault;

pub use frontmatter::{FieldValue, FrontMatter, KnownKey, ParsedDocument};
pub use graph::{ReachabilityError, ReachableSet, grow};
pub use publish::{PublishError, PublishReport, Publisher};
pub use report::{Event, RecordingReporter, Reporter, TracingReporter};
pub use rewrite::{RewriteError, RewriteResult, RewriteRules, rewrite_note, slugify};
pub use vault::{AlternateLinkMap, Hyperlink, VaultIndex, extract_links};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Vault discovery: files, links and publication flags.
//!
//! This module walks the vault, indexes every file by base name, finds
//! wiki links outside code, and reads the frontmatter flags that decide
//! what may be published.

pub mod code_spans;
pub mod extractor;
pub mod gate;
pub mod index;
pub mod walker;

pub use code_spans::{CodeSpans, Segment};
pub use extractor::{Hyperlink, extract_links, extract_links_with, has_extension};
pub use gate::{
    AlternateLinkMap, FsNoteSource, GateError, GateScan, NoteFlags, NoteSource, scan,
};
pub use index::{IndexError, VaultIndex, note_id};
pub use walker::{VaultWalker, VaultWalkerError, WalkedFile};

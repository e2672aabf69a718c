//! Frontmatter parsing and serialization.
//!
//! This module provides functionality to:
//! - Parse YAML frontmatter from markdown documents into ordered, typed fields
//! - Serialize documents back to markdown with frontmatter

pub mod parser;
pub mod serializer;
pub mod types;

pub use parser::{FrontmatterParseError, parse};
pub use serializer::{frontmatter_to_yaml, serialize};
pub use types::{FieldValue, FrontMatter, HUGO_DATE_FORMAT, KnownKey, ParsedDocument};

//! Publishing a vault into a Hugo site.

pub mod assets;
pub mod output;
pub mod publisher;

use std::path::PathBuf;

use thiserror::Error;

pub use assets::{AssetCopier, AssetError, AssetSummary, run_converter};
pub use publisher::{PublishReport, Publisher, Reach, RenderedNote};

use crate::graph::ReachabilityError;
use crate::rewrite::RewriteError;
use crate::vault::{GateError, IndexError};

/// Errors that abort a publish run.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("{what} directory does not exist: {path}")]
    MissingDirectory { what: &'static str, path: PathBuf },

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    Reach(#[from] ReachabilityError),

    #[error(transparent)]
    Rewrite(#[from] RewriteError),

    #[error("reachable note '{0}' is missing from the index")]
    MissingNote(String),

    #[error("notes '{first}' and '{second}' would both be written to {path}")]
    OutputCollision { path: PathBuf, first: String, second: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

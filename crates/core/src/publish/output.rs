//! Site tree preparation and writing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::PublishError;

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> PublishError + '_ {
    move |source| PublishError::Io { path: path.to_path_buf(), source }
}

/// Remove `dir` and everything in it, if it exists.
pub fn remove_dir(dir: &Path) -> Result<(), PublishError> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(io_error(dir)(e)),
    }
}

/// Empty `dir`, creating it if needed.
pub fn reset_dir(dir: &Path) -> Result<(), PublishError> {
    remove_dir(dir)?;
    fs::create_dir_all(dir).map_err(io_error(dir))
}

/// Copy the tree under `from` into `to`, replacing files that exist in both.
/// Returns the number of files copied.
pub fn merge_dir(from: &Path, to: &Path) -> Result<usize, PublishError> {
    let mut copied = 0;
    for entry in WalkDir::new(from).follow_links(false) {
        let entry = entry.map_err(|e| PublishError::Io {
            path: from.to_path_buf(),
            source: e.into(),
        })?;
        let relative = entry.path().strip_prefix(from).unwrap_or(entry.path());
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(io_error(&target))?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target).map_err(io_error(&target))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_file(path: &Path, contents: &str) -> Result<(), PublishError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    fs::write(path, contents).map_err(io_error(path))
}

/// Fail unless `path` is an existing directory.
pub fn require_dir(what: &'static str, path: &Path) -> Result<(), PublishError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(PublishError::MissingDirectory { what, path: PathBuf::from(path) })
    }
}

//! Copying reachable assets into the site.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;

use crate::config::ConverterConfig;
use crate::report::{Event, Reporter};
use crate::rewrite::{AssetClass, AssetDirs, AssetRoutes, AssetSource};
use crate::vault::VaultIndex;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Per-asset failures. None of them stop a run.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("not found in the vault")]
    Missing,

    #[error("no converter configured to export {0}")]
    NoConverter(PathBuf),

    #[error("failed to start converter '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("converter exited with {0}")]
    ConverterFailed(ExitStatus),

    #[error("converter did not produce {0}")]
    NoOutput(PathBuf),

    #[error("converter timed out after {0}s")]
    Timeout(u64),

    #[error("failed to copy to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What happened to the assets of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetSummary {
    pub copied: Vec<PathBuf>,
    /// Asset name and reason.
    pub failed: Vec<(String, String)>,
}

/// Copies or converts assets into their site folders.
pub struct AssetCopier<'a> {
    pub index: &'a VaultIndex,
    pub routes: &'a AssetRoutes,
    pub dirs: &'a AssetDirs,
    pub converter: &'a ConverterConfig,
    pub reporter: &'a dyn Reporter,
}

impl AssetCopier<'_> {
    /// Publish every asset. Failures are reported and collected, never fatal.
    pub fn copy_all(&self, assets: &BTreeSet<String>) -> AssetSummary {
        let mut summary = AssetSummary::default();
        for asset in assets {
            match self.copy_one(asset) {
                Ok(destination) => {
                    self.reporter.report(Event::AssetCopied {
                        id: asset.clone(),
                        destination: destination.clone(),
                    });
                    summary.copied.push(destination);
                }
                Err(e) => {
                    self.reporter
                        .report(Event::AssetFailed { id: asset.clone(), error: e.to_string() });
                    summary.failed.push((asset.clone(), e.to_string()));
                }
            }
        }
        summary
    }

    /// Site path an asset is published to.
    pub fn destination(&self, asset: &str) -> PathBuf {
        self.dirs.dir_for(AssetClass::of(asset)).join(self.routes.published_name(asset))
    }

    fn copy_one(&self, asset: &str) -> Result<PathBuf, AssetError> {
        let destination = self.destination(asset);
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| AssetError::Io { path: parent.to_path_buf(), source })?;
        }

        match self.routes.locate(self.index, asset).ok_or(AssetError::Missing)? {
            AssetSource::Copy(source) => {
                fs::copy(source, &destination).map_err(|source| AssetError::Io {
                    path: destination.clone(),
                    source,
                })?;
            }
            AssetSource::Convert(source) => {
                run_converter(self.converter, source, &destination)?;
            }
        }
        Ok(destination)
    }
}

/// Run the configured converter, killing it once the timeout passes.
pub fn run_converter(
    config: &ConverterConfig,
    input: &Path,
    output: &Path,
) -> Result<(), AssetError> {
    let command = config
        .command
        .as_deref()
        .ok_or_else(|| AssetError::NoConverter(input.to_path_buf()))?;

    let input_str = input.to_string_lossy();
    let output_str = output.to_string_lossy();
    let args: Vec<String> = config
        .args
        .iter()
        .map(|a| a.replace("{input}", &input_str).replace("{output}", &output_str))
        .collect();

    tracing::debug!("Running converter: {} {}", command, args.join(" "));

    let mut child = Command::new(command)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| AssetError::Spawn { command: command.to_string(), source })?;

    let deadline = Instant::now() + Duration::from_secs(config.timeout_secs);
    loop {
        let waited = child.try_wait().map_err(|source| AssetError::Spawn {
            command: command.to_string(),
            source,
        })?;
        match waited {
            Some(status) if !status.success() => return Err(AssetError::ConverterFailed(status)),
            Some(_) if !output.exists() => return Err(AssetError::NoOutput(output.to_path_buf())),
            Some(_) => return Ok(()),
            None if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(AssetError::Timeout(config.timeout_secs));
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    }
}

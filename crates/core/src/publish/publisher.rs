//! The publish pipeline: index, gate, reach, rewrite, write.

use std::collections::HashMap;
use std::path::PathBuf;

use rayon::prelude::*;
use serde::Serialize;

use super::PublishError;
use super::assets::{AssetCopier, AssetSummary};
use super::output::{merge_dir, remove_dir, require_dir, reset_dir, write_file};
use crate::config::ResolvedConfig;
use crate::graph::{ReachableSet, grow};
use crate::report::{Event, Reporter};
use crate::rewrite::{AssetDirs, RewriteContext, RewriteRules, rewrite_note};
use crate::vault::{FsNoteSource, GateScan, NoteSource, VaultIndex, VaultWalker, scan};

/// Vault state after traversal.
#[derive(Debug)]
pub struct Reach {
    pub index: VaultIndex,
    pub gate: GateScan,
    pub reachable: ReachableSet,
}

/// A rewritten note and where it goes.
#[derive(Debug, Clone)]
pub struct RenderedNote {
    pub id: String,
    /// `None` when the note is not written.
    pub path: Option<PathBuf>,
    pub contents: String,
}

/// Summary of a publish run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PublishReport {
    pub dry_run: bool,
    pub seeds: usize,
    pub reachable: ReachableSet,
    /// Notes written (or that would be written).
    pub written: Vec<PathBuf>,
    /// Reachable notes published elsewhere.
    pub skipped: Vec<String>,
    /// Files merged from the manual content folder.
    pub manual_files: usize,
    pub assets: AssetSummary,
}

/// Runs the pipeline for one resolved configuration.
pub struct Publisher<'a> {
    config: &'a ResolvedConfig,
    reporter: &'a dyn Reporter,
    source: &'a dyn NoteSource,
    rules: RewriteRules,
    dirs: AssetDirs,
}

impl<'a> Publisher<'a> {
    pub fn new(config: &'a ResolvedConfig, reporter: &'a dyn Reporter) -> Self {
        Self::with_source(config, reporter, &FsNoteSource)
    }

    pub fn with_source(
        config: &'a ResolvedConfig,
        reporter: &'a dyn Reporter,
        source: &'a dyn NoteSource,
    ) -> Self {
        Self {
            config,
            reporter,
            source,
            rules: RewriteRules::from_config(&config.rewrite, &config.allowed_frontmatter_keys),
            dirs: AssetDirs {
                images_dir: config.images_dir.clone(),
                content_images_dir: config.content_images_dir.clone(),
            },
        }
    }

    /// Index the vault, find the seeds and grow the reachable set.
    pub fn reach(&self) -> Result<Reach, PublishError> {
        require_dir("vault", &self.config.vault_root)?;

        let walker = VaultWalker::with_exclusions(
            &self.config.vault_root,
            self.config.excluded_folders.clone(),
        )
        .map_err(crate::vault::IndexError::from)?;
        let index = VaultIndex::build(&walker, self.config.duplicate_names, self.reporter)?;
        let gate = scan(&index, self.source, self.reporter)?;
        let reachable =
            grow(&gate.seeds, &index, &gate.alternates, self.source, self.reporter)?;

        Ok(Reach { index, gate, reachable })
    }

    /// Rewrite every reachable note, in parallel. Nothing touches the disk.
    pub fn render(&self, reach: &Reach) -> Result<Vec<RenderedNote>, PublishError> {
        let ctx = RewriteContext {
            index: &reach.index,
            alternates: &reach.gate.alternates,
            rules: &self.rules,
            reporter: self.reporter,
        };
        let ids: Vec<&String> = reach.reachable.notes.iter().collect();

        let rendered = ids
            .into_par_iter()
            .map(|id| -> Result<RenderedNote, PublishError> {
                let path = reach
                    .index
                    .resolve_note(id)
                    .ok_or_else(|| PublishError::MissingNote(id.clone()))?;
                let doc = self.source.load(path)?;
                let result = rewrite_note(id, &doc, ctx)?;
                if let Some(section) = &result.destination_section {
                    self.reporter.report(Event::NoteRendered {
                        id: id.clone(),
                        section: section.clone(),
                    });
                }
                Ok(RenderedNote {
                    id: id.clone(),
                    path: result.output_path(&self.config.content_root, id),
                    contents: result.to_markdown(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        check_collisions(&rendered)?;
        Ok(rendered)
    }

    /// Run the whole pipeline. With `dry_run` nothing is written.
    pub fn publish(&self, dry_run: bool) -> Result<PublishReport, PublishError> {
        require_dir("site", &self.config.site_root)?;
        let reach = self.reach()?;
        let rendered = self.render(&reach)?;

        let mut report = PublishReport {
            dry_run,
            seeds: reach.gate.seeds.len(),
            reachable: reach.reachable.clone(),
            ..PublishReport::default()
        };

        for note in &rendered {
            match &note.path {
                Some(path) => report.written.push(path.clone()),
                None => {
                    self.reporter.report(Event::NoteSkipped {
                        id: note.id.clone(),
                        reason: "published through its alternate link".into(),
                    });
                    report.skipped.push(note.id.clone());
                }
            }
        }

        let copier = AssetCopier {
            index: &reach.index,
            routes: &self.rules.routes,
            dirs: &self.dirs,
            converter: &self.config.converter,
            reporter: self.reporter,
        };

        if dry_run {
            report.assets.copied =
                reach.reachable.assets.iter().map(|a| copier.destination(a)).collect();
            return Ok(report);
        }

        self.prepare_site()?;
        if let Some(manual) = &self.config.manual_content_dir {
            report.manual_files = merge_dir(manual, &self.config.content_root)?;
        }
        for note in &rendered {
            if let Some(path) = &note.path {
                write_file(path, &note.contents)?;
                self.reporter.report(Event::NoteWritten { path: path.clone() });
            }
        }
        report.assets = copier.copy_all(&reach.reachable.assets);

        Ok(report)
    }

    /// Empty the section folders and drop previously published assets.
    fn prepare_site(&self) -> Result<(), PublishError> {
        for dir in &self.config.posts_dirs {
            reset_dir(dir)?;
        }
        remove_dir(&self.dirs.images_dir)?;
        remove_dir(&self.dirs.content_images_dir)?;
        Ok(())
    }
}

/// Two notes must not be written to the same file.
fn check_collisions(rendered: &[RenderedNote]) -> Result<(), PublishError> {
    let mut seen: HashMap<&PathBuf, &str> = HashMap::new();
    for note in rendered {
        let Some(path) = &note.path else {
            continue;
        };
        if let Some(first) = seen.insert(path, &note.id) {
            return Err(PublishError::OutputCollision {
                path: path.clone(),
                first: first.to_string(),
                second: note.id.clone(),
            });
        }
    }
    Ok(())
}

//! Shared output formatting for the reach and publish commands.

use std::path::PathBuf;

use serde::Serialize;
use vaultpress_core::PublishReport;
use vaultpress_core::publish::Reach;

/// Reachability result for JSON output.
#[derive(Debug, Serialize)]
pub struct ReachOutput<'a> {
    pub seeds: &'a [PathBuf],
    pub notes: Vec<&'a str>,
    pub assets: Vec<&'a str>,
    pub alternates: Vec<&'a str>,
}

impl<'a> From<&'a Reach> for ReachOutput<'a> {
    fn from(reach: &'a Reach) -> Self {
        Self {
            seeds: &reach.gate.seeds,
            notes: reach.reachable.notes.iter().map(String::as_str).collect(),
            assets: reach.reachable.assets.iter().map(String::as_str).collect(),
            alternates: reach.gate.alternates.keys().map(String::as_str).collect(),
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> color_eyre::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a titled list, or `(none)`.
pub fn print_list<I, T>(title: &str, items: I)
where
    I: IntoIterator<Item = T>,
    T: std::fmt::Display,
{
    let items: Vec<T> = items.into_iter().collect();
    println!("{} ({}):", title, items.len());
    if items.is_empty() {
        println!("  (none)");
    }
    for item in items {
        println!("  {}", item);
    }
}

pub fn print_reach(reach: &Reach) {
    print_list("Seeds", reach.gate.seeds.iter().map(|p| p.display()));
    print_list("Notes", &reach.reachable.notes);
    print_list("Assets", &reach.reachable.assets);
}

pub fn print_report(report: &PublishReport) {
    let verb = if report.dry_run { "Would write" } else { "Wrote" };
    print_list(verb, report.written.iter().map(|p| p.display()));
    if !report.skipped.is_empty() {
        print_list("Published elsewhere", &report.skipped);
    }
    let verb = if report.dry_run { "Would copy" } else { "Copied" };
    print_list(verb, report.assets.copied.iter().map(|p| p.display()));
    if !report.assets.failed.is_empty() {
        print_list(
            "Failed assets",
            report.assets.failed.iter().map(|(name, why)| format!("{name}: {why}")),
        );
    }
    if report.manual_files > 0 {
        println!("Merged {} manual content files", report.manual_files);
    }
    println!();
    println!(
        "{} notes, {} assets reachable from {} published notes{}",
        report.reachable.notes.len(),
        report.reachable.assets.len(),
        report.seeds,
        if report.dry_run { " (dry run)" } else { "" }
    );
}

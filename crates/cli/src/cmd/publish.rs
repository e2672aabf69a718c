use std::path::Path;

use color_eyre::eyre::WrapErr;
use vaultpress_core::{Publisher, TracingReporter};

use super::output::{print_json, print_report};
use crate::PublishArgs;

pub fn run(
    config: Option<&Path>,
    profile: Option<&str>,
    verbose: bool,
    args: &PublishArgs,
) -> color_eyre::Result<()> {
    let rc = super::load_and_init(config, profile, verbose);
    let reporter = TracingReporter;

    tracing::info!(
        "Publishing {} into {}{}",
        rc.vault_root.display(),
        rc.site_root.display(),
        if args.dry_run { " (dry run)" } else { "" }
    );

    let report = Publisher::new(&rc, &reporter)
        .publish(args.dry_run)
        .wrap_err("publish aborted")?;

    if args.json {
        print_json(&report)?;
    } else {
        print_report(&report);
    }
    crate::logging::flush();
    Ok(())
}

use std::path::Path;

use color_eyre::eyre::WrapErr;
use vaultpress_core::{Publisher, TracingReporter};

use super::output::{ReachOutput, print_json, print_reach};
use crate::ReachArgs;

pub fn run(
    config: Option<&Path>,
    profile: Option<&str>,
    verbose: bool,
    args: &ReachArgs,
) -> color_eyre::Result<()> {
    let rc = super::load_and_init(config, profile, verbose);
    let reporter = TracingReporter;

    let reach = Publisher::new(&rc, &reporter)
        .reach()
        .wrap_err_with(|| format!("failed to traverse vault {}", rc.vault_root.display()))?;

    if args.json {
        print_json(&ReachOutput::from(&reach))?;
    } else {
        print_reach(&reach);
    }
    crate::logging::flush();
    Ok(())
}

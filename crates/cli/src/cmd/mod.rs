pub mod doctor;
pub mod output;
pub mod publish;
pub mod reach;

use std::path::Path;

use vaultpress_core::config::{ConfigLoader, ResolvedConfig};

/// Load configuration and start logging, or exit with the loader's error.
pub fn load_and_init(
    config: Option<&Path>,
    profile: Option<&str>,
    verbose: bool,
) -> ResolvedConfig {
    let rc = match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };
    crate::logging::init(&rc.logging, verbose);
    rc
}

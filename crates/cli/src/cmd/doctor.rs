use std::path::Path;

use vaultpress_core::config::{ConfigLoader, default_config_path};

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            crate::logging::init(&rc.logging, false);
            tracing::debug!("Configuration loaded for profile {}", rc.active_profile);

            println!("OK   vaultpress doctor");
            println!(
                "path: {}",
                config.map_or_else(
                    || default_config_path().display().to_string(),
                    |p| p.display().to_string()
                )
            );
            println!("profile: {}", rc.active_profile);
            println!("vault_root: {}{}", rc.vault_root.display(), missing(&rc.vault_root));
            println!("site_root: {}{}", rc.site_root.display(), missing(&rc.site_root));
            println!("content_root: {}", rc.content_root.display());
            for dir in &rc.posts_dirs {
                println!("posts_dir: {}", dir.display());
            }
            println!("images_dir: {}", rc.images_dir.display());
            println!("content_images_dir: {}", rc.content_images_dir.display());
            if let Some(manual) = &rc.manual_content_dir {
                println!("manual_content_dir: {}{}", manual.display(), missing(manual));
            }
            println!(
                "converter: {}",
                rc.converter.command.as_deref().unwrap_or("(none, drawings need exports)")
            );
            crate::logging::flush();
        }
        Err(e) => {
            println!("FAIL vaultpress doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}

fn missing(path: &Path) -> &'static str {
    if path.is_dir() { "" } else { " (missing)" }
}

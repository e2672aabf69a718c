use crate::config::types::{ConfigFile, LoggingConfig, Profile, ResolvedConfig};
use shellexpand::full;
use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("no profiles defined in config")]
    NoProfiles,

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("home directory not available to expand '~'")]
    NoHome,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(
        config_path: Option<&Path>,
        profile_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        Self::from_toml_str(&s, &path.display().to_string(), profile_override)
    }

    /// Parse and resolve configuration from TOML text.
    ///
    /// `origin` is only used in error messages.
    pub fn from_toml_str(
        s: &str,
        origin: &str,
        profile_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let cf: ConfigFile = toml::from_str(s)
            .map_err(|e| ConfigError::ParseError(origin.to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }
        if cf.profiles.is_empty() {
            return Err(ConfigError::NoProfiles);
        }

        let active = profile_override
            .map(ToOwned::to_owned)
            .or(cf.profile.clone())
            .unwrap_or_else(|| "default".to_string());

        let prof = cf
            .profiles
            .get(&active)
            .ok_or_else(|| ConfigError::ProfileNotFound(active.clone()))?;

        Self::resolve_profile(&active, prof, &cf)
    }

    fn resolve_profile(
        active: &str,
        prof: &Profile,
        cf: &ConfigFile,
    ) -> Result<ResolvedConfig, ConfigError> {
        let vault_root = expand_path(&prof.vault_root)?;
        let vault_sub =
            |s: &str| s.replace("{{vault_root}}", &vault_root.to_string_lossy());

        let site_root = expand_path(&vault_sub(&prof.site_root))?;
        let sub = |s: &str| {
            vault_sub(s).replace("{{site_root}}", &site_root.to_string_lossy())
        };

        let content_root = site_root.join(expand_path(&sub(&prof.content_dir))?);
        let posts_dirs = prof
            .posts_dirs
            .iter()
            .map(|d| -> Result<PathBuf, ConfigError> {
                Ok(content_root.join(expand_path(&sub(d))?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let images_dir = site_root.join(expand_path(&sub(&prof.images_dir))?);
        let content_images_dir =
            site_root.join(expand_path(&sub(&prof.content_images_dir))?);
        let manual_content_dir = match &prof.manual_content_dir {
            Some(dir) => Some(site_root.join(expand_path(&sub(dir))?)),
            None => None,
        };
        let excluded_folders =
            prof.excluded_folders.iter().map(PathBuf::from).collect();

        // Resolve log file path if present
        let logging = if let Some(ref file) = cf.logging.file {
            let expanded_file = expand_path(&sub(&file.to_string_lossy()))?;
            LoggingConfig {
                level: cf.logging.level.clone(),
                file_level: cf.logging.file_level.clone(),
                file: Some(expanded_file),
            }
        } else {
            cf.logging.clone()
        };

        Ok(ResolvedConfig {
            active_profile: active.to_string(),
            vault_root,
            site_root,
            content_root,
            posts_dirs,
            images_dir,
            content_images_dir,
            manual_content_dir,
            excluded_folders,
            allowed_frontmatter_keys: prof.allowed_frontmatter_keys.clone(),
            duplicate_names: prof.duplicate_names,
            rewrite: cf.rewrite.clone(),
            converter: cf.converter.clone(),
            logging,
        })
    }
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("vaultpress").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("vaultpress").join("config.toml")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}

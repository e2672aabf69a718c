use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub rewrite: RewriteConfig,
    #[serde(default)]
    pub converter: ConverterConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    pub vault_root: String,
    pub site_root: String,
    #[serde(default = "default_content_dir")]
    pub content_dir: String,
    /// Section directories under the content dir that are reset on every run.
    #[serde(default)]
    pub posts_dirs: Vec<String>,
    #[serde(default = "default_images_dir")]
    pub images_dir: String,
    #[serde(default = "default_content_images_dir")]
    pub content_images_dir: String,
    /// Hand-written content merged into the content dir after the reset.
    pub manual_content_dir: Option<String>,
    /// Folders to exclude from the vault walk (relative to vault_root).
    #[serde(default)]
    pub excluded_folders: Vec<String>,
    /// Frontmatter keys kept in addition to the default allow-list.
    #[serde(default)]
    pub allowed_frontmatter_keys: Vec<String>,
    #[serde(default)]
    pub duplicate_names: DuplicatePolicy,
}

/// What to do when two vault files share a base name.
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep the last file in walk order and report a warning.
    #[default]
    Warn,
    /// Abort the run.
    Error,
}

/// Rewrite tables and target-site conventions.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RewriteConfig {
    pub image_url: String,
    pub content_image_url: String,
    pub excalidraw_url: String,
    pub excalidraw_format: String,
    pub code_tabs_heading: String,
    pub code_tabs_open: String,
    pub code_tabs_close: String,
    pub topic_categories: HashMap<String, Vec<String>>,
    pub math_macros: HashMap<String, String>,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            image_url: "/images/obsidian".to_string(),
            content_image_url: "/blog/notes/images".to_string(),
            excalidraw_url: "/images/obsidian/excalidraw".to_string(),
            excalidraw_format: "svg".to_string(),
            code_tabs_heading: "Code".to_string(),
            code_tabs_open: "{{< tabs >}}".to_string(),
            code_tabs_close: "{{< /tabs >}}".to_string(),
            topic_categories: HashMap::new(),
            math_macros: HashMap::from([(
                "\\cellcolor".to_string(),
                "\\colorbox".to_string(),
            )]),
        }
    }
}

/// External drawing converter invoked for `.excalidraw` assets.
#[derive(Debug, Deserialize, Clone)]
pub struct ConverterConfig {
    pub command: Option<String>,
    #[serde(default = "default_converter_args")]
    pub args: Vec<String>,
    #[serde(default = "default_converter_timeout")]
    pub timeout_secs: u64,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            command: None,
            args: default_converter_args(),
            timeout_secs: default_converter_timeout(),
        }
    }
}

fn default_converter_args() -> Vec<String> {
    vec!["{input}".to_string(), "{output}".to_string()]
}

fn default_converter_timeout() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_content_dir() -> String {
    "content".to_string()
}

fn default_images_dir() -> String {
    "static/images/obsidian".to_string()
}

fn default_content_images_dir() -> String {
    "content/blog/notes/images".to_string()
}

/// Fully resolved configuration with absolute paths.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub vault_root: PathBuf,
    pub site_root: PathBuf,
    /// `site_root/content_dir`.
    pub content_root: PathBuf,
    /// Absolute section directories reset before writing.
    pub posts_dirs: Vec<PathBuf>,
    pub images_dir: PathBuf,
    pub content_images_dir: PathBuf,
    pub manual_content_dir: Option<PathBuf>,
    pub excluded_folders: Vec<PathBuf>,
    pub allowed_frontmatter_keys: Vec<String>,
    pub duplicate_names: DuplicatePolicy,
    pub rewrite: RewriteConfig,
    pub converter: ConverterConfig,
    pub logging: LoggingConfig,
}

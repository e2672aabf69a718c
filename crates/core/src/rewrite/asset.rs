//! Asset kinds and where each kind is published.

use std::path::{Path, PathBuf};

use super::slug::slugify;
use crate::vault::VaultIndex;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "svg", "webp", "bmp", "avif"];

/// How an asset is routed to the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetClass {
    /// Bitmap or vector image, shown inline.
    Image,
    /// Animated gif, stored next to page content.
    Animation,
    /// Excalidraw drawing, exported to an image.
    Drawing,
    /// Any other attachment, linked for download.
    Document,
}

impl AssetClass {
    pub fn of(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.ends_with(".excalidraw") || lower.ends_with(".excalidraw.md") {
            return Self::Drawing;
        }
        match lower.rsplit_once('.').map(|(_, ext)| ext) {
            Some("gif") => Self::Animation,
            Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => Self::Image,
            _ => Self::Document,
        }
    }

    /// Embeds of these classes stay images after rewriting.
    pub fn is_visual(self) -> bool {
        !matches!(self, Self::Document)
    }
}

/// URL prefixes and folders for published assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRoutes {
    pub image_url: String,
    pub content_image_url: String,
    pub drawing_url: String,
    /// `svg` or `png`.
    pub drawing_format: String,
}

impl Default for AssetRoutes {
    fn default() -> Self {
        Self {
            image_url: "/images/obsidian".into(),
            content_image_url: "/blog/notes/images".into(),
            drawing_url: "/images/obsidian/excalidraw".into(),
            drawing_format: "svg".into(),
        }
    }
}

impl AssetRoutes {
    /// File name an asset is published under.
    ///
    /// Drawings are exported, so `Sketch.excalidraw` becomes
    /// `sketch.excalidraw.svg`.
    pub fn published_name(&self, asset: &str) -> String {
        let slug = slugify(asset);
        match AssetClass::of(asset) {
            AssetClass::Drawing => {
                let stem = slug.strip_suffix(".md").unwrap_or(&slug);
                format!("{}.{}", stem, self.drawing_format)
            }
            _ => slug,
        }
    }

    /// Public URL of an asset.
    pub fn url(&self, asset: &str) -> String {
        let base = match AssetClass::of(asset) {
            AssetClass::Image | AssetClass::Document => &self.image_url,
            AssetClass::Animation => &self.content_image_url,
            AssetClass::Drawing => &self.drawing_url,
        };
        format!("{}/{}", base.trim_end_matches('/'), self.published_name(asset))
    }
}

/// Where a linked asset comes from in the vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetSource<'a> {
    /// Copied as is.
    Copy(&'a Path),
    /// A drawing without an exported image; needs the converter.
    Convert(&'a Path),
}

impl AssetRoutes {
    /// Find the vault file backing `asset`.
    ///
    /// A drawing prefers an image exported next to it (`X.excalidraw.svg`),
    /// then the drawing itself, stored as `X.excalidraw` or `X.excalidraw.md`.
    pub fn locate<'i>(&self, index: &'i VaultIndex, asset: &str) -> Option<AssetSource<'i>> {
        if AssetClass::of(asset) != AssetClass::Drawing {
            return index.resolve(asset).map(AssetSource::Copy);
        }
        let stem = asset.strip_suffix(".md").unwrap_or(asset);
        index
            .resolve(&format!("{stem}.{}", self.drawing_format))
            .map(AssetSource::Copy)
            .or_else(|| index.resolve(stem).map(AssetSource::Convert))
            .or_else(|| index.resolve(&format!("{stem}.md")).map(AssetSource::Convert))
    }
}

/// Site folders assets are copied into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDirs {
    pub images_dir: PathBuf,
    pub content_images_dir: PathBuf,
}

impl AssetDirs {
    pub fn drawings_dir(&self) -> PathBuf {
        self.images_dir.join("excalidraw")
    }

    /// Folder for an asset of `class`.
    pub fn dir_for(&self, class: AssetClass) -> PathBuf {
        match class {
            AssetClass::Image | AssetClass::Document => self.images_dir.clone(),
            AssetClass::Animation => self.content_images_dir.clone(),
            AssetClass::Drawing => self.drawings_dir(),
        }
    }
}

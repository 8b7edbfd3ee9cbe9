//! Gallery configuration module.
//!
//! Handles loading and validating `wallgen.toml`. There is exactly one config
//! file per gallery, at the gallery root; every value has a stock default, so
//! the file itself is optional.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! base_url = "https://wallpaperverse.akshthakkar.me"
//!
//! [paths]
//! source = "wallpapers"            # Category tree of source images
//! optimized = "optimized"          # Full-size derivatives (created)
//! thumbnails = "thumbnails"        # Thumbnail derivatives (created)
//! manifest = "wallpapers.json"
//! sitemap = "sitemap.xml"
//! cache = ".wallgen-cache.json"
//!
//! [images]
//! full_size = [1920, 1080]         # Full derivative frame
//! thumb_size = [600, 338]          # Thumbnail frame (same aspect, ±1 px)
//! format = "webp"                  # "webp" or "jpeg"
//! quality = 85
//! thumb_quality = 70
//! fallback_quality = 80            # Contain-on-black retry qualities
//! fallback_thumb_quality = 60
//! portrait = "letterbox-blur"      # or "cover-rotate"
//!
//! [titles]
//! strip_prefixes = ["demon-slayer-", "marvel-", ...]
//! strip_suffixes = ["-wallpaper"]
//!
//! [[sitemap.pages]]
//! path = "/"
//! changefreq = "weekly"
//! priority = 1.0
//! ```
//!
//! Config files are sparse — override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::imaging::{
    FrameSize, OutputFormat, PortraitProfile, Quality, expected_thumb_height,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the gallery root.
pub const CONFIG_FILE: &str = "wallgen.toml";

const CHANGEFREQ_VALUES: &[&str] = &[
    "always", "hourly", "daily", "weekly", "monthly", "yearly", "never",
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `wallgen.toml`.
///
/// All fields have stock defaults. User config files need only specify the
/// values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Published site identity (sitemap URLs).
    pub site: SiteSection,
    /// Where sources live and outputs land, relative to the gallery root.
    pub paths: PathsSection,
    /// Derivative frames, encoding, and portrait treatment.
    pub images: ImagesSection,
    /// Title derivation dictionaries.
    pub titles: TitlesSection,
    /// Static sitemap entries.
    pub sitemap: SitemapSection,
}

/// Published site identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Base URL for sitemap entries, without a trailing slash.
    pub base_url: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            base_url: "https://wallpaperverse.akshthakkar.me".to_string(),
        }
    }
}

/// Filesystem layout, relative to the gallery root (absolute paths allowed).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsSection {
    /// Source tree: one subdirectory per category.
    pub source: String,
    /// Mirrored full-size derivative tree.
    pub optimized: String,
    /// Mirrored thumbnail derivative tree.
    pub thumbnails: String,
    /// Manifest JSON file.
    pub manifest: String,
    /// Sitemap XML file.
    pub sitemap: String,
    /// Staleness ledger file.
    pub cache: String,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            source: "wallpapers".to_string(),
            optimized: "optimized".to_string(),
            thumbnails: "thumbnails".to_string(),
            manifest: "wallpapers.json".to_string(),
            sitemap: "sitemap.xml".to_string(),
            cache: ".wallgen-cache.json".to_string(),
        }
    }
}

/// Derivative rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesSection {
    /// Full derivative frame as `[width, height]`.
    pub full_size: FrameSize,
    /// Thumbnail frame as `[width, height]`. Must match the full frame's
    /// aspect ratio to within ±1 px of height.
    pub thumb_size: FrameSize,
    /// Derivative encoding.
    pub format: OutputFormat,
    /// Full derivative quality (1-100).
    pub quality: Quality,
    /// Thumbnail quality (1-100).
    pub thumb_quality: Quality,
    /// Full quality for the contain-on-black fallback renders.
    pub fallback_quality: Quality,
    /// Thumbnail quality for the contain-on-black fallback renders.
    pub fallback_thumb_quality: Quality,
    /// Treatment for portrait sources.
    pub portrait: PortraitProfile,
}

impl Default for ImagesSection {
    fn default() -> Self {
        Self {
            full_size: FrameSize::new(1920, 1080),
            thumb_size: FrameSize::new(600, 338),
            format: OutputFormat::default(),
            quality: Quality(85),
            thumb_quality: Quality(70),
            fallback_quality: Quality(80),
            fallback_thumb_quality: Quality(60),
            portrait: PortraitProfile::default(),
        }
    }
}

/// Title derivation dictionaries. Matching is case-insensitive; the first
/// matching entry wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TitlesSection {
    /// Franchise/series prefixes stripped from display titles.
    pub strip_prefixes: Vec<String>,
    /// Suffixes stripped from display titles (identifiers keep them).
    pub strip_suffixes: Vec<String>,
}

impl Default for TitlesSection {
    fn default() -> Self {
        Self {
            strip_prefixes: [
                "demon-slayer-",
                "jujutsu-kaisen-",
                "marvel-",
                "dc-",
                "movie-",
                "tv-show-",
                "disney-",
                "football-",
                "wanderlust-",
                "sneaker-",
            ]
            .map(String::from)
            .to_vec(),
            strip_suffixes: vec!["-wallpaper".to_string()],
        }
    }
}

/// Static sitemap entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapSection {
    pub pages: Vec<StaticPage>,
}

impl Default for SitemapSection {
    fn default() -> Self {
        Self {
            pages: vec![
                StaticPage {
                    path: "/".to_string(),
                    changefreq: Some("weekly".to_string()),
                    priority: 1.0,
                },
                StaticPage {
                    path: "/submit".to_string(),
                    changefreq: Some("monthly".to_string()),
                    priority: 0.8,
                },
                StaticPage {
                    path: "/collection.html".to_string(),
                    changefreq: Some("weekly".to_string()),
                    priority: 0.9,
                },
            ],
        }
    }
}

/// One static page in the sitemap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticPage {
    /// Site-relative path, starting with `/`.
    pub path: String,
    /// Optional `<changefreq>` value.
    pub changefreq: Option<String>,
    /// `<priority>` value, 0.0 through 1.0.
    pub priority: f64,
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "site.base_url must not be empty".into(),
            ));
        }
        if self.site.base_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.base_url must not end with a slash".into(),
            ));
        }

        let entries = [
            ("paths.source", &self.paths.source),
            ("paths.optimized", &self.paths.optimized),
            ("paths.thumbnails", &self.paths.thumbnails),
            ("paths.manifest", &self.paths.manifest),
            ("paths.sitemap", &self.paths.sitemap),
            ("paths.cache", &self.paths.cache),
        ];
        let mut seen = HashSet::new();
        for (key, value) in entries {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
            if !seen.insert(value.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "paths entries must be distinct ({value} appears twice)"
                )));
            }
        }

        let frames = [
            ("images.full_size", self.images.full_size),
            ("images.thumb_size", self.images.thumb_size),
        ];
        for (key, frame) in frames {
            if frame.width == 0 || frame.height == 0 {
                return Err(ConfigError::Validation(format!(
                    "{key} dimensions must be non-zero"
                )));
            }
        }

        let expected = expected_thumb_height(
            self.images.full_size.as_tuple(),
            self.images.thumb_size.width,
        );
        let drift = i64::from(self.images.thumb_size.height) - i64::from(expected);
        if drift.abs() > 1 {
            return Err(ConfigError::Validation(format!(
                "images.thumb_size must keep the full_size aspect ratio \
                 (expected height {expected} ±1 for width {}, got {})",
                self.images.thumb_size.width, self.images.thumb_size.height
            )));
        }

        let qualities = [
            ("images.quality", self.images.quality),
            ("images.thumb_quality", self.images.thumb_quality),
            ("images.fallback_quality", self.images.fallback_quality),
            (
                "images.fallback_thumb_quality",
                self.images.fallback_thumb_quality,
            ),
        ];
        for (key, quality) in qualities {
            if quality.value() < 1 || quality.value() > 100 {
                return Err(ConfigError::Validation(format!("{key} must be 1-100")));
            }
        }

        for prefix in &self.titles.strip_prefixes {
            if prefix.is_empty() {
                return Err(ConfigError::Validation(
                    "titles.strip_prefixes entries must not be empty".into(),
                ));
            }
        }
        for suffix in &self.titles.strip_suffixes {
            if suffix.is_empty() {
                return Err(ConfigError::Validation(
                    "titles.strip_suffixes entries must not be empty".into(),
                ));
            }
        }

        for page in &self.sitemap.pages {
            if !page.path.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "sitemap page path must start with '/' (got {})",
                    page.path
                )));
            }
            if !(0.0..=1.0).contains(&page.priority) {
                return Err(ConfigError::Validation(format!(
                    "sitemap page priority must be 0.0-1.0 (got {})",
                    page.priority
                )));
            }
            if let Some(freq) = &page.changefreq
                && !CHANGEFREQ_VALUES.contains(&freq.as_str())
            {
                return Err(ConfigError::Validation(format!(
                    "sitemap page changefreq must be one of {CHANGEFREQ_VALUES:?} (got {freq})"
                )));
            }
        }

        Ok(())
    }

    // Resolved locations. Absolute config values stand alone; relative ones
    // resolve against the gallery root.

    pub fn source_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.source)
    }

    pub fn optimized_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.optimized)
    }

    pub fn thumbnails_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.thumbnails)
    }

    pub fn manifest_path(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.manifest)
    }

    pub fn sitemap_path(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.sitemap)
    }

    pub fn cache_path(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.cache)
    }
}

/// Load the gallery config.
///
/// With `explicit` set, that file must exist and parse. Otherwise
/// `wallgen.toml` in the root is used when present, and stock defaults when
/// it is not. The result is always validated.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<GalleryConfig, ConfigError> {
    let config = match explicit {
        Some(path) => parse_file(path)?,
        None => {
            let default_path = root.join(CONFIG_FILE);
            if default_path.exists() {
                parse_file(&default_path)?
            } else {
                GalleryConfig::default()
            }
        }
    };
    config.validate()?;
    Ok(config)
}

fn parse_file(path: &Path) -> Result<GalleryConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Returns a fully-commented stock `wallgen.toml` with all keys and
/// explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# wallgen Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as wallgen.toml in the gallery root (next to the
# wallpapers/ directory). Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Base URL for sitemap entries. No trailing slash.
base_url = "https://wallpaperverse.akshthakkar.me"

# ---------------------------------------------------------------------------
# Filesystem layout (relative paths resolve against the gallery root)
# ---------------------------------------------------------------------------
[paths]
# Source tree: one subdirectory per category, images inside.
source = "wallpapers"

# Derivative trees, mirroring the source categories. Created on demand.
optimized = "optimized"
thumbnails = "thumbnails"

# Output files.
manifest = "wallpapers.json"
sitemap = "sitemap.xml"

# Staleness ledger. Delete it to fall back to presence-only skipping.
cache = ".wallgen-cache.json"

# ---------------------------------------------------------------------------
# Derivative rendering
# ---------------------------------------------------------------------------
[images]
# Output frames as [width, height]. Every derivative matches its frame
# exactly. The thumbnail frame must keep the full frame's aspect ratio
# (within one pixel of height).
full_size = [1920, 1080]
thumb_size = [600, 338]

# Derivative encoding: "webp" or "jpeg".
format = "webp"

# Encoding quality (1 = worst, 100 = best).
quality = 85
thumb_quality = 70

# Qualities for the contain-on-black fallback used when the normal render
# fails on an image.
fallback_quality = 80
fallback_thumb_quality = 60

# Treatment for portrait images. Landscape always covers the frame.
#   "letterbox-blur" - center the image over a blurred, darkened backdrop
#   "cover-rotate"   - rotate 90 degrees to landscape, then cover
portrait = "letterbox-blur"

# ---------------------------------------------------------------------------
# Title derivation
# ---------------------------------------------------------------------------
[titles]
# Stripped from the front of display titles (first match wins,
# case-insensitive). Identifiers are derived from the raw filename and are
# not affected.
strip_prefixes = [
    "demon-slayer-",
    "jujutsu-kaisen-",
    "marvel-",
    "dc-",
    "movie-",
    "tv-show-",
    "disney-",
    "football-",
    "wanderlust-",
    "sneaker-",
]

# Stripped from the end of display titles. Identifiers keep the suffix.
strip_suffixes = ["-wallpaper"]

# ---------------------------------------------------------------------------
# Sitemap static pages (item URLs are appended automatically)
# ---------------------------------------------------------------------------
[[sitemap.pages]]
path = "/"
changefreq = "weekly"
priority = 1.0

[[sitemap.pages]]
path = "/submit"
changefreq = "monthly"
priority = 0.8

[[sitemap.pages]]
path = "/collection.html"
changefreq = "weekly"
priority = 0.9
"##
}

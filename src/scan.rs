//! Source tree scanning.
//!
//! Stage 1 of the wallgen build. Walks the source root one level deep and
//! produces an [`Inventory`] of categories and their accepted image files,
//! which the pipeline driver consumes.
//!
//! ## Directory Structure
//!
//! The source root contains one subdirectory per category:
//!
//! ```text
//! wallpapers/                      # Source root
//! ├── anime/                       # Category
//! │   ├── demon-slayer-tanjiro-kamado-wallpaper.jpg
//! │   └── jujutsu-kaisen-gojo.png
//! ├── cars/
//! │   ├── lamborghini-miura.webp
//! │   └── notes.txt               # Not an image — skipped, counted
//! └── nature/                      # Empty categories are inventoried
//! ```
//!
//! ## Rules
//!
//! - Categories are the immediate subdirectories of the root. Loose files at
//!   the root are ignored.
//! - A file is accepted when its extension matches the allow-list
//!   ([`IMAGE_EXTENSIONS`]), compared case-insensitively. Everything else —
//!   other extensions, extension-less files, nested directories — is skipped
//!   silently and only counted for reporting.
//! - Hidden entries (leading `.`) are invisible to the scan at both levels.
//! - Listings are sorted by name, so inventory order is stable across
//!   filesystems and repeated runs.
//!
//! A missing source root is the one fatal condition
//! ([`ScanError::DirectoryNotFound`]): the build aborts before writing any
//! output.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extensions accepted by the scanner, lowercase.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("source directory not found: {0}")]
    DirectoryNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything the scanner found, in deterministic order.
#[derive(Debug, Clone)]
pub struct Inventory {
    pub categories: Vec<CategoryListing>,
}

/// One category directory and its accepted files.
#[derive(Debug, Clone)]
pub struct CategoryListing {
    /// Directory name, used verbatim as the manifest key.
    pub name: String,
    /// Accepted image filenames, sorted.
    pub files: Vec<String>,
    /// Visible entries that did not pass the extension/file-type filter.
    pub skipped: usize,
}

impl Inventory {
    /// Total accepted images across all categories.
    pub fn image_count(&self) -> usize {
        self.categories.iter().map(|c| c.files.len()).sum()
    }

    /// Total skipped entries across all categories.
    pub fn skipped_count(&self) -> usize {
        self.categories.iter().map(|c| c.skipped).sum()
    }

    /// True when no category contains any accepted image.
    pub fn is_empty(&self) -> bool {
        self.image_count() == 0
    }
}

/// Scan the source root into an [`Inventory`].
///
/// Fails only when `root` is missing or not a directory; everything below
/// that degrades to skip-and-count.
pub fn scan(root: &Path) -> Result<Inventory, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::DirectoryNotFound(root.to_path_buf()));
    }

    let mut dirs: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir() && !is_hidden(p))
        .collect();
    dirs.sort();

    let mut categories = Vec::new();
    for dir in &dirs {
        categories.push(scan_category(dir)?);
    }

    Ok(Inventory { categories })
}

fn scan_category(dir: &Path) -> Result<CategoryListing, ScanError> {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut files = Vec::new();
    let mut skipped = 0;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let filename = entry.file_name().to_string_lossy().to_string();
        if filename.starts_with('.') {
            continue;
        }
        if entry.file_type()?.is_file() && has_image_extension(&filename) {
            files.push(filename);
        } else {
            skipped += 1;
        }
    }

    files.sort();

    Ok(CategoryListing {
        name,
        files,
        skipped,
    })
}

/// Check a filename against the extension allow-list, case-insensitively.
pub fn has_image_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

//! Gallery manifest — the category → item-record map the site consumes.
//!
//! The manifest is the pipeline's primary output: `wallpapers.json`, a JSON
//! object whose keys are category names and whose values are arrays of item
//! records. Key order is category discovery order and item order is file
//! discovery order, which the front-end relies on for stable galleries, so
//! the map is backed by an insertion-ordered `Vec` rather than a hash map
//! (serializing through a `HashMap` would scramble the keys).
//!
//! Categories with zero accepted files never get a key. Paths inside records
//! are site-relative with forward slashes (`optimized/anime/foo.webp`).

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One wallpaper in the manifest. Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Source filename, extension included.
    pub file: String,
    /// Display title derived from the filename.
    pub title: String,
    /// Site-relative thumbnail path. Equals `original` on total transform
    /// failure.
    pub thumbnail: String,
    /// Site-relative full derivative path. Equals `original` on total
    /// transform failure.
    pub optimized: String,
    /// Site-relative source path.
    pub original: String,
}

impl ItemRecord {
    /// True when the transform failed twice and the record points at the
    /// source for both derivatives.
    pub fn is_degraded(&self) -> bool {
        self.thumbnail == self.original && self.optimized == self.original
    }
}

/// Ordered category → records map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    categories: Vec<(String, Vec<ItemRecord>)>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, creating the category on first encounter.
    pub fn push(&mut self, category: &str, record: ItemRecord) {
        match self.categories.iter_mut().find(|(name, _)| name == category) {
            Some((_, records)) => records.push(record),
            None => self.categories.push((category.to_string(), vec![record])),
        }
    }

    /// Categories in insertion order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[ItemRecord])> {
        self.categories
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    /// All records, flattened in category-then-file order.
    pub fn items(&self) -> impl Iterator<Item = &ItemRecord> {
        self.categories.iter().flat_map(|(_, records)| records)
    }

    pub fn get(&self, category: &str) -> Option<&[ItemRecord]> {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, records)| records.as_slice())
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|(_, records)| records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for (name, records) in &self.categories {
            map.serialize_entry(name, records)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Manifest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ManifestVisitor;

        impl<'de> Visitor<'de> for ManifestVisitor {
            type Value = Manifest;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category name to item records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut categories = Vec::new();
                while let Some(entry) = access.next_entry::<String, Vec<ItemRecord>>()? {
                    categories.push(entry);
                }
                Ok(Manifest { categories })
            }
        }

        deserializer.deserialize_map(ManifestVisitor)
    }
}

/// Render the manifest as the site's JSON: 2-space indent, trailing newline.
pub fn render_manifest(manifest: &Manifest) -> Result<String, ManifestError> {
    let mut json = serde_json::to_string_pretty(manifest)?;
    json.push('\n');
    Ok(json)
}

pub fn save_manifest(manifest: &Manifest, path: &Path) -> Result<(), ManifestError> {
    fs::write(path, render_manifest(manifest)?)?;
    Ok(())
}

pub fn load_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// A manifest path reference that does not resolve to a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingReference {
    pub category: String,
    pub file: String,
    /// The dangling site-relative path.
    pub path: String,
}

/// Audit every path reference in the manifest against the gallery root.
///
/// A clean run returns an empty list: the thumbnail, optimized, and original
/// of each record all resolve to files. Degraded records pass as long as
/// their source still exists.
pub fn verify_references(manifest: &Manifest, root: &Path) -> Vec<MissingReference> {
    let mut missing = Vec::new();
    for (category, records) in manifest.categories() {
        for record in records {
            for path in [&record.thumbnail, &record.optimized, &record.original] {
                if !root.join(path).is_file() {
                    missing.push(MissingReference {
                        category: category.to_string(),
                        file: record.file.clone(),
                        path: path.clone(),
                    });
                }
            }
        }
    }
    missing
}

//! Staleness ledger for incremental builds.
//!
//! The presence check is the baseline skip contract: a wallpaper whose two
//! derivatives already exist is not re-encoded. Presence alone cannot see a
//! *changed* source (same filename, new pixels) or changed render settings,
//! so the driver also consults this ledger.
//!
//! ## Keys and hashes
//!
//! Entries are keyed by `<category>/<filename>` and store two SHA-256 hex
//! digests:
//!
//! - **`source_hash`**: hash of the source file contents. Content-based
//!   rather than mtime-based so it survives `git checkout` (which resets
//!   modification times).
//! - **`params_hash`**: hash of the render settings (frames, format,
//!   qualities, portrait profile). Any config change re-encodes everything.
//!
//! A wallpaper is *fresh* when its entry matches both hashes, *stale* when
//! an entry exists but either hash differs, and *unknown* when there is no
//! entry. Unknown items fall back to the presence contract; the driver then
//! records an entry so the next run can detect staleness.
//!
//! ## Storage
//!
//! One JSON file per gallery (default `.wallgen-cache.json` in the root).
//! Loading is forgiving: a missing, corrupt, or version-mismatched file
//! degrades to an empty ledger, never an error. `--no-cache` skips the
//! ledger entirely and re-encodes everything.

use crate::config::ImagesSection;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::Path;

/// Version of the ledger format. Bump to invalidate existing ledgers when
/// the format or key computation changes.
const LEDGER_VERSION: u32 = 1;

/// A single wallpaper's recorded state.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct LedgerEntry {
    pub source_hash: String,
    pub params_hash: String,
}

/// What the ledger knows about a wallpaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Entry present, both hashes match.
    Fresh,
    /// Entry present, source or params changed.
    Stale,
    /// No entry; presence is all we know.
    Unknown,
}

/// On-disk ledger mapping `<category>/<filename>` to hashes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CacheLedger {
    pub version: u32,
    pub entries: HashMap<String, LedgerEntry>,
}

impl CacheLedger {
    /// Create an empty ledger (used for `--no-cache` or first build).
    pub fn empty() -> Self {
        Self {
            version: LEDGER_VERSION,
            entries: HashMap::new(),
        }
    }

    /// Load from `path`. Returns an empty ledger if the file doesn't exist
    /// or can't be used (corruption, version mismatch).
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Self::empty(),
        };
        let ledger: Self = match serde_json::from_str(&content) {
            Ok(ledger) => ledger,
            Err(_) => return Self::empty(),
        };
        if ledger.version != LEDGER_VERSION {
            return Self::empty();
        }
        ledger
    }

    /// Save to `path`.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Compare a wallpaper's current hashes against its entry.
    pub fn freshness(&self, key: &str, source_hash: &str, params_hash: &str) -> Freshness {
        match self.entries.get(key) {
            None => Freshness::Unknown,
            Some(entry) if entry.source_hash == source_hash && entry.params_hash == params_hash => {
                Freshness::Fresh
            }
            Some(_) => Freshness::Stale,
        }
    }

    /// Record a wallpaper's hashes after its derivatives are in place.
    pub fn record(&mut self, key: String, source_hash: String, params_hash: String) {
        self.entries.insert(
            key,
            LedgerEntry {
                source_hash,
                params_hash,
            },
        );
    }

    /// Drop a wallpaper's entry so the next run retries it (degraded items).
    pub fn forget(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Drop entries whose source no longer exists in the scan.
    pub fn retain_keys(&mut self, live: &HashSet<String>) {
        self.entries.retain(|key, _| live.contains(key));
    }
}

/// Ledger key for one wallpaper.
pub fn ledger_key(category: &str, file: &str) -> String {
    format!("{category}/{file}")
}

/// SHA-256 hash of a file's contents, returned as a hex string.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    let digest = Sha256::digest(&bytes);
    Ok(format!("{digest:x}"))
}

/// SHA-256 hash of the render settings.
///
/// Every field that changes what pixels land in a derivative participates,
/// so a config edit re-encodes on the next run.
pub fn hash_params(images: &ImagesSection) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"render-params\0");
    hasher.update(images.full_size.width.to_le_bytes());
    hasher.update(images.full_size.height.to_le_bytes());
    hasher.update(images.thumb_size.width.to_le_bytes());
    hasher.update(images.thumb_size.height.to_le_bytes());
    hasher.update(images.format.extension().as_bytes());
    hasher.update(b"\0");
    hasher.update(images.quality.value().to_le_bytes());
    hasher.update(images.thumb_quality.value().to_le_bytes());
    hasher.update(images.fallback_quality.value().to_le_bytes());
    hasher.update(images.fallback_thumb_quality.value().to_le_bytes());
    hasher.update(images.portrait.as_str().as_bytes());
    format!("{:x}", hasher.finalize())
}

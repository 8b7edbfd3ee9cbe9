//! # wallgen
//!
//! Build pipeline for a static wallpaper gallery. Your filesystem is the data
//! source: every subdirectory of `wallpapers/` is a category, every image
//! inside is a wallpaper, and the filename carries the display metadata.
//!
//! # Architecture: One Pass, Four Artifacts
//!
//! A build walks the source tree once and leaves four things behind:
//!
//! ```text
//! 1. Scan      wallpapers/  →  inventory                 (category → file lists)
//! 2. Optimize  inventory    →  optimized/  thumbnails/   (two derivatives per image)
//! 3. Manifest  records      →  wallpapers.json           (front-end data file)
//! 4. Sitemap   manifest     →  sitemap.xml               (site URLs, one per item)
//! ```
//!
//! The derivative trees mirror the source categories, so a record's paths can
//! be derived from its category and filename alone. The manifest is the
//! single data file the gallery front-end loads; the sitemap is derived from
//! it rather than from the filesystem, so both always agree.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the source tree into a category inventory |
//! | [`process`] | Renders both derivatives per wallpaper, assembles manifest records |
//! | [`manifest`] | Ordered category→records document: JSON rendering, reference audit |
//! | [`sitemap`] | `sitemap.xml` from configured static pages plus one URL per item |
//! | [`cache`] | Staleness ledger — content and parameter hashes per item |
//! | [`config`] | `wallgen.toml` loading, validation, and the stock config |
//! | [`naming`] | Filename-driven title and identifier derivation |
//! | [`imaging`] | Backend trait, frame geometry math, the pure-Rust renderer |
//! | [`output`] | CLI output formatting for all stages |
//!
//! # Design Decisions
//!
//! ## Exact-Frame Derivatives
//!
//! Every derivative matches its configured frame exactly — 1920×1080 full,
//! 600×338 thumbnail by default. The gallery grid never reflows around odd
//! aspect ratios, and a wallpaper download is always the advertised size.
//! Landscape sources cover the frame; portrait sources either sit letterboxed
//! over a blurred, darkened copy of themselves or rotate to landscape,
//! per config.
//!
//! ## Filenames As Metadata
//!
//! Titles and URL identifiers both derive from the source filename — no
//! sidecar files, no embedded tags, no database. The two derivations are
//! deliberately asymmetric: titles strip franchise prefixes and the
//! `-wallpaper` suffix to read well in the gallery, while identifiers stay as
//! close to the raw filename as normalization allows, because published URLs
//! must not drift. See [`naming`].
//!
//! ## Pure-Rust Imaging
//!
//! The [`imaging`] module uses the `image` crate (Lanczos3 resampling) with
//! libwebp bindings for WebP encoding. No system ImageMagick, no `apt
//! install`: the binary is self-contained and renders identically on a
//! laptop and in CI.
//!
//! ## Content-Hash Skipping
//!
//! Re-running a build skips every wallpaper whose source bytes and render
//! parameters are unchanged, keyed by a SHA-256 ledger ([`cache`]). Outputs
//! that predate the ledger are adopted rather than re-encoded, so upgrading
//! from an older deployment does not force a full re-render. `--no-cache`
//! ignores and rebuilds the ledger.
//!
//! ## Soft Failure
//!
//! One corrupt download must not take down a 400-image build. A wallpaper
//! that fails its normal render is retried as a plain contain-on-black frame
//! at reduced quality; if that also fails, its manifest record serves the
//! original file and the build carries on. Degraded items are reported and
//! retried on the next run.

pub mod cache;
pub mod config;
pub mod imaging;
pub mod manifest;
pub mod naming;
pub mod output;
pub mod process;
pub mod scan;
pub mod sitemap;

#[cfg(test)]
pub(crate) mod test_helpers;

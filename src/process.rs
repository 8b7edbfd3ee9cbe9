//! Image optimization and manifest assembly.
//!
//! The middle stage of the build pipeline. Takes the inventory from the scan
//! stage and renders two derivatives per wallpaper — a full-size frame and a
//! thumbnail — into trees that mirror the source categories, collecting one
//! manifest record per source as it goes.
//!
//! ## Transform policy
//!
//! Every derivative fills its configured frame exactly. Landscape sources
//! cover the frame (scale to fill, center-crop the overflow). Portrait
//! sources follow the configured profile: letterbox over a blurred, darkened
//! backdrop, or rotate to landscape and cover.
//!
//! ## Failure handling
//!
//! A wallpaper that fails to identify or render is retried once as a plain
//! contain-on-black render at reduced quality. If that also fails, the item
//! is recorded as degraded — its manifest record points both derivative
//! fields at the original file — and the run continues. A source that cannot
//! be read at all (deleted since the scan, say) degrades the same way,
//! skipping the retry. Per-image problems never abort a build.
//!
//! ## Skipping
//!
//! The staleness ledger ([`crate::cache`]) keys every item by
//! `category/filename` and remembers the source content hash plus a hash of
//! the render parameters. An item is skipped only when both outputs exist and
//! the ledger does not say it is stale; outputs that predate the ledger are
//! adopted into it. `--no-cache` re-renders everything and rebuilds the
//! ledger from scratch.

use crate::cache::{CacheLedger, Freshness, hash_file, hash_params, ledger_key};
use crate::config::{GalleryConfig, ImagesSection};
use crate::imaging::{
    FULL_BLUR_SIGMA, FitMode, ImageBackend, RenderParams, RustBackend, THUMB_BLUR_SIGMA,
    is_portrait,
};
use crate::manifest::{ItemRecord, Manifest};
use crate::naming::{display_title, strip_image_extension};
use crate::output;
use crate::scan::Inventory;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What happened to one wallpaper during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    /// Rendered normally.
    Encoded,
    /// Outputs present and not stale; nothing rendered.
    Skipped,
    /// Normal render failed; contain-on-black retry succeeded.
    Fallback,
    /// Both attempts failed; the manifest serves the original.
    Degraded,
}

/// Per-run counters, one increment per wallpaper.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub encoded: usize,
    pub skipped: usize,
    pub fallback: usize,
    pub degraded: usize,
}

impl RunStats {
    pub fn total(&self) -> usize {
        self.encoded + self.skipped + self.fallback + self.degraded
    }
}

/// Result of a processing run: the assembled manifest plus counters.
#[derive(Debug)]
pub struct RunReport {
    pub manifest: Manifest,
    pub stats: RunStats,
}

pub fn process(
    root: &Path,
    config: &GalleryConfig,
    inventory: &Inventory,
    use_cache: bool,
) -> Result<RunReport, ProcessError> {
    let backend = RustBackend::new();
    process_with_backend(&backend, root, config, inventory, use_cache)
}

/// Process images using a specific backend (allows testing with mock).
pub fn process_with_backend(
    backend: &impl ImageBackend,
    root: &Path,
    config: &GalleryConfig,
    inventory: &Inventory,
    use_cache: bool,
) -> Result<RunReport, ProcessError> {
    let source_dir = config.source_dir(root);
    let optimized_dir = config.optimized_dir(root);
    let thumbnails_dir = config.thumbnails_dir(root);
    let cache_path = config.cache_path(root);

    let mut ledger = if use_cache {
        CacheLedger::load(&cache_path)
    } else {
        CacheLedger::empty()
    };
    let params_hash = hash_params(&config.images);
    let extension = config.images.format.extension();

    let mut manifest = Manifest::new();
    let mut stats = RunStats::default();
    let mut live_keys = HashSet::new();

    for category in &inventory.categories {
        if category.files.is_empty() {
            continue;
        }

        println!(
            "{}",
            output::format_category_header(&category.name, category.files.len())
        );

        std::fs::create_dir_all(optimized_dir.join(&category.name))?;
        std::fs::create_dir_all(thumbnails_dir.join(&category.name))?;

        for file in &category.files {
            let key = ledger_key(&category.name, file);
            live_keys.insert(key.clone());

            let output_name = format!("{}.{extension}", strip_image_extension(file));
            let source_path = source_dir.join(&category.name).join(file);
            let full_path = optimized_dir.join(&category.name).join(&output_name);
            let thumb_path = thumbnails_dir.join(&category.name).join(&output_name);

            let status = match hash_file(&source_path) {
                Ok(source_hash) => {
                    let freshness = ledger.freshness(&key, &source_hash, &params_hash);

                    if should_skip(
                        use_cache,
                        freshness,
                        full_path.is_file(),
                        thumb_path.is_file(),
                    ) {
                        if freshness == Freshness::Unknown {
                            // Outputs predate the ledger; adopt them.
                            ledger.record(key.clone(), source_hash.clone(), params_hash.clone());
                        }
                        stats.skipped += 1;
                        ItemStatus::Skipped
                    } else {
                        match render_item(
                            backend,
                            &config.images,
                            &category.name,
                            file,
                            &source_path,
                            &full_path,
                            &thumb_path,
                        ) {
                            ItemStatus::Degraded => {
                                ledger.forget(&key);
                                stats.degraded += 1;
                                ItemStatus::Degraded
                            }
                            outcome => {
                                ledger.record(
                                    key.clone(),
                                    source_hash.clone(),
                                    params_hash.clone(),
                                );
                                match outcome {
                                    ItemStatus::Fallback => stats.fallback += 1,
                                    _ => stats.encoded += 1,
                                }
                                outcome
                            }
                        }
                    }
                }
                Err(err) => {
                    // A vanished or unreadable source degrades like a failed
                    // render; it never aborts the run.
                    eprintln!(
                        "{}",
                        output::format_unreadable_warning(&category.name, file, &err)
                    );
                    ledger.forget(&key);
                    stats.degraded += 1;
                    ItemStatus::Degraded
                }
            };

            println!("{}", output::format_item_line(file, status));

            manifest.push(
                &category.name,
                build_record(config, &category.name, file, status == ItemStatus::Degraded),
            );
        }
    }

    ledger.retain_keys(&live_keys);
    ledger.save(&cache_path)?;

    Ok(RunReport { manifest, stats })
}

/// Skip decision for one wallpaper. Skipping requires both outputs on disk
/// and a ledger that does not contradict them; `--no-cache` never skips.
fn should_skip(use_cache: bool, freshness: Freshness, full_exists: bool, thumb_exists: bool) -> bool {
    use_cache && full_exists && thumb_exists && freshness != Freshness::Stale
}

/// Render both derivatives for one wallpaper, falling back once.
fn render_item(
    backend: &impl ImageBackend,
    images: &ImagesSection,
    category: &str,
    file: &str,
    source: &Path,
    full_path: &Path,
    thumb_path: &Path,
) -> ItemStatus {
    match render_primary(backend, images, source, full_path, thumb_path) {
        Ok(()) => ItemStatus::Encoded,
        Err(err) => {
            eprintln!("{}", output::format_render_warning(category, file, &err));
            match render_fallback(backend, images, source, full_path, thumb_path) {
                Ok(()) => ItemStatus::Fallback,
                Err(err) => {
                    eprintln!("{}", output::format_degraded_warning(category, file, &err));
                    ItemStatus::Degraded
                }
            }
        }
    }
}

/// The normal render pair: identify, pick the fit, then full and thumbnail.
fn render_primary(
    backend: &impl ImageBackend,
    images: &ImagesSection,
    source: &Path,
    full_path: &Path,
    thumb_path: &Path,
) -> Result<(), crate::imaging::BackendError> {
    let dims = backend.identify(source)?;
    let fit = if is_portrait(dims.width, dims.height) {
        images.portrait.fit_mode()
    } else {
        FitMode::Cover
    };

    backend.render(&RenderParams {
        source: source.to_path_buf(),
        output: full_path.to_path_buf(),
        frame: images.full_size,
        fit,
        format: images.format,
        quality: images.quality,
        blur_sigma: FULL_BLUR_SIGMA,
    })?;
    backend.render(&RenderParams {
        source: source.to_path_buf(),
        output: thumb_path.to_path_buf(),
        frame: images.thumb_size,
        fit,
        format: images.format,
        quality: images.thumb_quality,
        blur_sigma: THUMB_BLUR_SIGMA,
    })?;
    Ok(())
}

/// The retry pair: contain-on-black at reduced quality, no identify needed.
fn render_fallback(
    backend: &impl ImageBackend,
    images: &ImagesSection,
    source: &Path,
    full_path: &Path,
    thumb_path: &Path,
) -> Result<(), crate::imaging::BackendError> {
    backend.render(&RenderParams {
        source: source.to_path_buf(),
        output: full_path.to_path_buf(),
        frame: images.full_size,
        fit: FitMode::Contain,
        format: images.format,
        quality: images.fallback_quality,
        blur_sigma: FULL_BLUR_SIGMA,
    })?;
    backend.render(&RenderParams {
        source: source.to_path_buf(),
        output: thumb_path.to_path_buf(),
        frame: images.thumb_size,
        fit: FitMode::Contain,
        format: images.format,
        quality: images.fallback_thumb_quality,
        blur_sigma: THUMB_BLUR_SIGMA,
    })?;
    Ok(())
}

/// Build the manifest record for one wallpaper. Paths are site-relative,
/// forward-slashed, and use the configured directory names. A degraded
/// record points both derivative fields at the original.
fn build_record(config: &GalleryConfig, category: &str, file: &str, degraded: bool) -> ItemRecord {
    let original = format!("{}/{category}/{file}", config.paths.source);
    let (thumbnail, optimized) = if degraded {
        (original.clone(), original.clone())
    } else {
        let name = format!(
            "{}.{}",
            strip_image_extension(file),
            config.images.format.extension()
        );
        (
            format!("{}/{category}/{name}", config.paths.thumbnails),
            format!("{}/{category}/{name}", config.paths.optimized),
        )
    };

    ItemRecord {
        file: file.to_string(),
        title: display_title(file, &config.titles.strip_prefixes, &config.titles.strip_suffixes),
        thumbnail,
        optimized,
        original,
    }
}

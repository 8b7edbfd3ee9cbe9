//! CLI output formatting for all pipeline stages.
//!
//! Every entity leads with its name; counts and statuses follow in
//! parentheses or after a colon. Per-stage output looks like:
//!
//! ```text
//! ==> Stage 1: Scanning /srv/gallery/wallpapers
//! anime (12 images)
//! cars (8 images, 1 skipped)
//! 20 images in 2 categories
//!
//! ==> Stage 2: Optimizing images
//! anime (12 images)
//!     demon-slayer-tanjiro.jpg: encoded
//!     jujutsu-kaisen-gojo.jpg: cached
//!     corrupt.jpg: fallback (contain)
//!     broken.jpg: failed, serving original
//! ```
//!
//! Each piece has a `format_*` function (returns a `String` or
//! `Vec<String>`) for testability; stdout printing happens at the call site
//! or through a thin `print_*` wrapper. Format functions are pure — no I/O,
//! no side effects. Warnings formatted here go to stderr.

use crate::imaging::BackendError;
use crate::manifest::MissingReference;
use crate::process::{ItemStatus, RunStats};
use crate::scan::Inventory;

// ============================================================================
// Scan stage
// ============================================================================

/// Format the scan inventory: one line per category plus a totals line.
pub fn format_inventory(inventory: &Inventory) -> Vec<String> {
    let mut lines = Vec::new();

    for category in &inventory.categories {
        let count = if category.files.is_empty() {
            "no images".to_string()
        } else {
            format!("{} images", category.files.len())
        };
        let line = if category.skipped > 0 {
            format!("{} ({count}, {} skipped)", category.name, category.skipped)
        } else {
            format!("{} ({count})", category.name)
        };
        lines.push(line);
    }

    lines.push(format!(
        "{} images in {} categories",
        inventory.image_count(),
        inventory.categories.len()
    ));

    lines
}

pub fn print_inventory(inventory: &Inventory) {
    for line in format_inventory(inventory) {
        println!("{}", line);
    }
}

// ============================================================================
// Optimize stage
// ============================================================================

pub fn format_category_header(name: &str, count: usize) -> String {
    format!("{name} ({count} images)")
}

/// One status line per wallpaper, indented under its category header.
pub fn format_item_line(file: &str, status: ItemStatus) -> String {
    format!("    {file}: {}", status_label(status))
}

fn status_label(status: ItemStatus) -> &'static str {
    match status {
        ItemStatus::Encoded => "encoded",
        ItemStatus::Skipped => "cached",
        ItemStatus::Fallback => "fallback (contain)",
        ItemStatus::Degraded => "failed, serving original",
    }
}

/// Stderr line for a failed normal render, printed before the retry.
pub fn format_render_warning(category: &str, file: &str, error: &BackendError) -> String {
    format!("    {category}/{file}: {error}; retrying as contain")
}

/// Stderr line for a failed retry; the item degrades to the original.
pub fn format_degraded_warning(category: &str, file: &str, error: &BackendError) -> String {
    format!("    {category}/{file}: fallback failed: {error}")
}

/// Stderr line for a source that cannot be read; the item degrades without
/// a render attempt.
pub fn format_unreadable_warning(category: &str, file: &str, error: &std::io::Error) -> String {
    format!("    {category}/{file}: cannot read source: {error}")
}

/// One-line totals for the end of a build.
pub fn format_run_summary(stats: &RunStats) -> String {
    format!(
        "{} encoded, {} cached, {} fallback, {} failed",
        stats.encoded, stats.skipped, stats.fallback, stats.degraded
    )
}

// ============================================================================
// Check stage
// ============================================================================

/// Format dangling manifest references, one `source → missing path` line
/// each.
pub fn format_missing_references(missing: &[MissingReference]) -> Vec<String> {
    missing
        .iter()
        .map(|m| format!("    {}/{} \u{2192} {}", m.category, m.file, m.path))
        .collect()
}

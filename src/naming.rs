//! Title and identifier derivation from wallpaper filenames.
//!
//! Source filenames carry the display metadata: there is no sidecar or
//! embedded-tag lookup, just a naming convention. Two derivations exist, used
//! in different places:
//!
//! - **Display title** (manifest `title` field): extension stripped, known
//!   suffixes (`-wallpaper`) and category prefixes (`demon-slayer-`, …)
//!   removed, separator runs collapsed to spaces, each word capitalized.
//!   `demon-slayer-tanjiro-kamado-wallpaper.jpg` → `"Tanjiro Kamado"`.
//!
//! - **Identifier** (sitemap URLs, front-end deep links): extension stripped,
//!   whitespace/underscore runs collapsed to single hyphens, lowercased.
//!   `Marvel Thanos Wallpaper.jpg` → `"marvel-thanos-wallpaper"`.
//!
//! Note the asymmetry: identifiers keep the `-wallpaper` suffix while titles
//! strip it. Identifiers are link targets — published URLs must stay stable,
//! so the id is as close to the raw filename as normalization allows, while
//! the title is free to read well in the gallery.

use crate::scan::IMAGE_EXTENSIONS;

/// Strip a known image extension (case-insensitive) from a filename.
///
/// Only the four pipeline extensions are stripped; anything else is left
/// untouched so an unexpected name never loses characters:
/// - `"dusk.jpg"` → `"dusk"`
/// - `"dusk.JPEG"` → `"dusk"`
/// - `"notes.txt"` → `"notes.txt"`
pub fn strip_image_extension(filename: &str) -> &str {
    if let Some(pos) = filename.rfind('.') {
        let ext = &filename[pos + 1..];
        if IMAGE_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
        {
            return &filename[..pos];
        }
    }
    filename
}

/// Derive the gallery display title from a source filename.
///
/// Steps, in order:
/// 1. strip a known image extension;
/// 2. strip the first matching suffix from `strip_suffixes` (case-insensitive);
/// 3. strip the first matching prefix from `strip_prefixes` (case-insensitive);
/// 4. split on dash/underscore/space runs and capitalize each word's first
///    character, leaving the rest of the word as written.
pub fn display_title(filename: &str, strip_prefixes: &[String], strip_suffixes: &[String]) -> String {
    let mut name = strip_image_extension(filename);

    for suffix in strip_suffixes {
        if name.len() > suffix.len() && ends_with_ignore_case(name, suffix) {
            name = &name[..name.len() - suffix.len()];
            break;
        }
    }

    for prefix in strip_prefixes {
        if name.len() > prefix.len() && starts_with_ignore_case(name, prefix) {
            name = &name[prefix.len()..];
            break;
        }
    }

    name.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derive the URL identifier from a source filename.
///
/// Extension stripped, whitespace/underscore runs collapsed to a single
/// hyphen, lowercased. Existing hyphens pass through untouched — including
/// any `-wallpaper` suffix, so published ids never drift from the filenames
/// they were minted from.
pub fn wallpaper_id(filename: &str) -> String {
    let stem = strip_image_extension(filename);

    let mut id = String::with_capacity(stem.len());
    let mut prev_sep = false;
    for c in stem.chars() {
        if c.is_whitespace() || c == '_' {
            if !prev_sep {
                id.push('-');
            }
            prev_sep = true;
        } else {
            id.push(c);
            prev_sep = false;
        }
    }

    id.to_lowercase()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn starts_with_ignore_case(name: &str, prefix: &str) -> bool {
    name.len() >= prefix.len()
        && name.is_char_boundary(prefix.len())
        && name[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn ends_with_ignore_case(name: &str, suffix: &str) -> bool {
    name.len() >= suffix.len()
        && name.is_char_boundary(name.len() - suffix.len())
        && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

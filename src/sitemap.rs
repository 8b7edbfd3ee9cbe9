//! Sitemap writer.
//!
//! Renders `sitemap.xml` (sitemap protocol 0.9) from the static page list in
//! the config plus one URL per manifest item. Rendering is a pure string
//! template: the date is injected by the caller, so tests are deterministic
//! and `wallgen sitemap` can regenerate the file from an existing manifest
//! without touching any image.

use crate::config::StaticPage;
use crate::manifest::Manifest;
use crate::naming::wallpaper_id;
use chrono::NaiveDate;
use std::io;
use std::path::Path;

/// Priority for per-wallpaper URLs. Static pages carry their own.
const ITEM_PRIORITY: f64 = 0.7;

/// Render the full sitemap document.
///
/// Entry order is static pages first (config order), then one entry per
/// manifest item in manifest order. Every entry's `<lastmod>` is `date`.
pub fn render_sitemap(
    base_url: &str,
    pages: &[StaticPage],
    manifest: &Manifest,
    date: NaiveDate,
) -> String {
    let lastmod = date.format("%Y-%m-%d").to_string();

    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    xml.push_str("  <!-- Main Pages -->\n");
    for page in pages {
        let loc = format!("{base_url}{}", page.path);
        push_url(
            &mut xml,
            &loc,
            &lastmod,
            page.changefreq.as_deref(),
            page.priority,
        );
    }

    for record in manifest.items() {
        let loc = format!("{base_url}/wallpaper?id={}", wallpaper_id(&record.file));
        push_url(&mut xml, &loc, &lastmod, None, ITEM_PRIORITY);
    }

    xml.push_str("</urlset>\n");
    xml
}

pub fn save_sitemap(content: &str, path: &Path) -> io::Result<()> {
    std::fs::write(path, content)
}

fn push_url(xml: &mut String, loc: &str, lastmod: &str, changefreq: Option<&str>, priority: f64) {
    xml.push_str("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(loc)));
    xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
    if let Some(freq) = changefreq {
        xml.push_str(&format!("    <changefreq>{freq}</changefreq>\n"));
    }
    xml.push_str(&format!("    <priority>{priority:.1}</priority>\n"));
    xml.push_str("  </url>\n");
}

/// Minimal text escaping for `<loc>` content. Filenames can put `&` or
/// angle brackets into an id.
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

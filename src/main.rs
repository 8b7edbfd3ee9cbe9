use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wallgen::{config, manifest, output, process, scan, sitemap};

/// Shared flags for commands that render images.
#[derive(clap::Args, Clone)]
struct CacheArgs {
    /// Disable the staleness ledger — force re-encoding of all images
    #[arg(long)]
    no_cache: bool,
}

#[derive(Parser)]
#[command(name = "wallgen")]
#[command(about = "Build pipeline for a static wallpaper gallery")]
#[command(long_about = "\
Build pipeline for a static wallpaper gallery

Your filesystem is the data source. Each subdirectory of wallpapers/ is a
category, each image inside is a wallpaper, and the filename carries the
display metadata.

Gallery structure:

  gallery/
  ├── wallgen.toml                 # Config (optional — defaults work)
  ├── wallpapers/                  # Source images, one directory per category
  │   ├── anime/
  │   │   ├── demon-slayer-tanjiro-wallpaper.jpg
  │   │   └── jujutsu-kaisen-gojo-wallpaper.png
  │   └── cars/
  │       └── lamborghini-miura.jpg
  ├── optimized/                   # Generated: full-size derivatives
  ├── thumbnails/                  # Generated: thumbnail derivatives
  ├── wallpapers.json              # Generated: gallery manifest
  ├── sitemap.xml                  # Generated: site URLs
  └── .wallgen-cache.json          # Generated: staleness ledger

Titles derive from filenames (demon-slayer-tanjiro-wallpaper.jpg → \"Tanjiro\");
sitemap identifiers keep the raw name (→ demon-slayer-tanjiro-wallpaper).

Run 'wallgen gen-config' to print a documented wallgen.toml.")]
#[command(version)]
struct Cli {
    /// Gallery root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file (defaults to wallgen.toml in the gallery root)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: scan → optimize → manifest → sitemap
    Build(CacheArgs),
    /// Regenerate sitemap.xml from the existing manifest
    Sitemap,
    /// Audit the manifest against the filesystem without building
    Check,
    /// Print a stock wallgen.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build(cache_args) => {
            let config = config::load_config(&cli.root, cli.config.as_deref())?;
            let source_dir = config.source_dir(&cli.root);

            println!("==> Stage 1: Scanning {}", source_dir.display());
            let inventory = scan::scan(&source_dir)?;
            output::print_inventory(&inventory);

            println!("==> Stage 2: Optimizing images");
            let report = process::process(&cli.root, &config, &inventory, !cache_args.no_cache)?;

            println!("==> Stage 3: Writing manifest");
            let manifest_path = config.manifest_path(&cli.root);
            manifest::save_manifest(&report.manifest, &manifest_path)?;
            println!(
                "    {} ({} wallpapers in {} categories)",
                manifest_path.display(),
                report.manifest.item_count(),
                report.manifest.category_count()
            );

            println!("==> Stage 4: Writing sitemap");
            let sitemap_path = config.sitemap_path(&cli.root);
            let xml = sitemap::render_sitemap(
                &config.site.base_url,
                &config.sitemap.pages,
                &report.manifest,
                Utc::now().date_naive(),
            );
            sitemap::save_sitemap(&xml, &sitemap_path)?;
            println!(
                "    {} ({} URLs)",
                sitemap_path.display(),
                config.sitemap.pages.len() + report.manifest.item_count()
            );

            println!(
                "==> Build complete: {}",
                output::format_run_summary(&report.stats)
            );
        }
        Command::Sitemap => {
            let config = config::load_config(&cli.root, cli.config.as_deref())?;
            let manifest = manifest::load_manifest(&config.manifest_path(&cli.root))?;
            let sitemap_path = config.sitemap_path(&cli.root);
            let xml = sitemap::render_sitemap(
                &config.site.base_url,
                &config.sitemap.pages,
                &manifest,
                Utc::now().date_naive(),
            );
            sitemap::save_sitemap(&xml, &sitemap_path)?;
            println!(
                "Wrote {} ({} URLs)",
                sitemap_path.display(),
                config.sitemap.pages.len() + manifest.item_count()
            );
        }
        Command::Check => {
            let config = config::load_config(&cli.root, cli.config.as_deref())?;
            let source_dir = config.source_dir(&cli.root);
            println!("==> Checking {}", source_dir.display());
            let inventory = scan::scan(&source_dir)?;
            output::print_inventory(&inventory);

            let manifest_path = config.manifest_path(&cli.root);
            if !manifest_path.is_file() {
                println!("==> No manifest yet; run 'wallgen build' first");
                return Ok(());
            }

            let manifest = manifest::load_manifest(&manifest_path)?;
            println!(
                "{} records in {} categories",
                manifest.item_count(),
                manifest.category_count()
            );

            let degraded = manifest.items().filter(|r| r.is_degraded()).count();
            if degraded > 0 {
                println!("{degraded} degraded records (serving originals)");
            }

            let missing = manifest::verify_references(&manifest, &cli.root);
            if !missing.is_empty() {
                println!("missing references:");
                for line in output::format_missing_references(&missing) {
                    println!("{}", line);
                }
                return Err(format!("{} missing references", missing.len()).into());
            }

            println!("==> Manifest is consistent");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

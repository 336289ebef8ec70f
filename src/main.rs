//! Site-Archiver main entry point
//!
//! This is the command-line interface for the Site-Archiver web archiver.

use clap::Parser;
use site_archiver::config::{load_config_with_hash, validate, Config, ConfigOverrides};
use site_archiver::crawler::{run_crawl, ContentExtractor, HttpExtractor};
use site_archiver::output::print_report;
use site_archiver::url::parse_seed;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Archiver: a single-domain web archiver
///
/// With `--website`, crawls the site breadth-first from the seed URL and
/// writes every page as Markdown under the output directory, plus an
/// INDEX.md manifest. Without it, converts the one page at URL.
#[derive(Parser, Debug)]
#[command(name = "site-archiver")]
#[command(version = "1.0.0")]
#[command(about = "Archives a website as Markdown", long_about = None)]
struct Cli {
    /// Seed URL of the crawl, or the page to convert
    #[arg(value_name = "URL")]
    url: String,

    /// Crawl the whole site instead of converting a single page
    #[arg(long)]
    website: bool,

    /// Archive root directory (crawl mode) or output file (single page)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Maximum crawl depth
    #[arg(long, value_name = "N")]
    depth: Option<u32>,

    /// Maximum number of pages to crawl
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Pause between fetches in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    if cli.website {
        handle_crawl(&cli, &config).await
    } else {
        handle_single_page(&cli, &config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_archiver=info,warn"),
            1 => EnvFilter::new("site_archiver=debug,info"),
            2 => EnvFilter::new("site_archiver=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the optional config file and applies command-line overrides
fn build_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let root = if cli.website {
        cli.output
            .as_ref()
            .map(|path| path.to_string_lossy().into_owned())
    } else {
        None
    };

    config.apply_overrides(&ConfigOverrides {
        max_depth: cli.depth,
        max_pages: cli.max_pages,
        delay_ms: cli.delay_ms,
        root,
    });
    validate(&config)?;

    Ok(config)
}

/// Handles the crawl operation
async fn handle_crawl(cli: &Cli, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Archiving {} into {} (depth {}, up to {} pages, {}ms between fetches)",
        cli.url,
        config.output.root,
        config.crawler.max_depth,
        config.crawler.max_pages,
        config.crawler.delay_ms
    );

    let extractor = HttpExtractor::new(config)?;

    match run_crawl(config, &cli.url, extractor).await {
        Ok(report) => {
            if !cli.quiet {
                print_report(&report);
            }
            if let Some(error) = &report.manifest_error {
                tracing::warn!("Pages were archived but the manifest is missing: {}", error);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles single page conversion: one fetch, no link following
async fn handle_single_page(cli: &Cli, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let url = parse_seed(&cli.url)?;
    let extractor = HttpExtractor::new(config)?;

    let extraction = extractor.extract(&url, 0).await;
    if extraction.failed {
        tracing::warn!("Conversion of {} failed, writing error document", url);
    }

    match &cli.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &extraction.document)?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{}", extraction.document),
    }

    Ok(())
}

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

mod config;
mod error;
mod media;
mod utils;

use media::{DownloadEngine, DownloadPlan, HttpFetcher, ProgressObserver, Resolver};

#[derive(Parser, Debug)]
#[command(author, version, about = "Download a whole media album in one go", long_about = None)]
struct Args {
    /// Album, gallery or image URL
    url: Option<String>,

    /// Destination directory (defaults to the current directory)
    dest: Option<PathBuf>,

    /// Use this name for the album folder instead of the page title
    #[arg(short, long)]
    name: Option<String>,

    /// Name the album folder after the album key instead of the page title
    #[arg(long)]
    use_key: bool,

    /// List the resolved media URLs without downloading anything
    #[arg(long)]
    print_only: bool,

    /// With --print-only, emit the download plan as JSON
    #[arg(long)]
    json: bool,

    /// Path to the config file
    #[arg(short, long)]
    config: Option<String>,
}

fn get_config_path(args: &Args) -> Option<String> {
    if let Some(path) = &args.config {
        return Some(path.clone());
    }

    if let Ok(path) = std::env::var("ALBUMGRAB_CONFIG") {
        return Some(path);
    }

    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        let config_path = format!("{}/albumgrab/config.toml", xdg_config_home);
        if Path::new(&config_path).exists() {
            return Some(config_path);
        }
    }

    if let Some(home) = dirs::home_dir() {
        let config_path = format!("{}/.config/albumgrab/config.toml", home.display());
        if Path::new(&config_path).exists() {
            return Some(config_path);
        }
    }

    None
}

struct ConsoleProgress;

impl ProgressObserver for ConsoleProgress {
    fn on_item_start(&self, index: usize, source_url: &str, dest: &Path) {
        println!("Downloading Image {}", index);
        println!("    {} >> {}", source_url, dest.display());
    }

    fn on_batch_complete(&self) {
        println!();
        println!("Done!");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(url) = args.url.clone() else {
        Args::command().print_long_help()?;
        return Ok(());
    };

    let config = if let Some(config_path) = get_config_path(&args) {
        info!("Loading config from: {}", config_path);
        config::Config::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path))?
    } else {
        config::Config::default()
    };

    let fetcher = Arc::new(HttpFetcher::new()?);
    let resolver = Resolver::new(fetcher.clone(), config.service.clone());

    let resolution = match resolver.resolve(&url, args.name.as_deref()).await {
        Ok(resolution) => resolution,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            Args::command().print_long_help()?;
            std::process::exit(1);
        }
    };

    println!("Found {} images in album", resolution.items.len());
    for (extension, count) in resolution.extension_histogram() {
        println!("Found {} files with {} extension", count, extension);
    }

    let target_dir = args.dest.clone().unwrap_or_else(|| PathBuf::from("."));
    let plan = DownloadPlan::build(
        &resolution,
        &config.service,
        &target_dir,
        args.name.as_deref(),
        args.use_key,
    );

    if args.print_only {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            for entry in &plan.entries {
                println!("{}", entry.source_url);
            }
        }
        return Ok(());
    }

    let engine = DownloadEngine::new(fetcher, config.download.clone());
    let summary = engine.run(&plan, &ConsoleProgress).await?;

    println!(
        "Downloaded {} images, skipped {}",
        summary.saved,
        summary.skipped()
    );

    Ok(())
}

//! greyhound CLI
//!
//! Local inspection of the live upstream. For the HTTP surface, use
//! `greyhound-server`.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use greyhound_predictor::{
    error::Result,
    models::Config,
    pipeline::{self, SiteIndexBuilder},
    services::HttpUpstream,
};
use serde::Serialize;

/// greyhound - live greyhound race cards and predictions
#[derive(Parser, Debug)]
#[command(
    name = "greyhound",
    version,
    about = "Greyhound race cards, form and model predictions"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Per-request deadline in seconds, overriding the configured timeout
    #[arg(long)]
    deadline: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show today's meetings
    Meetings,

    /// Show a track's race card
    Track {
        /// Track identifier (e.g. `romford`)
        id: String,
    },

    /// Show a race card with form and ranked predictions
    Race {
        /// Race identifier
        id: String,
    },

    /// Print the site index as sitemap XML
    Sitemap,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, default_level: &str) {
    let level = if verbose { "debug" } else { default_level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config);
    config.apply_env_overrides();
    init_logging(cli.verbose, &config.logging.level);

    log::debug!("Loaded configuration from {}", cli.config.display());

    if let Command::Validate = cli.command {
        log::info!("Validating configuration...");
        if let Err(e) = config.validate() {
            log::error!("Config validation failed: {}", e);
            return Err(e);
        }
        log::info!("✓ Config OK");
        return Ok(());
    }

    let mut upstream = HttpUpstream::from_config(&config.upstream)?;
    if let Some(secs) = cli.deadline {
        upstream = upstream.with_deadline(Duration::from_secs(secs));
    }

    match cli.command {
        Command::Meetings => print_json(&pipeline::load_home(&upstream).await)?,
        Command::Track { id } => print_json(&pipeline::load_track(&upstream, &id).await)?,
        Command::Race { id } => print_json(&pipeline::load_race(&upstream, &id).await)?,
        Command::Sitemap => {
            let site_origin = config.site.origin()?;
            let index = SiteIndexBuilder::new(&upstream, &site_origin)
                .with_concurrency(config.upstream.max_concurrent)
                .build()
                .await;
            print!("{}", index.to_xml());
            log::info!(
                "Published {} entries ({} tracks skipped)",
                index.len(),
                index.skipped_tracks.len()
            );
        }
        Command::Validate => {}
    }

    Ok(())
}

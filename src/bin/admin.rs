//! CLI administration tool for tinylink.
//!
//! Works directly on the data file, without going through the HTTP API.
//! Stop the server first when writing; it does not watch the file.
//!
//! # Usage
//!
//! ```bash
//! # List all links, newest first
//! cargo run --bin admin -- list
//!
//! # Show one link without counting a click
//! cargo run --bin admin -- stats aB3dE9
//!
//! # Shorten a URL
//! cargo run --bin admin -- shorten example.com/page
//!
//! # Delete a link
//! cargo run --bin admin -- delete aB3dE9 --yes
//! ```
//!
//! # Environment Variables
//!
//! - `DATA_FILE` (default `data.json`): snapshot to operate on

use tinylink::application::services::{LinkService, SnapshotService};
use tinylink::config::Config;
use tinylink::domain::entities::UrlRecord;
use tinylink::infrastructure::persistence::{JsonFileSnapshotStore, MemoryUrlRepository};
use tinylink::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI tool for managing tinylink data.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Data file to operate on (overrides `DATA_FILE`)
    #[arg(short, long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all links, newest first
    List,

    /// Show one link without counting a click
    Stats {
        /// Short code
        code: String,
    },

    /// Shorten a URL (reuses the existing code for a known URL)
    Shorten {
        /// URL to shorten; `https://` is assumed when no scheme is given
        url: String,
    },

    /// Delete a link
    Delete {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

struct Services {
    links: LinkService<MemoryUrlRepository>,
    snapshots: SnapshotService<MemoryUrlRepository>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let path = match cli.data_file {
        Some(path) => path,
        None => Config::from_env()?
            .data_file
            .context("DATA_FILE is empty; the admin tool needs a data file")?,
    };

    let services = open(path).await?;

    match cli.command {
        Commands::List => list(&services).await?,
        Commands::Stats { code } => stats(&services, &code).await?,
        Commands::Shorten { url } => shorten(&services, &url).await?,
        Commands::Delete { code, yes } => delete(&services, &code, yes).await?,
    }

    Ok(())
}

/// Loads the data file into a fresh repository.
async fn open(path: PathBuf) -> Result<Services> {
    let repo = Arc::new(MemoryUrlRepository::new());
    let store = Arc::new(JsonFileSnapshotStore::new(path.clone()));

    let services = Services {
        links: LinkService::new(repo.clone(), Arc::new(RandomCodeGenerator::new())),
        snapshots: SnapshotService::new(repo, store),
    };

    services
        .snapshots
        .restore()
        .await
        .with_context(|| format!("Failed to load {}", path.display()))?;

    Ok(services)
}

async fn list(services: &Services) -> Result<()> {
    let records = services.links.list().await?;

    if records.is_empty() {
        println!("{}", "No links yet".yellow());
        return Ok(());
    }

    println!("{}", "Short links".bright_blue().bold());
    println!();
    println!(
        "{:<8} {:>7}  {:<20} {}",
        "CODE".bold(),
        "CLICKS".bold(),
        "CREATED".bold(),
        "TARGET".bold()
    );

    for record in &records {
        println!(
            "{:<8} {:>7}  {:<20} {}",
            record.code.green(),
            record.click_count,
            record.created_at.format("%Y-%m-%d %H:%M:%S"),
            record.target
        );
    }

    println!();
    println!("{} {}", "Total:".bold(), records.len());

    Ok(())
}

async fn stats(services: &Services, code: &str) -> Result<()> {
    let record = services.links.stats(code).await?;
    print_record(&record);
    Ok(())
}

async fn shorten(services: &Services, url: &str) -> Result<()> {
    let allocation = services.links.shorten(url).await?;

    if allocation.created {
        services.snapshots.persist().await?;
        println!("{}", "Created new short link".green());
    } else {
        println!("{}", "URL already shortened, reusing code".yellow());
    }

    println!();
    print_record(&allocation.record);

    Ok(())
}

async fn delete(services: &Services, code: &str, skip_confirm: bool) -> Result<()> {
    let record = services.links.stats(code).await?;
    print_record(&record);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {}?", code))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".yellow());
            return Ok(());
        }
    }

    services.links.delete(code).await?;
    services.snapshots.persist().await?;

    println!("{} {}", "Deleted".green(), code);
    Ok(())
}

fn print_record(record: &UrlRecord) {
    println!("  {} {}", "Code:".bold(), record.code.green());
    println!("  {} {}", "Target:".bold(), record.target);
    println!("  {} {}", "Clicks:".bold(), record.click_count);
    println!("  {} {}", "Created:".bold(), record.created_at.to_rfc3339());
    println!(
        "  {} {}",
        "Last accessed:".bold(),
        record
            .last_accessed_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "never".to_string())
    );
}

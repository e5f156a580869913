//! CLI administration tool for short-url-service.
//!
//! Talks to the configured store directly, without going through HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Check store connectivity
//! cargo run --bin admin -- check
//!
//! # Resolve a short code
//! cargo run --bin admin -- resolve AbC123XyZ0
//!
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com/a --expiration 600
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`short_url_service::config`].

use short_url_service::AppError;
use short_url_service::application::services::{RedirectService, ShorteningService};
use short_url_service::config::{self, Config};
use short_url_service::domain::repositories::MappingStore;
use short_url_service::infrastructure::open_store;
use short_url_service::utils::code_generator::CodeGenerator;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for managing short-url-service.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check store connection
    Check,

    /// Print the long URL behind a short code
    Resolve {
        /// Short code to look up
        short_code: String,
    },

    /// Create a short URL
    Shorten {
        /// Long URL to shorten
        long_url: String,

        /// TTL in seconds (expiring stores only)
        #[arg(short, long)]
        expiration: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;
    let store = open_store(&config).await?;

    let result = match cli.command {
        Commands::Check => check(store.as_ref(), &config).await,
        Commands::Resolve { short_code } => resolve(store.clone(), &short_code).await,
        Commands::Shorten {
            long_url,
            expiration,
        } => shorten(store.clone(), &config, &long_url, expiration).await,
    };

    store.close().await;
    result
}

async fn check(store: &dyn MappingStore, config: &Config) -> Result<()> {
    println!("{}", "Checking store connection...".bright_blue());

    match store.ping().await {
        Ok(()) => {
            println!(
                "{} {} store ({})",
                "✓".green().bold(),
                config.store_backend.to_string().bold(),
                store.variant().as_str()
            );
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".red().bold(), e);
            Err(e.into())
        }
    }
}

async fn resolve(store: Arc<dyn MappingStore>, short_code: &str) -> Result<()> {
    match RedirectService::new(store).resolve(short_code).await {
        Ok(mapping) => {
            println!("{} {}", short_code.bold(), mapping.long_url.cyan());
            println!(
                "  Created: {}",
                mapping.created_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            match mapping.expires_at {
                Some(expires_at) => println!(
                    "  Expires: {}",
                    expires_at.format("%Y-%m-%d %H:%M:%S UTC")
                ),
                None => println!("  Expires: {}", "never".dimmed()),
            }
            Ok(())
        }
        Err(AppError::NotFound(_)) => {
            println!("{} {}", "No mapping for".yellow(), short_code.bold());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

async fn shorten(
    store: Arc<dyn MappingStore>,
    config: &Config,
    long_url: &str,
    expiration: Option<u64>,
) -> Result<()> {
    let service = ShorteningService::new(
        store,
        CodeGenerator::new(config.code_length),
        config.default_expiration_seconds,
        config.base_url.clone(),
    );

    let outcome = service.shorten(long_url, expiration).await?;
    let label = if outcome.created { "Created" } else { "Existing" };

    println!(
        "{} {}",
        format!("{label}:").green().bold(),
        service.short_url(&outcome.short_code)
    );
    if let Some(seconds) = outcome.expiration_seconds {
        println!("  Expires in {}s", seconds);
    }

    Ok(())
}

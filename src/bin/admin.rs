//! CLI administration tool for the link directory.
//!
//! Goes through the same [`LinkService`] as the HTTP API, so validation and
//! short name generation behave identically.
//!
//! # Usage
//!
//! ```bash
//! # List links, newest short names first
//! cargo run --bin admin -- links list --start 0 --count 20 --sort short_name:DESC
//!
//! # Create a link with a generated short name
//! cargo run --bin admin -- links create https://example.com/landing
//!
//! # Delete a link
//! cargo run --bin admin -- links delete 42
//!
//! # Recent visits
//! cargo run --bin admin -- visits list --count 50
//!
//! # Counts and connectivity
//! cargo run --bin admin -- stats
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*` components): PostgreSQL connection
//! - `BASE_URL`: origin used to print short URLs (default `http://localhost:3000`)

use link_directory::application::services::DynLinkService;
use link_directory::config;
use link_directory::domain::query::{ListQuery, Range, RawSort};
use link_directory::server::{build_link_service, connect_pool};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing the link directory.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Inspect recorded visits
    Visits {
        #[command(subcommand)]
        action: VisitsAction,
    },

    /// Show link and visit counts
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinksAction {
    /// List links
    List {
        #[command(flatten)]
        window: Window,

        /// Sort as `field:ORDER`, e.g. `short_name:DESC`
        #[arg(short, long)]
        sort: Option<String>,
    },

    /// Create a link
    Create {
        /// Target URL (http or https)
        url: String,

        /// Short name (generated when omitted)
        #[arg(short = 'n', long)]
        short_name: Option<String>,
    },

    /// Delete a link by id
    Delete {
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum VisitsAction {
    /// List visits, newest first
    List {
        #[command(flatten)]
        window: Window,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

/// Optional `--start`/`--count` window. Without `--count` everything is listed.
#[derive(clap::Args)]
struct Window {
    /// Zero-based offset
    #[arg(long, default_value_t = 0)]
    start: i64,

    /// Number of rows (1..=1000)
    #[arg(long)]
    count: Option<i64>,
}

impl Window {
    fn range(&self) -> Result<Option<Range>> {
        self.count
            .map(|count| Range::new(self.start, count))
            .transpose()
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;
    let service = build_link_service(Arc::new(pool.clone()));

    match cli.command {
        Commands::Links { action } => handle_links_action(action, &service, &config.base_url).await?,
        Commands::Visits { action } => handle_visits_action(action, &service).await?,
        Commands::Stats => handle_stats(&service).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_links_action(
    action: LinksAction,
    service: &DynLinkService,
    base_url: &str,
) -> Result<()> {
    match action {
        LinksAction::List { window, sort } => {
            let query = ListQuery {
                sort: parse_sort(sort.as_deref())?,
                range: window.range()?,
            };
            list_links(service, &query).await?;
        }
        LinksAction::Create { url, short_name } => {
            create_link(service, &url, short_name.as_deref(), base_url).await?;
        }
        LinksAction::Delete { id, yes } => {
            delete_link(service, id, yes).await?;
        }
    }

    Ok(())
}

/// Splits `field:ORDER`. A bare field sorts ascending.
fn parse_sort(raw: Option<&str>) -> Result<RawSort> {
    let Some(raw) = raw else {
        return Ok(RawSort::default());
    };

    match raw.split_once(':') {
        Some((field, order)) => Ok(RawSort::new(field, order)),
        None if !raw.trim().is_empty() => Ok(RawSort::new(raw, "ASC")),
        None => anyhow::bail!("Sort must be field:ORDER"),
    }
}

/// Lists links in a table.
///
/// # Output Format
///
/// ```text
/// Links
///
///   ID     Short name   Original URL
///   ---------------------------------------------------------------
///   1      promo2024    https://example.com/landing
/// ```
async fn list_links(service: &DynLinkService, query: &ListQuery) -> Result<()> {
    println!("{}", "Links".bright_blue().bold());
    println!();

    let page = service
        .list_links(query)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if page.items.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<6} {:<32} {}",
        "ID".bright_white().bold(),
        "Short name".bright_white().bold(),
        "Original URL".bright_white().bold()
    );
    println!("  {}", "-".repeat(75).bright_black());

    for link in &page.items {
        println!(
            "  {:<6} {:<32} {}",
            link.id.to_string().bright_black(),
            link.short_name.cyan(),
            link.original_url
        );
    }

    println!();
    print_total(page.items.len(), page.total);

    Ok(())
}

async fn create_link(
    service: &DynLinkService,
    url: &str,
    short_name: Option<&str>,
    base_url: &str,
) -> Result<()> {
    let link = service
        .create_link(url, short_name.unwrap_or_default())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "Link created".green().bold());
    println!();
    println!("  ID:        {}", link.id.to_string().bright_black());
    println!("  Short URL: {}", link.short_url(base_url).bright_yellow().bold());
    println!("  Target:    {}", link.original_url.cyan());
    println!();

    Ok(())
}

/// Deletes a link after confirmation (default: No). Visits are kept.
async fn delete_link(service: &DynLinkService, id: i64, skip_confirm: bool) -> Result<()> {
    let link = service
        .get_link(id)
        .await
        .with_context(|| format!("Link {} not found", id))?;

    println!("  Short name: {}", link.short_name.cyan());
    println!("  Target:     {}", link.original_url);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_link(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "Link deleted".green().bold());

    Ok(())
}

async fn handle_visits_action(action: VisitsAction, service: &DynLinkService) -> Result<()> {
    let VisitsAction::List { window } = action;
    let query = ListQuery {
        sort: RawSort::default(),
        range: window.range()?,
    };

    println!("{}", "Link visits".bright_blue().bold());
    println!();

    let page = service
        .list_link_visits(&query)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list visits: {}", e))?;

    if page.items.is_empty() {
        println!("{}", "  No visits recorded".yellow());
        return Ok(());
    }

    println!(
        "  {:<20} {:<8} {:<16} {:<6} {}",
        "Time".bright_white().bold(),
        "Link".bright_white().bold(),
        "IP".bright_white().bold(),
        "Status".bright_white().bold(),
        "Referer".bright_white().bold()
    );
    println!("  {}", "-".repeat(75).bright_black());

    for visit in &page.items {
        println!(
            "  {:<20} {:<8} {:<16} {:<6} {}",
            visit
                .created_at
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .bright_black(),
            visit.link_id,
            visit.ip.cyan(),
            visit.status,
            visit.referer
        );
    }

    println!();
    print_total(page.items.len(), page.total);

    Ok(())
}

fn print_total(shown: usize, total: i64) {
    if total < 0 {
        println!("  Total: {}", shown.to_string().bright_white().bold());
    } else {
        println!(
            "  Showing {} of {}",
            shown.to_string().bright_white().bold(),
            total.to_string().bright_white().bold()
        );
    }
    println!();
}

async fn handle_stats(service: &DynLinkService) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let stats = service
        .stats()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read statistics: {}", e))?;

    println!("  Links:  {}", stats.links.to_string().bright_green().bold());
    println!("  Visits: {}", stats.visits.to_string().bright_green().bold());
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
    }

    Ok(())
}

//! CLI administration tool for link-shortener.
//!
//! Signs API requests, converts between ids and codes, and reads or writes
//! links directly in the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Produce X-Timestamp / X-Signature headers for a request
//! cargo run --bin admin -- sign --method POST --path /api/shorten --body '{"url":"https://example.com"}'
//!
//! # Convert between ids and codes
//! cargo run --bin admin -- code encode 37
//! cargo run --bin admin -- code decode 12
//!
//! # Manage links directly
//! cargo run --bin admin -- link create https://example.com
//! cargo run --bin admin -- link show 1
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `SHORTENER_SECRET` (required for `sign`)
//! - `DATABASE_URL` or `DATA_DIR` (for `link` and `db`)

use link_shortener::application::services::{AuthService, LinkService};
use link_shortener::config::{self, DATABASE_FILE};
use link_shortener::infrastructure::persistence::{SqliteLinkRepository, pool};
use link_shortener::utils::codec;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing link-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Compute authentication headers for an API request
    Sign {
        /// HTTP method
        #[arg(short, long, default_value = "POST")]
        method: String,

        /// Request path, without query string
        #[arg(short, long, default_value = "/api/shorten")]
        path: String,

        /// Exact request body
        #[arg(short, long, default_value = "")]
        body: String,

        /// Unix timestamp to sign (defaults to now)
        #[arg(short, long)]
        timestamp: Option<u64>,
    },

    /// Convert between link ids and short codes
    Code {
        #[command(subcommand)]
        action: CodeAction,
    },

    /// Read or create links directly in the database
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Code conversion subcommands.
#[derive(Subcommand)]
enum CodeAction {
    /// Encode a link id as a short code
    Encode { id: i64 },

    /// Decode a short code back to its link id
    Decode { code: String },
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create (or reuse) the short link for a URL
    Create { url: String },

    /// Show the link stored under a code
    Show { code: String },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and count links
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sign {
            method,
            path,
            body,
            timestamp,
        } => sign_request(&method, &path, &body, timestamp)?,
        Commands::Code { action } => handle_code_action(action)?,
        Commands::Link { action } => handle_link_action(action).await?,
        Commands::Db { action } => handle_db_action(action).await?,
    }

    Ok(())
}

/// Prints the headers that authenticate the described request.
fn sign_request(method: &str, path: &str, body: &str, timestamp: Option<u64>) -> Result<()> {
    let secret = std::env::var("SHORTENER_SECRET")
        .ok()
        .filter(|s| !s.is_empty())
        .context("SHORTENER_SECRET must be set")?;

    let timestamp = timestamp
        .unwrap_or_else(|| Utc::now().timestamp().max(0) as u64)
        .to_string();
    let method = method.to_ascii_uppercase();

    let signature = AuthService::new(secret).sign(&timestamp, &method, path, body.as_bytes());

    println!("{}", "🔏 Signed request".bright_blue().bold());
    println!();
    println!("X-Timestamp: {}", timestamp.bright_green());
    println!("X-Signature: {}", signature.bright_green());
    println!();
    println!("{}", "Example:".bright_white().bold());
    println!(
        "  curl -X {method} http://localhost:3000{path} \\\n    -H 'X-Timestamp: {timestamp}' \\\n    -H 'X-Signature: {signature}'{}",
        if body.is_empty() {
            String::new()
        } else {
            format!(" \\\n    -d '{body}'")
        }
    );
    println!();
    println!(
        "{}",
        "⚠️  Signatures expire 5 minutes after the timestamp".yellow()
    );

    Ok(())
}

/// Dispatches code conversion commands.
fn handle_code_action(action: CodeAction) -> Result<()> {
    match action {
        CodeAction::Encode { id } => {
            if id < 1 {
                anyhow::bail!("Link ids start at 1, got {}", id);
            }
            println!("{}", codec::encode(id));
        }
        CodeAction::Decode { code } => {
            let id = codec::decode(&code)?;
            println!("{}", id);
        }
    }

    Ok(())
}

/// Dispatches link commands.
async fn handle_link_action(action: LinkAction) -> Result<()> {
    let service = LinkService::new(Arc::new(open_repository().await?));

    match action {
        LinkAction::Create { url } => {
            let link = service.shorten(&url).await?;
            println!("{}", "✅ Link ready".green().bold());
            print_link(&link);
        }
        LinkAction::Show { code } => match service.get_link_by_code(&code).await {
            Ok(link) => print_link(&link),
            Err(e) => {
                println!("{} {}", "❌".red(), e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());
            let repository = open_repository().await?;
            let count = LinkService::new(Arc::new(repository)).count().await?;
            println!("{}", "✅ Database connection OK".green());
            println!("  Links: {}", count.to_string().bright_white().bold());
        }
    }

    Ok(())
}

fn print_link(link: &link_shortener::domain::entities::Link) {
    println!("  ID:         {}", link.id);
    println!("  Code:       {}", link.code.bright_green());
    println!("  URL:        {}", link.url);
    println!("  Created at: {}", link.created_at_rfc3339());
}

/// Opens the same database the server uses.
async fn open_repository() -> Result<SqliteLinkRepository> {
    let database_url = match config::storage_from_env() {
        (_, Some(url)) => url,
        (data_dir, None) => {
            std::fs::create_dir_all(&data_dir).with_context(|| {
                format!("Unable to create data directory {}", data_dir.display())
            })?;
            config::sqlite_url(&data_dir.join(DATABASE_FILE))
        }
    };

    let pool = pool::connect(&database_url, 1, Duration::from_secs(5))
        .await
        .context("Failed to connect to database")?;

    Ok(SqliteLinkRepository::new(Arc::new(pool)).await?)
}

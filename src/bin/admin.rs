//! CLI administration tool for LocalLinks.
//!
//! Provides commands for managing business API tokens, listing businesses,
//! and checking the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Issue a dashboard token for a business
//! cargo run --bin admin -- token create --slug joes-pizza
//!
//! # List all tokens
//! cargo run --bin admin -- token list
//!
//! # Revoke a token by ID
//! cargo run --bin admin -- token revoke 3
//!
//! # List businesses with link counts
//! cargo run --bin admin -- business list
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components (required)
//! - `TOKEN_SIGNING_SECRET` (required for `token create`); must match the server

use locallinks::application::services::AuthService;
use locallinks::config::Config;
use locallinks::domain::repositories::{BusinessRepository, TokenRepository};
use locallinks::infrastructure::persistence::{PgBusinessRepository, PgTokenRepository};
use locallinks::utils::token::generate_token;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

/// CLI tool for managing LocalLinks.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage business API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Inspect businesses
    Business {
        #[command(subcommand)]
        action: BusinessAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Issue a new token for a business
    Create {
        /// Slug of the business the token signs in as
        #[arg(short, long)]
        slug: String,

        /// Token label (e.g., "Front desk tablet")
        #[arg(short, long)]
        name: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum BusinessAction {
    /// List all businesses
    List,
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;
    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    let pool = Arc::new(pool);

    match cli.command {
        Commands::Token { action } => handle_token_action(action, pool).await?,
        Commands::Business { action } => handle_business_action(action, pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_token_action(action: TokenAction, pool: Arc<PgPool>) -> Result<()> {
    let tokens = PgTokenRepository::new(pool.clone());
    let businesses = PgBusinessRepository::new(pool);

    match action {
        TokenAction::Create { slug, name, yes } => {
            create_token(&tokens, &businesses, &slug, name, yes).await?;
        }
        TokenAction::List => list_tokens(&tokens, &businesses).await?,
        TokenAction::Revoke { id } => revoke_token(&tokens, id).await?,
    }

    Ok(())
}

/// Issues a token for the business with the given slug.
///
/// Only the HMAC of the token is stored, keyed with `TOKEN_SIGNING_SECRET`,
/// so the raw value is printed once and cannot be recovered later.
async fn create_token(
    tokens: &PgTokenRepository,
    businesses: &PgBusinessRepository,
    slug: &str,
    name: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let secret =
        std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;

    let business = businesses
        .find_by_slug(slug)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("No business with slug '{slug}'"))?;

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("Dashboard")
            .interact_text()?,
    };

    let token_value = generate_token().context("Failed to generate token")?;

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  Business: {} ({})", business.name.cyan(), business.slug);
    println!("  Name:     {}", token_name.cyan());
    println!("  Token:    {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let token_hash = AuthService::hash_token(&secret, &token_value);
    tokens
        .create_token(business.id, &token_name, &token_hash)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/links",
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

async fn list_tokens(tokens: &PgTokenRepository, businesses: &PgBusinessRepository) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let all = tokens
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if all.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin token create --slug <slug>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    let slugs: HashMap<i64, String> = businesses
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list businesses: {}", e))?
        .into_iter()
        .map(|b| (b.id, b.slug))
        .collect();

    println!(
        "  {:<4} {:<24} {:<24} {:<18} {:<10}",
        "ID".bright_white().bold(),
        "Business".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(84).bright_black());

    for token in &all {
        let status = if token.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };
        let slug = slugs
            .get(&token.business_id)
            .map(String::as_str)
            .unwrap_or("?");

        println!(
            "  {:<4} {:<24} {:<24} {:<18} {}",
            token.id.to_string().bright_black(),
            slug,
            token.name.cyan(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!("  Total: {}", all.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn revoke_token(tokens: &PgTokenRepository, id: i64) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    let confirmed = Confirm::new()
        .with_prompt(format!("Revoke token {id}?"))
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    tokens
        .revoke_token(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    println!("{}", "✅ Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

async fn handle_business_action(action: BusinessAction, pool: Arc<PgPool>) -> Result<()> {
    match action {
        BusinessAction::List => {
            println!("{}", "🏪 Businesses".bright_blue().bold());
            println!();

            let businesses = PgBusinessRepository::new(pool.clone())
                .list()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list businesses: {}", e))?;

            if businesses.is_empty() {
                println!("{}", "  No businesses yet".yellow());
                return Ok(());
            }

            let counts: HashMap<i64, i64> = sqlx::query_as::<_, (i64, i64)>(
                "SELECT business_id, COUNT(*) FROM links GROUP BY business_id",
            )
            .fetch_all(pool.as_ref())
            .await?
            .into_iter()
            .collect();

            println!(
                "  {:<4} {:<24} {:<30} {:<6}",
                "ID".bright_white().bold(),
                "Slug".bright_white().bold(),
                "Name".bright_white().bold(),
                "Links".bright_white().bold()
            );
            println!("  {}", "─".repeat(68).bright_black());

            for business in &businesses {
                println!(
                    "  {:<4} {:<24} {:<30} {}",
                    business.id.to_string().bright_black(),
                    business.slug.cyan(),
                    business.name,
                    counts
                        .get(&business.id)
                        .copied()
                        .unwrap_or(0)
                        .to_string()
                        .bright_green()
                );
            }

            println!();
            println!(
                "  Total: {}",
                businesses.len().to_string().bright_white().bold()
            );
            println!();
        }
    }

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;
            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
    }

    Ok(())
}

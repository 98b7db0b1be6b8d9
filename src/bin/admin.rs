//! CLI administration tool for outlink.
//!
//! Provides commands for managing accounts, domains and links directly
//! against the database, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create an account (prompts for missing fields and the password)
//! cargo run --bin admin -- user create --name Ann --email ann@example.com
//!
//! # List accounts
//! cargo run --bin admin -- user list
//!
//! # Assign a domain to an account
//! cargo run --bin admin -- domain add ann@example.com mybusiness
//!
//! # Show an account's links and click counts
//! cargo run --bin admin -- links ann@example.com
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use outlink::application::services::DomainService;
use outlink::domain::entities::{NewUser, User};
use outlink::domain::repositories::{LinkRepository, UserRepository};
use outlink::infrastructure::Storage;
use outlink::infrastructure::security::hash_password;
use outlink::utils::domain_name::validate_domain_name;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;

/// CLI tool for managing outlink.
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
    /// Manage accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage domains
    Domain {
        #[command(subcommand)]
        action: DomainAction,
    },

    /// Show an account's links
    Links {
        /// Account email
        email: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create an account
    Create {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        /// Initial domain
        #[arg(short, long)]
        domain: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all accounts
    List,
}

#[derive(Subcommand)]
enum DomainAction {
    /// Assign a domain to an account
    Add {
        /// Account email
        email: String,

        /// Domain name
        domain: String,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let storage = Storage::postgres(pool.clone());

    match cli.command {
        Commands::User { action } => handle_user_action(action, &storage).await?,
        Commands::Domain { action } => handle_domain_action(action, &storage).await?,
        Commands::Links { email } => show_links(&storage, &email).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    storage.close().await;

    Ok(())
}

async fn handle_user_action(action: UserAction, storage: &Storage) -> Result<()> {
    match action {
        UserAction::Create {
            name,
            email,
            domain,
            yes,
        } => create_user(storage, name, email, domain, yes).await,
        UserAction::List => list_users(storage).await,
    }
}

/// Creates an account with interactive prompts.
///
/// The password is always read interactively and stored as an Argon2id hash.
async fn create_user(
    storage: &Storage,
    name: Option<String>,
    email: Option<String>,
    domain: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create Account".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Name").interact_text()?,
    };
    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let email = email.trim().to_lowercase();

    let domains = match domain.as_deref().map(str::trim) {
        Some(d) if !d.is_empty() => {
            vec![validate_domain_name(d).map_err(|e| anyhow::anyhow!("{}", e))?]
        }
        _ => Vec::new(),
    };

    let password: String = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.chars().count() >= 8 {
                Ok(())
            } else {
                Err("Password must be at least 8 characters")
            }
        })
        .interact()?;

    println!();
    println!("  Name:    {}", name.cyan());
    println!("  Email:   {}", email.cyan());
    if !domains.is_empty() {
        println!("  Domain:  {}", domains.join(", ").cyan());
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this account?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let password_hash = hash_password(&password)?;

    let user = storage
        .users()
        .create(NewUser {
            name: name.trim().to_string(),
            email,
            password_hash,
            domains,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {}", e))?;

    println!();
    println!(
        "{} (id {})",
        "✅ Account created".green().bold(),
        user.id.to_string().bright_white()
    );
    println!();

    Ok(())
}

/// Lists all accounts with their domains.
async fn list_users(storage: &Storage) -> Result<()> {
    println!("{}", "📋 Accounts".bright_blue().bold());
    println!();

    let users = storage
        .users()
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list accounts: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No accounts found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<30} {:<20} {}",
        "ID".bright_white().bold(),
        "Email".bright_white().bold(),
        "Created".bright_white().bold(),
        "Domains".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for user in &users {
        println!(
            "  {:<5} {:<30} {:<20} {}",
            user.id.to_string().bright_black(),
            user.email.cyan(),
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            user.domains.join(", ")
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn handle_domain_action(action: DomainAction, storage: &Storage) -> Result<()> {
    match action {
        DomainAction::Add { email, domain } => {
            let user = find_user(storage, &email).await?;

            let domains = DomainService::new(storage.users())
                .add_domain(user.id, &domain)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to add domain: {}", e))?;

            println!("{}", "✅ Domain added".green().bold());
            println!("  {}: {}", user.email.cyan(), domains.join(", "));
        }
    }

    Ok(())
}

/// Prints an account's links, newest first.
async fn show_links(storage: &Storage, email: &str) -> Result<()> {
    let user = find_user(storage, email).await?;

    println!(
        "{} {}",
        "🔗 Links of".bright_blue().bold(),
        user.email.cyan()
    );
    println!();

    let links = storage
        .links()
        .list_by_owner(user.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links".yellow());
        return Ok(());
    }

    for link in &links {
        println!(
            "  {:<5} {:<30} {:>8}  {}",
            link.id.to_string().bright_black(),
            link.path().bright_yellow(),
            link.clicks.to_string().bright_green(),
            link.original_url
        );
    }

    let total: i64 = links.iter().map(|l| l.clicks).sum();
    println!();
    println!(
        "  Links: {}  Clicks: {}",
        links.len().to_string().bright_white().bold(),
        total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn find_user(storage: &Storage, email: &str) -> Result<User> {
    storage
        .users()
        .find_by_email(&email.trim().to_lowercase())
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("No account with email {email}"))
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
                .fetch_one(pool)
                .await?;
            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Accounts:   {}", users.to_string().bright_green().bold());
            println!("  Links:      {}", links.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}

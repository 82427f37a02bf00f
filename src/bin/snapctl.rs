//! CLI administration tool for snaplink.
//!
//! Performs user and redirect operations either **locally** (directly
//! against the SQLite database) or **remotely** (against a running server
//! over HTTP with bearer authentication).
//!
//! # Usage
//!
//! ```bash
//! # Create an account directly in the database
//! cargo run --bin snapctl -- local user create --username admin
//!
//! # Register a redirect through a running server
//! export SNAPLINK_SERVER="http://localhost:3000"
//! export SNAPLINK_USERNAME="admin"
//! cargo run --bin snapctl -- remote redirect add https://example.com/docs --short-link docs
//!
//! # Inspect the audit log (local only)
//! cargo run --bin snapctl -- local log list
//!
//! # Check connectivity
//! cargo run --bin snapctl -- remote check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - SQLite connection string (local backend)
//! - `SNAPLINK_SERVER` - base URL of a running server (remote backend)
//! - `SNAPLINK_USERNAME` / `SNAPLINK_PASSWORD` - remote credentials
//!   (password is prompted when unset)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Password};

use snaplink::client::{Gateway, LocalGateway, RemoteGateway};
use snaplink::domain::log_event::{Actor, LogEvent};

/// CLI tool for managing snaplink.
#[derive(Parser)]
#[command(name = "snapctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    backend: Backend,
}

/// Backend selection: direct database access or a running server.
#[derive(Subcommand)]
enum Backend {
    /// Operate directly on the SQLite database
    Local {
        /// SQLite connection string
        #[arg(long, env = "DATABASE_URL", default_value = "sqlite://snaplink.db?mode=rwc")]
        database_url: String,

        #[command(subcommand)]
        command: Commands,
    },

    /// Operate against a running server over HTTP
    Remote {
        /// Base URL of the server (e.g., "http://localhost:3000")
        #[arg(long, env = "SNAPLINK_SERVER")]
        server: String,

        /// Username to authenticate as
        #[arg(long, env = "SNAPLINK_USERNAME")]
        username: String,

        /// Password (prompted when not provided)
        #[arg(long, env = "SNAPLINK_PASSWORD")]
        password: Option<String>,

        #[command(subcommand)]
        command: Commands,
    },
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage redirects
    Redirect {
        #[command(subcommand)]
        action: RedirectAction,
    },

    /// Inspect the audit log (local backend only)
    Log {
        #[command(subcommand)]
        action: LogAction,
    },

    /// Check backend connectivity
    Check,
}

/// Account management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new account
    Create {
        #[arg(short, long)]
        username: String,

        /// Password (prompted with confirmation when not provided)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Show an account
    Show {
        #[arg(short, long)]
        username: String,
    },

    /// Change username and/or password
    Update {
        #[arg(short, long)]
        username: String,

        #[arg(long)]
        new_username: Option<String>,

        /// New password (pass the flag without a value to be prompted)
        #[arg(long)]
        new_password: Option<String>,
    },

    /// Delete an account
    Delete {
        #[arg(short, long)]
        username: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Redirect management subcommands.
#[derive(Subcommand)]
enum RedirectAction {
    /// Register a new redirect
    Add {
        /// Destination URL
        url: String,

        /// Custom short link (generated when omitted)
        #[arg(short, long)]
        short_link: Option<String>,

        /// Redirect status code (301, 302, 303, 307, or 308)
        #[arg(long)]
        status: Option<u16>,

        /// Response body served alongside the redirect
        #[arg(long)]
        body: Option<String>,
    },

    /// List redirects
    List {
        #[arg(long, default_value_t = 1)]
        page: i64,

        #[arg(long, default_value_t = 20)]
        page_size: i64,
    },

    /// Show a redirect
    Show { short_link: String },

    /// Update a redirect
    Update {
        short_link: String,

        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        status: Option<u16>,

        #[arg(long)]
        body: Option<String>,
    },

    /// Remove a redirect
    Remove {
        short_link: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Audit log subcommands.
#[derive(Subcommand)]
enum LogAction {
    /// List audit log entries, newest first
    List {
        #[arg(long, default_value_t = 1)]
        page: i64,

        #[arg(long, default_value_t = 20)]
        page_size: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.backend {
        Backend::Local {
            database_url,
            command,
        } => {
            let gateway = LocalGateway::connect(&database_url)
                .await
                .context("Failed to open database")?;

            run_command(&gateway, command).await
        }
        Backend::Remote {
            server,
            username,
            password,
            command,
        } => {
            let password = match password {
                Some(p) => p,
                None => Password::new()
                    .with_prompt(format!("Password for {}", username))
                    .interact()?,
            };

            let gateway =
                RemoteGateway::new(&server, username, password).context("Failed to build client")?;

            run_command(&gateway, command).await
        }
    }
}

/// Dispatches a command against the selected backend.
async fn run_command(gateway: &dyn Gateway, command: Commands) -> Result<()> {
    match command {
        Commands::User { action } => handle_user_action(gateway, action).await,
        Commands::Redirect { action } => handle_redirect_action(gateway, action).await,
        Commands::Log { action } => handle_log_action(gateway, action).await,
        Commands::Check => handle_check(gateway).await,
    }
}

/// Dispatches account management commands.
async fn handle_user_action(gateway: &dyn Gateway, action: UserAction) -> Result<()> {
    match action {
        UserAction::Create { username, password } => {
            println!("{}", "👤 Create Account".bright_blue().bold());
            println!();

            let password = match password {
                Some(p) => p,
                None => Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords don't match")
                    .interact()?,
            };

            let user = gateway.create_user(&username, &password).await?;

            println!(
                "{} Account {} created (id {})",
                "✅".green(),
                user.username.cyan(),
                user.id.to_string().bright_black()
            );
        }
        UserAction::Show { username } => {
            let user = gateway.show_user(&username).await?;

            println!("{}", "👤 Account".bright_blue().bold());
            println!();
            println!("  ID:       {}", user.id.to_string().bright_black());
            println!("  Username: {}", user.username.cyan());
            println!(
                "  Created:  {}",
                user.created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
        }
        UserAction::Update {
            username,
            new_username,
            new_password,
        } => {
            let user = gateway
                .update_user(&username, new_username.clone(), new_password)
                .await?;

            println!(
                "{} Account updated: {}",
                "✅".green(),
                user.username.cyan()
            );

            if new_username.is_some() {
                println!(
                    "{}",
                    "⚠️  Username changed — existing tokens and stored credentials are stale"
                        .yellow()
                );
            }
        }
        UserAction::Delete { username, yes } => {
            println!("{}", "🗑  Delete Account".bright_blue().bold());
            println!();
            println!("  Username: {}", username.cyan());
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Delete this account?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            gateway.remove_user(&username).await?;

            println!("{} Account {} deleted", "✅".green(), username.cyan());
        }
    }

    Ok(())
}

/// Dispatches redirect management commands.
async fn handle_redirect_action(gateway: &dyn Gateway, action: RedirectAction) -> Result<()> {
    match action {
        RedirectAction::Add {
            url,
            short_link,
            status,
            body,
        } => {
            let redirect = gateway.add_redirect(short_link, url, status, body).await?;

            println!("{} Redirect created", "✅".green().bold());
            println!();
            println!("  Short link: {}", redirect.short_link.bright_yellow().bold());
            println!("  URL:        {}", redirect.url.cyan());
            println!(
                "  Status:     {}",
                redirect.response_status.to_string().bright_black()
            );
        }
        RedirectAction::List { page, page_size } => {
            let (items, total) = gateway.list_redirects(page, page_size).await?;

            println!("{}", "🔗 Redirects".bright_blue().bold());
            println!();

            if items.is_empty() {
                println!("{}", "  No redirects found".yellow());
                return Ok(());
            }

            println!(
                "  {:<16} {:<12} {:<40}",
                "Short link".bright_white().bold(),
                "Status".bright_white().bold(),
                "URL".bright_white().bold()
            );
            println!("  {}", "─".repeat(70).bright_black());

            for redirect in &items {
                println!(
                    "  {:<16} {:<12} {:<40}",
                    redirect.short_link.bright_yellow(),
                    redirect.response_status.to_string().bright_black(),
                    redirect.url.cyan()
                );
            }

            println!();
            println!(
                "  Page {} · {} total",
                page.to_string().bright_white(),
                total.to_string().bright_white().bold()
            );
        }
        RedirectAction::Show { short_link } => {
            let redirect = gateway.show_redirect(&short_link).await?;

            println!("{}", "🔗 Redirect".bright_blue().bold());
            println!();
            println!("  ID:         {}", redirect.id.to_string().bright_black());
            println!("  Short link: {}", redirect.short_link.bright_yellow().bold());
            println!("  URL:        {}", redirect.url.cyan());
            println!(
                "  Status:     {}",
                redirect.response_status.to_string().bright_black()
            );
            println!(
                "  Body:       {}",
                if redirect.body.is_empty() {
                    "(empty)".bright_black().to_string()
                } else {
                    redirect.body.clone()
                }
            );
            println!(
                "  Created:    {}",
                redirect
                    .created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
        }
        RedirectAction::Update {
            short_link,
            url,
            status,
            body,
        } => {
            let redirect = gateway
                .update_redirect(&short_link, url, status, body)
                .await?;

            println!(
                "{} Redirect {} updated → {}",
                "✅".green(),
                redirect.short_link.bright_yellow(),
                redirect.url.cyan()
            );
        }
        RedirectAction::Remove { short_link, yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remove redirect '{}'?", short_link))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            gateway.remove_redirect(&short_link).await?;

            println!(
                "{} Redirect {} removed",
                "✅".green(),
                short_link.bright_yellow()
            );
        }
    }

    Ok(())
}

/// Dispatches audit log commands.
async fn handle_log_action(gateway: &dyn Gateway, action: LogAction) -> Result<()> {
    match action {
        LogAction::List { page, page_size } => {
            let (entries, total) = gateway.list_log(page, page_size).await?;

            println!("{}", "📋 Audit Log".bright_blue().bold());
            println!();

            if entries.is_empty() {
                println!("{}", "  No log entries".yellow());
                return Ok(());
            }

            println!(
                "  {:<6} {:<18} {:<14} {:<40}",
                "ID".bright_white().bold(),
                "Time".bright_white().bold(),
                "Actor".bright_white().bold(),
                "Event".bright_white().bold()
            );
            println!("  {}", "─".repeat(80).bright_black());

            for entry in &entries {
                println!(
                    "  {:<6} {:<18} {:<14} {:<40}",
                    entry.id.to_string().bright_black(),
                    entry
                        .created_at
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                        .bright_black(),
                    format_actor(&entry.actor).cyan(),
                    format_event(&entry.event)
                );
            }

            println!();
            println!(
                "  Page {} · {} total",
                page.to_string().bright_white(),
                total.to_string().bright_white().bold()
            );
        }
    }

    Ok(())
}

/// Checks backend connectivity.
async fn handle_check(gateway: &dyn Gateway) -> Result<()> {
    println!("{}", "🔍 Checking backend...".bright_blue());

    let status = gateway.check().await?;

    println!("{} {}", "✅".green().bold(), status);

    Ok(())
}

/// Renders an actor for table output.
fn format_actor(actor: &Actor) -> String {
    match actor {
        Actor::Cli => "cli".to_string(),
        Actor::Api => "api".to_string(),
        Actor::User { username } => format!("user:{}", username),
    }
}

/// Renders an event for table output.
fn format_event(event: &LogEvent) -> String {
    match event {
        LogEvent::UserCreated { username } => format!("user created: {}", username),
        LogEvent::UserRead { username } => format!("user read: {}", username),
        LogEvent::UserUpdated { username } => format!("user updated: {}", username),
        LogEvent::UserRemoved { username } => format!("user removed: {}", username),
        LogEvent::RedirectCreated { short_link, url } => {
            format!("redirect created: {} → {}", short_link, url)
        }
        LogEvent::RedirectRead { short_link } => format!("redirect read: {}", short_link),
        LogEvent::RedirectUpdated { short_link } => format!("redirect updated: {}", short_link),
        LogEvent::RedirectRemoved { short_link } => format!("redirect removed: {}", short_link),
        LogEvent::RedirectMatched { short_link, url } => {
            format!("redirect matched: {} → {}", short_link, url)
        }
    }
}

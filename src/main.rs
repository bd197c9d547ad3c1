use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod auth;
mod cli;
mod config;
mod error;
mod session;

use cli::{Cli, Commands, SessionAction};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crowdax=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Setup { quick } => cli::setup::run_setup_wizard(quick).await,
        Commands::Init => cli::commands::init().await,
        Commands::Login {
            email,
            role,
            password,
        } => cli::commands::login(&email, role, password).await,
        Commands::Register { file } => cli::commands::register(&file).await,
        Commands::Logout => cli::commands::logout().await,
        Commands::Whoami { remote, format } => cli::commands::whoami(remote, format).await,
        Commands::Session { action } => match action {
            SessionAction::Show { format } => cli::commands::session_show(format).await,
            SessionAction::Clear { force } => cli::commands::session_clear(force).await,
        },
        Commands::Validate => cli::commands::validate().await,
        Commands::Refresh => cli::commands::refresh().await,
        Commands::Health => cli::commands::health().await,
        Commands::Upload {
            endpoint,
            file,
            fields,
        } => cli::commands::upload(&endpoint, &file, &fields).await,
    }
}

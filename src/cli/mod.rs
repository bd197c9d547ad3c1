//! CLI interface for the Crowdax client

pub mod commands;
mod output;
pub mod setup;

pub use output::*;

use crate::auth::models::UserRole;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crowdax")]
#[command(version)]
#[command(about = "Command-line client for the Crowdax crowdfunding platform", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive setup wizard (recommended for first-time users)
    Setup {
        /// Skip interactive prompts and use defaults
        #[arg(short, long)]
        quick: bool,
    },

    /// Initialize a new crowdax.toml configuration file (basic)
    Init,

    /// Sign in and store the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account role
        #[arg(short, long, value_enum)]
        role: RoleArg,

        /// Password (prompted interactively when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account from a registration file
    Register {
        /// Path to a JSON file with the registration fields
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Sign out and clear the stored session
    Logout,

    /// Show the signed-in user
    Whoami {
        /// Fetch the authoritative record from the backend instead of the
        /// local cache
        #[arg(short, long)]
        remote: bool,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Inspect or clear the stored session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Ask the backend whether the stored token is still valid
    Validate,

    /// Exchange the refresh token for a new access token
    Refresh,

    /// Check backend connectivity
    Health,

    /// Upload a file as multipart form data
    Upload {
        /// Endpoint to post to, e.g. /api/v1/documents
        #[arg(short, long)]
        endpoint: String,

        /// File to upload
        #[arg(short, long)]
        file: PathBuf,

        /// Extra form fields as key=value (repeatable)
        #[arg(long = "field")]
        fields: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// Show the stored session
    Show {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Clear the stored session without contacting the backend
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Entrepreneur,
    Investor,
}

impl From<RoleArg> for UserRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Entrepreneur => UserRole::Entrepreneur,
            RoleArg::Investor => UserRole::Investor,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

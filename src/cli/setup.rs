//! Interactive setup wizard for the Crowdax client
//!
//! Guides first-time users through:
//! - Backend base URL and environment selection
//! - Writing crowdax.toml
//! - An optional connectivity check against the backend

use anyhow::Result;
use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::api::ApiClient;
use crate::auth::AuthService;
use crate::config::{loader, Config, Environment};
use crate::session::SessionStore;

/// Run the interactive setup wizard
pub async fn run_setup_wizard(quick: bool) -> Result<()> {
    let term = Term::stdout();
    let theme = ColorfulTheme::default();

    let _ = term.clear_screen();
    print_welcome();

    if quick {
        return run_quick_setup().await;
    }

    let config_path = Path::new("crowdax.toml");
    if config_path.exists() {
        println!();
        let overwrite = Confirm::with_theme(&theme)
            .with_prompt("crowdax.toml already exists. Overwrite it?")
            .default(false)
            .interact()?;

        if !overwrite {
            println!();
            println!("{}", "Setup cancelled.".yellow());
            return Ok(());
        }
    }

    println!();
    println!("{}", "Let's configure the Crowdax client.".bold());
    println!();

    let mut config = Config::default();

    config.api.base_url = Input::with_theme(&theme)
        .with_prompt("Backend API base URL")
        .default(config.api.base_url.clone())
        .interact_text()?;

    let environments = ["development", "production"];
    let selected = Select::with_theme(&theme)
        .with_prompt("Environment")
        .items(&environments)
        .default(0)
        .interact()?;
    config.environment = if selected == 1 {
        Environment::Production
    } else {
        Environment::Development
    };

    println!();
    println!("{}", "Configuration Summary".bold().underline());
    println!();
    println!("  API base URL: {}", config.api.base_url.cyan());
    println!("  Environment:  {:?}", config.environment);
    println!("  Session file: {}", config.session.file.display());
    println!();

    let save = Confirm::with_theme(&theme)
        .with_prompt("Save this configuration?")
        .default(true)
        .interact()?;

    if !save {
        println!("{}", "Setup cancelled.".yellow());
        return Ok(());
    }

    fs::write(config_path, toml::to_string_pretty(&config)?)?;
    println!();
    println!("{} Created crowdax.toml", "✓".green());

    println!();
    let check = Confirm::with_theme(&theme)
        .with_prompt("Check backend connectivity now?")
        .default(true)
        .interact()?;

    if check {
        check_backend(&config).await;
    }

    print_next_steps();
    Ok(())
}

/// Non-interactive setup: write the default config and stop
async fn run_quick_setup() -> Result<()> {
    let config_path = Path::new("crowdax.toml");
    if !config_path.exists() {
        fs::write(config_path, loader::default_config_content())?;
        println!("{} Created crowdax.toml with defaults", "✓".green());
    } else {
        println!("{}", "crowdax.toml already exists, leaving it alone.".yellow());
    }
    print_next_steps();
    Ok(())
}

/// Probe `/api/v1/health` with a spinner
async fn check_backend(config: &Config) {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("Invalid spinner template - this is a bug in the codebase"),
    );
    spinner.set_message(format!("Contacting {}...", config.api.base_url));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = match ApiClient::new(config, SessionStore::in_memory()) {
        Ok(api) => AuthService::new(api).health().await,
        Err(e) => Err(e),
    };

    spinner.finish_and_clear();
    match result {
        Ok(_) => println!("{} Backend is reachable", "✓".green()),
        Err(e) => {
            println!("{} Backend is unreachable: {}", "⚠".yellow(), e);
            println!("  You can fix the URL later in crowdax.toml");
        }
    }
}

fn print_welcome() {
    println!();
    println!("{}", "Welcome to Crowdax".bold().cyan());
    println!("This wizard sets up the client for your backend.");
}

fn print_next_steps() {
    println!();
    println!("{}", "Next steps".bold());
    println!("  1. crowdax health          # verify connectivity");
    println!("  2. crowdax login -e <email> -r <role>");
    println!("  3. crowdax whoami");
    println!();
}

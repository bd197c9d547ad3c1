//! CLI command implementations

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::api::ApiClient;
use crate::auth::models::{LoginCredentials, RegisterData};
use crate::auth::AuthService;
use crate::cli::{confirm, error, info, print_session_table, print_user_detail, success, warn, OutputFormat, RoleArg};
use crate::config::{self, Config};
use crate::session::SessionStore;

/// Build the service stack: resolved config, file-backed session store,
/// one API client
fn connect() -> Result<(Config, AuthService)> {
    let config = config::resolve();
    let session = SessionStore::open(config.session.file.clone())?;
    let api = ApiClient::new(&config, session)?;
    Ok((config, AuthService::new(api)))
}

/// Surface a forced return-to-login, if one is pending
async fn note_session_expired(service: &AuthService) {
    if service.api().session().take_login_redirect().await {
        warn("Session expired. Run 'crowdax login' to sign in again.");
    }
}

/// Initialize a new crowdax.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = Path::new("crowdax.toml");

    if config_path.exists() {
        warn("crowdax.toml already exists");
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success("Created crowdax.toml");
    info("Edit the configuration file and run 'crowdax login' to sign in");

    Ok(())
}

/// Sign in and store the session
pub async fn login(email: &str, role: RoleArg, password: Option<String>) -> Result<()> {
    let (_, service) = connect()?;

    let password = match password {
        Some(password) => password,
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()?,
    };

    let credentials = LoginCredentials {
        email: email.to_string(),
        password,
        role: role.into(),
    };

    match service.login(&credentials).await {
        Ok(response) => {
            success(&format!(
                "Logged in as {} ({})",
                response.user.email, response.user.role
            ));
            if let Some(message) = response.message {
                info(&message);
            }
            Ok(())
        }
        Err(e) => {
            error(&format!("Login failed: {}", e));
            note_session_expired(&service).await;
            Err(e.into())
        }
    }
}

/// Create an account from a registration file
pub async fn register(file: &Path) -> Result<()> {
    let (_, service) = connect()?;

    let content = fs::read_to_string(file)?;
    let data: RegisterData = serde_json::from_str(&content)?;

    match service.register(&data).await {
        Ok(response) => {
            success(&format!(
                "Registered {} as {}",
                response.user.email, response.user.role
            ));
            Ok(())
        }
        Err(e) => {
            error(&format!("Registration failed: {}", e));
            Err(e.into())
        }
    }
}

/// Sign out and clear the stored session
pub async fn logout() -> Result<()> {
    let (_, service) = connect()?;

    service.logout().await?;
    // logout() sets the redirect flag by design; consume it quietly
    service.api().session().take_login_redirect().await;
    success("Logged out");
    Ok(())
}

/// Show the signed-in user
pub async fn whoami(remote: bool, format: OutputFormat) -> Result<()> {
    let (_, service) = connect()?;

    let user = if remote {
        let user = service.me().await;
        note_session_expired(&service).await;
        user
    } else {
        service.current_user().await
    };

    let Some(user) = user else {
        warn("Not signed in. Run 'crowdax login' first.");
        return Ok(());
    };

    match format {
        OutputFormat::Table => print_user_detail(&user),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&user)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&user)?),
    }

    Ok(())
}

/// Show the stored session
pub async fn session_show(format: OutputFormat) -> Result<()> {
    let (_, service) = connect()?;
    let store = service.api().session();

    let token = store.token().await;
    let refresh_token = store.refresh_token().await;
    let user = store.user().await;

    match format {
        OutputFormat::Table => {
            print_session_table(token.as_deref(), refresh_token.as_deref(), user.as_ref());
        }
        OutputFormat::Json | OutputFormat::Yaml => {
            let value = serde_json::json!({
                "authenticated": token.is_some(),
                "user": user,
            });
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&value)?),
                _ => print!("{}", serde_yaml::to_string(&value)?),
            }
        }
    }

    Ok(())
}

/// Clear the stored session without contacting the backend
pub async fn session_clear(force: bool) -> Result<()> {
    let (_, service) = connect()?;

    if !force && !confirm("Clear the stored session?") {
        info("Cancelled");
        return Ok(());
    }

    service.api().session().clear().await?;
    success("Session cleared");
    Ok(())
}

/// Ask the backend whether the stored token is still valid
pub async fn validate() -> Result<()> {
    let (_, service) = connect()?;

    if !service.is_authenticated().await {
        warn("No stored token. Run 'crowdax login' first.");
        return Ok(());
    }

    if service.validate_token().await {
        success("Token is valid");
    } else {
        warn("Token is invalid or expired");
    }
    note_session_expired(&service).await;

    Ok(())
}

/// Exchange the refresh token for a new access token
pub async fn refresh() -> Result<()> {
    let (_, service) = connect()?;

    match service.refresh_token().await {
        Ok(_) => {
            success("Token refreshed");
            Ok(())
        }
        Err(e) => {
            error(&format!("Token refresh failed: {}", e));
            note_session_expired(&service).await;
            Err(e.into())
        }
    }
}

/// Check backend connectivity
pub async fn health() -> Result<()> {
    let (config, service) = connect()?;

    info(&format!("Checking {}", config.api.base_url));
    match service.health().await {
        Ok(body) => {
            success("Backend is reachable");
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        Err(e) => {
            error(&format!("Backend is unreachable: {}", e));
            Err(e.into())
        }
    }
}

/// Upload a file as multipart form data
pub async fn upload(endpoint: &str, file: &Path, fields: &[String]) -> Result<()> {
    let (_, service) = connect()?;

    let mut pairs = Vec::with_capacity(fields.len());
    for field in fields {
        let Some((key, value)) = field.split_once('=') else {
            error(&format!("Invalid field '{}', expected key=value", field));
            anyhow::bail!("invalid form field");
        };
        pairs.push((key, value));
    }

    match service
        .api()
        .upload_file::<serde_json::Value>(endpoint, file, &pairs)
        .await
    {
        Ok(body) => {
            success(&format!("Uploaded {}", file.display()));
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        Err(e) => {
            error(&format!("Upload failed: {}", e));
            note_session_expired(&service).await;
            Err(e.into())
        }
    }
}

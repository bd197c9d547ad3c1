//! Session storage
//!
//! One session per store: access token, refresh token, and the cached user
//! record, persisted as a single JSON file. All mutation goes through the
//! writer lock, and the file is rewritten inside the critical section so it
//! never diverges from memory.

use crate::auth::models::User;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    refresh_token: Option<String>,
    user: Option<User>,
    /// Set when the session was invalidated and the caller should be sent
    /// back to login (401 response, refresh failure, logout)
    login_redirect: bool,
}

/// On-disk shape of the session file. Keys match the browser-storage keys
/// the backend contract was written against.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(rename = "authToken", default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,

    #[serde(rename = "refreshToken", default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,

    #[serde(rename = "user", default, skip_serializing_if = "Option::is_none")]
    user: Option<User>,
}

/// Shared handle to the persisted session
pub struct SessionStore {
    state: Arc<RwLock<SessionState>>,
    path: Option<PathBuf>,
}

impl SessionStore {
    /// In-memory store with no file persistence
    pub fn in_memory() -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::default())),
            path: None,
        }
    }

    /// Open a file-backed store, loading the session if the file exists
    pub fn open(path: PathBuf) -> Result<Self> {
        let state = match fs::read_to_string(&path) {
            Ok(content) => {
                let file: SessionFile = serde_json::from_str(&content)?;
                SessionState {
                    token: file.token,
                    refresh_token: file.refresh_token,
                    user: file.user,
                    login_redirect: false,
                }
            }
            Err(_) => SessionState::default(),
        };

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            path: Some(path),
        })
    }

    /// Current access token
    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    /// Current refresh token
    pub async fn refresh_token(&self) -> Option<String> {
        self.state.read().await.refresh_token.clone()
    }

    /// Cached user record
    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    /// True when an access token is present
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.token.is_some()
    }

    /// Store a fresh session after a successful login or registration
    pub async fn store_login(
        &self,
        token: String,
        refresh_token: Option<String>,
        user: User,
    ) -> Result<()> {
        let mut state = self.state.write().await;
        state.token = Some(token);
        state.refresh_token = refresh_token;
        state.user = Some(user);
        state.login_redirect = false;
        self.persist(&state)
    }

    /// Replace only the access token (token refresh)
    pub async fn store_token(&self, token: String) -> Result<()> {
        let mut state = self.state.write().await;
        state.token = Some(token);
        self.persist(&state)
    }

    /// Replace the cached user record
    pub async fn update_user(&self, user: User) -> Result<()> {
        let mut state = self.state.write().await;
        state.user = Some(user);
        self.persist(&state)
    }

    /// Clear the whole session
    pub async fn clear(&self) -> Result<()> {
        let mut state = self.state.write().await;
        state.token = None;
        state.refresh_token = None;
        state.user = None;
        self.persist(&state)
    }

    /// Clear the session and flag that the caller should return to login
    pub async fn invalidate(&self) -> Result<()> {
        let mut state = self.state.write().await;
        state.token = None;
        state.refresh_token = None;
        state.user = None;
        state.login_redirect = true;
        self.persist(&state)
    }

    /// Whether a forced return to login is pending
    pub async fn login_redirect_pending(&self) -> bool {
        self.state.read().await.login_redirect
    }

    /// Consume the pending login redirect, if any
    pub async fn take_login_redirect(&self) -> bool {
        let mut state = self.state.write().await;
        std::mem::take(&mut state.login_redirect)
    }

    fn persist(&self, state: &SessionState) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = SessionFile {
            token: state.token.clone(),
            refresh_token: state.refresh_token.clone(),
            user: state.user.clone(),
        };
        fs::write(path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }
}

impl Clone for SessionStore {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            path: self.path.clone(),
        }
    }
}

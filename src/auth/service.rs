//! Auth lifecycle orchestration over the API facade

use crate::api::ApiClient;
use crate::auth::case::snake_case_keys;
use crate::auth::models::{
    AuthEnvelope, AuthResponse, LoginCredentials, RefreshResponse, RegisterData, User,
};
use crate::error::{Error, Result};
use crate::session::SessionStore;
use serde_json::{json, Value};

pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    fn session(&self) -> &SessionStore {
        self.api.session()
    }

    /// Sign in and persist the session.
    ///
    /// The backend wraps credentials in a `user` object and answers with the
    /// `{ status, data: { user, token } }` envelope.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse> {
        let body = json!({
            "user": {
                "email": credentials.email,
                "password": credentials.password,
            }
        });

        let envelope: AuthEnvelope = self.api.post("/users/sign_in", &body).await?;
        let user = envelope.data.user;
        let token = envelope.data.token;
        let refresh_token = envelope.data.refresh_token;

        self.session()
            .store_login(token.clone(), refresh_token.clone(), user.clone())
            .await?;

        Ok(AuthResponse {
            user,
            token,
            refresh_token,
            message: Some(envelope.status.message),
        })
    }

    /// Create an account and persist the session, exactly as `login` does.
    /// All payload keys are snake-cased before sending, including nested
    /// profile objects and arrays.
    pub async fn register(&self, data: &RegisterData) -> Result<AuthResponse> {
        let payload = snake_case_keys(serde_json::to_value(data)?);
        let body = json!({ "user": payload });

        let envelope: AuthEnvelope = self.api.post("/users", &body).await?;
        let user = envelope.data.user;
        let token = envelope.data.token;
        let refresh_token = envelope.data.refresh_token;

        self.session()
            .store_login(token.clone(), refresh_token.clone(), user.clone())
            .await?;

        Ok(AuthResponse {
            user,
            token,
            refresh_token,
            message: Some(envelope.status.message),
        })
    }

    /// Sign out. The server call is best-effort; the local session is
    /// cleared no matter what, so logout cannot be blocked by a dead
    /// backend.
    pub async fn logout(&self) -> Result<()> {
        if let Err(e) = self.api.post::<Value, _>("/auth/logout", &json!({})).await {
            tracing::warn!("Logout API call failed: {}", e);
        }
        self.session().invalidate().await
    }

    /// Cached user record; never touches the network
    pub async fn current_user(&self) -> Option<User> {
        self.session().user().await
    }

    /// True when an access token is stored; never touches the network
    pub async fn is_authenticated(&self) -> bool {
        self.session().is_authenticated().await
    }

    /// Stored access token; never touches the network
    pub async fn token(&self) -> Option<String> {
        self.session().token().await
    }

    /// Replace the cached user record
    pub async fn update_user(&self, user: User) -> Result<()> {
        self.session().update_user(user).await
    }

    /// Ask the backend whether the stored token is still good. `false`
    /// without a stored token or on any error; the session is untouched.
    pub async fn validate_token(&self) -> bool {
        let Some(token) = self.token().await else {
            return false;
        };
        self.api
            .get_with_params::<Value>("/auth/validate", &[("token", token.as_str())])
            .await
            .is_ok()
    }

    /// Exchange the refresh token for a new access token. Any failure,
    /// including a missing refresh token, invalidates the whole session:
    /// refresh failure means the session is gone, not that it is worth
    /// retrying.
    pub async fn refresh_token(&self) -> Result<String> {
        let Some(refresh_token) = self.session().refresh_token().await else {
            self.session().invalidate().await?;
            return Err(Error::Api("No refresh token available".to_string()));
        };

        let body = json!({ "refresh_token": refresh_token });
        match self.api.post::<RefreshResponse, _>("/auth/refresh", &body).await {
            Ok(response) => {
                self.session().store_token(response.token.clone()).await?;
                Ok(response.token)
            }
            Err(e) => {
                tracing::error!("Token refresh failed: {}", e);
                // A 401 already invalidated; do it again for every other
                // failure shape so the outcome is uniform
                self.session().invalidate().await?;
                Err(e)
            }
        }
    }

    /// Fetch the authoritative user record and refresh the cached copy.
    /// Optional re-validation; `None` on any failure.
    pub async fn me(&self) -> Option<User> {
        match self.api.get::<User>("/auth/me").await {
            Ok(user) => {
                if let Err(e) = self.session().update_user(user.clone()).await {
                    tracing::warn!("Failed to cache user record: {}", e);
                }
                Some(user)
            }
            Err(e) => {
                tracing::error!("Failed to get current user: {}", e);
                None
            }
        }
    }

    /// Backend liveness probe
    pub async fn health(&self) -> Result<Value> {
        self.api.get("/api/v1/health").await
    }
}

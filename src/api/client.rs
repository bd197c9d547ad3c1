//! Configured HTTP client with auth decoration and global response handling
//!
//! One `ApiClient` is constructed at startup and passed by reference to
//! whatever consumes it; there is no hidden global instance. Every request
//! picks up the bearer token from the session store, and every non-success
//! response goes through the same normalizer, so a 401 clears the session
//! no matter which call produced it.

use crate::config::Config;
use crate::error::{Error, FieldErrors, Result};
use crate::session::SessionStore;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{multipart, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

const GENERIC_ERROR: &str = "An unexpected error occurred";
const FLASH_FALLBACK: &str = "An error occurred";

#[derive(Debug, serde::Deserialize)]
struct CsrfTokenResponse {
    csrf_token: String,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
    csrf_token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(config: &Config, session: SessionStore) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.api.timeout_ms))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            session,
            csrf_token: Arc::new(RwLock::new(None)),
        })
    }

    /// The session store this client reads tokens from
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let request = self.http.request(Method::GET, self.url_for(endpoint));
        self.dispatch(request).await
    }

    pub async fn get_with_params<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let request = self
            .http
            .request(Method::GET, self.url_for(endpoint))
            .query(params);
        self.dispatch(request).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        let request = self
            .http
            .request(Method::POST, self.url_for(endpoint))
            .json(body);
        self.dispatch(request).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        let request = self
            .http
            .request(Method::PUT, self.url_for(endpoint))
            .json(body);
        self.dispatch(request).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        let request = self
            .http
            .request(Method::PATCH, self.url_for(endpoint))
            .json(body);
        self.dispatch(request).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let request = self.http.request(Method::DELETE, self.url_for(endpoint));
        self.dispatch(request).await
    }

    /// Send a file as multipart form data, with optional extra text fields.
    /// The part's content type is guessed from the file name.
    pub async fn upload_file<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        file: &Path,
        fields: &[(&str, &str)],
    ) -> Result<T> {
        let bytes = tokio::fs::read(file).await?;
        let file_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        let mime = mime_guess::from_path(file).first_or_octet_stream();

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime.as_ref())?;
        let mut form = multipart::Form::new().part("file", part);
        for (key, value) in fields {
            form = form.text(key.to_string(), value.to_string());
        }

        let request = self
            .http
            .request(Method::POST, self.url_for(endpoint))
            .multipart(form);
        self.dispatch(request).await
    }

    /// Fetch and cache the CSRF token; subsequent requests carry it as
    /// `X-CSRF-Token`. Failure is logged, not fatal.
    pub async fn fetch_csrf_token(&self) -> Option<String> {
        match self.get::<CsrfTokenResponse>("/csrf_token").await {
            Ok(response) => {
                let mut slot = self.csrf_token.write().await;
                *slot = Some(response.csrf_token.clone());
                Some(response.csrf_token)
            }
            Err(e) => {
                tracing::warn!("Could not fetch CSRF token: {}", e);
                None
            }
        }
    }

    async fn dispatch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let request = self.decorate(request).await;
        let response = request.send().await?;
        let value = self.check(response).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Attach the bearer token and CSRF token, when present
    async fn decorate(&self, request: RequestBuilder) -> RequestBuilder {
        let mut request = request;
        if let Some(token) = self.session.token().await {
            request = request.bearer_auth(token);
        }
        if let Some(csrf) = self.csrf_token.read().await.clone() {
            request = request.header("X-CSRF-Token", csrf);
        }
        request
    }

    async fn check(&self, response: Response) -> Result<Value> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            if bytes.is_empty() {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let body: Option<Value> = serde_json::from_slice(&bytes).ok();
        Err(self.error_for(status, body).await)
    }

    /// Normalize a non-success response into the tagged error type
    async fn error_for(&self, status: StatusCode, body: Option<Value>) -> Error {
        if status == StatusCode::UNAUTHORIZED {
            // Global side effect: the session dies regardless of which
            // call got the 401
            if let Err(e) = self.session.invalidate().await {
                tracing::warn!("Failed to clear session after 401: {}", e);
            }
            return Error::Unauthorized;
        }

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            if let Some(errors) = body.as_ref().and_then(extract_field_errors) {
                return Error::Validation(errors);
            }
        }

        let message = body
            .as_ref()
            .and_then(extract_message)
            .unwrap_or_else(|| GENERIC_ERROR.to_string());

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), message = %message, "Server error");
            return Error::Server {
                status: status.as_u16(),
                message,
            };
        }

        Error::Api(message)
    }
}

/// Pull the per-field errors map out of a 422 body
fn extract_field_errors(body: &Value) -> Option<FieldErrors> {
    let errors = body.get("errors")?.as_object()?;
    let mut map = FieldErrors::new();
    for (field, messages) in errors {
        let messages = match messages {
            Value::Array(items) => items
                .iter()
                .filter_map(|m| m.as_str().map(str::to_string))
                .collect(),
            Value::String(message) => vec![message.clone()],
            _ => continue,
        };
        map.insert(field.clone(), messages);
    }
    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// Backend error shapes, in precedence order: `error`, `message`, then
/// `flash.error` / `flash.alert`
fn extract_message(body: &Value) -> Option<String> {
    if let Some(error) = body.get("error").and_then(Value::as_str) {
        return Some(error.to_string());
    }
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }
    if let Some(flash) = body.get("flash") {
        let message = flash
            .get("error")
            .and_then(Value::as_str)
            .or_else(|| flash.get("alert").and_then(Value::as_str))
            .unwrap_or(FLASH_FALLBACK);
        return Some(message.to_string());
    }
    None
}

//! HTTP client with the request/response interceptors every call goes through.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, XeriwoError};
use crate::models::User;
use crate::navigation::Navigator;
use crate::storage::{StorageAdapter, keys};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("xeriwo/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Which credential the request interceptor attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Auth {
    /// `Authorization: Bearer <token>` from the user session
    User,
    /// Raw admin token when one is stored, otherwise the user bearer
    Admin,
}

/// Marketplace API client.
///
/// Cheap to clone; clones share the HTTP pool, session storage and navigator.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    storage: Arc<dyn StorageAdapter>,
    navigator: Navigator,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.config.base_url)
            .field("view", &self.navigator.current())
            .finish()
    }
}

impl Client {
    pub fn new(
        config: ClientConfig,
        storage: Arc<dyn StorageAdapter>,
        navigator: Navigator,
    ) -> Result<Self> {
        url::Url::parse(&config.base_url).map_err(|e| {
            XeriwoError::validation(format!("Invalid API base URL '{}': {}", config.base_url, e))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(config),
            storage,
            navigator,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn storage(&self) -> &dyn StorageAdapter {
        self.storage.as_ref()
    }

    /// Session token, read from storage at call time.
    pub fn token(&self) -> Option<String> {
        self.storage.get(keys::TOKEN).filter(|t| !t.is_empty())
    }

    /// The signed-in user, if a token and a readable user record are stored.
    pub fn current_user(&self) -> Option<User> {
        self.token()?;
        let raw = self.storage.get(keys::USER)?;
        serde_json::from_str(&raw).ok()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    pub fn store_session(&self, token: &str, user: &User) {
        self.storage.set(keys::TOKEN, token);
        match serde_json::to_string(user) {
            Ok(raw) => self.storage.set(keys::USER, &raw),
            Err(e) => tracing::warn!("Failed to serialize user for session: {}", e),
        }
    }

    pub fn clear_session(&self) {
        self.storage.remove(keys::TOKEN);
        self.storage.remove(keys::USER);
    }

    pub fn admin_token(&self) -> Option<String> {
        self.storage.get(keys::ADMIN_TOKEN).filter(|t| !t.is_empty())
    }

    pub fn store_admin_session(&self, token: &str, admin: Option<&Value>) {
        self.storage.set(keys::ADMIN_TOKEN, token);
        if let Some(admin) = admin {
            self.storage.set(keys::ADMIN_DATA, &admin.to_string());
        }
    }

    pub fn clear_admin_session(&self) {
        self.storage.remove(keys::ADMIN_TOKEN);
        self.storage.remove(keys::ADMIN_DATA);
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: Auth,
        query: &[(&str, String)],
    ) -> Result<Option<T>> {
        let builder = self.http.get(self.url(path)).query(query);
        self.execute(builder, Method::GET, path, auth).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        auth: Auth,
        body: &B,
    ) -> Result<Option<T>> {
        let builder = self.http.post(self.url(path)).json(body);
        self.execute(builder, Method::POST, path, auth).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: Auth,
    ) -> Result<Option<T>> {
        let builder = self.http.post(self.url(path));
        self.execute(builder, Method::POST, path, auth).await
    }

    pub(crate) async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        auth: Auth,
        body: &B,
    ) -> Result<Option<T>> {
        let builder = self.http.put(self.url(path)).json(body);
        self.execute(builder, Method::PUT, path, auth).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: Auth,
    ) -> Result<Option<T>> {
        let builder = self.http.delete(self.url(path));
        self.execute(builder, Method::DELETE, path, auth).await
    }

    /// Request interceptor: attach credentials read from storage right now.
    fn authorize(&self, builder: RequestBuilder, auth: Auth, method: &Method, path: &str) -> RequestBuilder {
        let header = match auth {
            Auth::Admin => self
                .admin_token()
                .or_else(|| self.token().map(|t| format!("Bearer {}", t))),
            Auth::User => self.token().map(|t| format!("Bearer {}", t)),
        };

        tracing::debug!(
            method = %method,
            path,
            token_present = header.is_some(),
            "API request"
        );

        match header {
            Some(value) => builder.header(AUTHORIZATION, value),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        method: Method,
        path: &str,
        auth: Auth,
    ) -> Result<Option<T>> {
        let response = self
            .authorize(builder, auth, &method, path)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(method = %method, path, "API request failed: {}", e);
                XeriwoError::from(e)
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(status = status.as_u16(), path, "API response");
            let body: Value = response
                .json()
                .await
                .map_err(|e| XeriwoError::decode(format!("Invalid JSON from {}: {}", path, e)))?;
            return unwrap_envelope(body);
        }

        let payload = response.json::<Value>().await.ok();
        let err = XeriwoError::from_response(status.as_u16(), status.canonical_reason(), payload);

        tracing::warn!(
            status = status.as_u16(),
            method = %method,
            path,
            "API response error: {}",
            err.message
        );

        match status.as_u16() {
            401 => self.handle_unauthorized(),
            404 => tracing::info!(path, "Resource not found"),
            429 => tracing::info!(path, "Rate limited - please wait before trying again"),
            _ => {}
        }

        Err(err)
    }

    /// Response interceptor for 401: drop the session and bounce to login.
    fn handle_unauthorized(&self) {
        self.clear_session();
        if self.navigator.redirect_to_login() {
            tracing::info!("Authentication failed - redirecting to login");
        }
    }
}

/// `Ok(None)` when `success` is missing or false; the body itself becomes `T`
/// otherwise (extra envelope fields are ignored by serde).
pub(crate) fn unwrap_envelope<T: DeserializeOwned>(body: Value) -> Result<Option<T>> {
    if body.get("success").and_then(Value::as_bool) != Some(true) {
        return Ok(None);
    }
    serde_json::from_value(body)
        .map(Some)
        .map_err(|e| XeriwoError::decode(e.to_string()))
}

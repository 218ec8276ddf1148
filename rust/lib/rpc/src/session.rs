//! Session sources: where the `session_id` cookie for each call comes from.
//!
//! Same shape as an OAuth2 token source: the client asks before every
//! call, and the source decides whether to reuse, fetch or omit it.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, SET_COOKIE};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::error::RpcError;

/// Name of the ERP's session cookie.
pub const SESSION_COOKIE: &str = "session_id";

/// Supplies the session id sent with every call.
#[async_trait]
pub trait SessionSource: Send + Sync + 'static {
    /// `Ok(None)` sends the call without a session cookie.
    async fn session_id(&self) -> Result<Option<String>, RpcError>;

    /// Forget any cached session so the next `session_id` fetches a new one.
    async fn invalidate(&self) {}
}

/// Anonymous calls.
pub struct NoSession;

#[async_trait]
impl SessionSource for NoSession {
    async fn session_id(&self) -> Result<Option<String>, RpcError> {
        Ok(None)
    }
}

/// A session id obtained elsewhere (browser cookie, earlier login).
pub struct StaticSession(String);

impl StaticSession {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self(session_id.into())
    }
}

#[async_trait]
impl SessionSource for StaticSession {
    async fn session_id(&self) -> Result<Option<String>, RpcError> {
        Ok(Some(self.0.clone()))
    }
}

/// Database login. Authenticates lazily on first use and caches the
/// session until it is invalidated.
pub struct PasswordLogin {
    http: reqwest::Client,
    base_url: String,
    database: String,
    login: String,
    password: String,
    cached: tokio::sync::RwLock<Option<String>>,
}

#[derive(Deserialize)]
struct AuthenticateResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<AuthenticateError>,
}

#[derive(Deserialize)]
struct AuthenticateError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<AuthenticateErrorData>,
}

#[derive(Deserialize)]
struct AuthenticateErrorData {
    #[serde(default)]
    message: String,
}

impl PasswordLogin {
    pub fn new(
        base_url: impl Into<String>,
        database: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            database: database.into(),
            login: login.into(),
            password: password.into(),
            cached: tokio::sync::RwLock::new(None),
        }
    }

    async fn authenticate(&self) -> Result<String, RpcError> {
        let url = format!("{}/web/session/authenticate", self.base_url);
        debug!(%url, login = %self.login, db = %self.database, "authenticating");
        let resp = self
            .http
            .post(&url)
            .json(&json!({
                "jsonrpc": "2.0",
                "method": "call",
                "params": {
                    "db": self.database,
                    "login": self.login,
                    "password": self.password,
                },
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RpcError::Auth(format!("login failed ({}): {}", status.as_u16(), body)));
        }

        let session = session_cookie(resp.headers());
        let body: AuthenticateResponse = resp
            .json()
            .await
            .map_err(|e| RpcError::Decode(format!("login response: {}", e)))?;

        if let Some(err) = body.error {
            let message = err
                .data
                .map(|d| d.message)
                .filter(|m| !m.is_empty())
                .unwrap_or(err.message);
            return Err(RpcError::Auth(message));
        }
        let uid = body.result.as_ref().and_then(|r| r.get("uid")).and_then(Value::as_i64);
        if uid.is_none() {
            return Err(RpcError::Auth("invalid login or password".into()));
        }
        let session =
            session.ok_or_else(|| RpcError::Auth("server did not set a session cookie".into()))?;
        info!(login = %self.login, uid, "authenticated");
        Ok(session)
    }
}

#[async_trait]
impl SessionSource for PasswordLogin {
    async fn session_id(&self) -> Result<Option<String>, RpcError> {
        if let Some(session) = self.cached.read().await.as_ref() {
            return Ok(Some(session.clone()));
        }

        let mut guard = self.cached.write().await;
        // Another caller may have logged in while we waited for the lock.
        if let Some(session) = guard.as_ref() {
            return Ok(Some(session.clone()));
        }
        let fresh = self.authenticate().await?;
        *guard = Some(fresh.clone());
        Ok(Some(fresh))
    }

    async fn invalidate(&self) {
        self.cached.write().await.take();
    }
}

/// Pull the session id out of `Set-Cookie` response headers.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim() == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

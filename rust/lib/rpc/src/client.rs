//! JSON-RPC client for the ERP's `call_kw` endpoint.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::COOKIE;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::RpcError;
use crate::session::{SessionSource, SESSION_COOKIE};

/// Invoke a model method by name.
///
/// The dashboard service talks to the ERP only through this trait, so a
/// test can stand in a scripted implementation.
#[async_trait]
pub trait OrmCall: Send + Sync + 'static {
    async fn call_kw(
        &self,
        model: &str,
        method: &str,
        args: Value,
        kwargs: Value,
    ) -> Result<Value, RpcError>;
}

/// Decode a `call_kw` result into `T`.
pub async fn call_typed<C, T>(
    client: &C,
    model: &str,
    method: &str,
    args: Value,
) -> Result<T, RpcError>
where
    C: OrmCall + ?Sized,
    T: DeserializeOwned,
{
    let value = client.call_kw(model, method, args, json!({})).await?;
    serde_json::from_value(value)
        .map_err(|e| RpcError::Decode(format!("{}.{}: {}", model, method, e)))
}

pub struct RpcClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionSource>,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(base_url: &str, session: Arc<dyn SessionSource>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_once(
        &self,
        model: &str,
        method: &str,
        args: &Value,
        kwargs: &Value,
    ) -> Result<Value, RpcError> {
        let url = format!("{}/web/dataset/call_kw/{}/{}", self.base_url, model, method);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let envelope = json!({
            "jsonrpc": "2.0",
            "method": "call",
            "id": id,
            "params": {
                "model": model,
                "method": method,
                "args": args,
                "kwargs": kwargs,
            },
        });

        let mut req = self.http.post(&url).json(&envelope);
        if let Some(session) = self.session.session_id().await? {
            req = req.header(COOKIE, format!("{}={}", SESSION_COOKIE, session));
        }
        debug!(%model, %method, id, "call_kw");

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RpcError::Http {
                status: status.as_u16(),
                body,
            });
        }
        let body: Value = resp
            .json()
            .await
            .map_err(|e| RpcError::Decode(e.to_string()))?;
        decode_response(body)
    }
}

#[async_trait]
impl OrmCall for RpcClient {
    async fn call_kw(
        &self,
        model: &str,
        method: &str,
        args: Value,
        kwargs: Value,
    ) -> Result<Value, RpcError> {
        match self.post_once(model, method, &args, &kwargs).await {
            Err(e) if e.is_session_expired() => {
                warn!(%model, %method, "session expired, logging in again");
                self.session.invalidate().await;
                self.post_once(model, method, &args, &kwargs).await
            }
            other => other,
        }
    }
}

#[derive(Deserialize)]
struct ErrorObject {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<ErrorData>,
}

#[derive(Deserialize)]
struct ErrorData {
    #[serde(default)]
    name: String,
    #[serde(default)]
    message: String,
}

/// Split a JSON-RPC response body into its result or a server error.
///
/// The server's human-readable text lives in `error.data.message`; the
/// top-level `error.message` is a generic label used only as fallback.
pub fn decode_response(mut body: Value) -> Result<Value, RpcError> {
    if let Some(error) = body.get_mut("error").map(Value::take) {
        if !error.is_null() {
            let err: ErrorObject = serde_json::from_value(error)
                .map_err(|e| RpcError::Decode(format!("error object: {}", e)))?;
            let (name, message) = match err.data {
                Some(data) if !data.message.is_empty() => (data.name, data.message),
                Some(data) => (data.name, err.message),
                None => (String::new(), err.message),
            };
            return Err(RpcError::Server {
                code: err.code,
                name,
                message,
            });
        }
    }
    match body.get_mut("result") {
        Some(result) => Ok(result.take()),
        None => Err(RpcError::Decode("response has neither result nor error".into())),
    }
}

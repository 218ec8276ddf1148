//! Remote-call invoker for the ERP web API.
//!
//! `RpcClient` posts JSON-RPC 2.0 envelopes to
//! `/web/dataset/call_kw/{model}/{method}` and decodes the reply.
//! Authentication is pluggable through [`SessionSource`]:
//!
//! ```ignore
//! let session = Arc::new(PasswordLogin::new(url, "prod", "admin", "secret"));
//! let client = RpcClient::new(url, session);
//! let tags = client.call_kw("scrap.dashboard", "get_scrap_reason_tags", json!([]), json!({})).await?;
//! ```

pub mod client;
pub mod error;
pub mod session;

pub use client::{call_typed, decode_response, OrmCall, RpcClient};
pub use error::{RpcError, SESSION_EXPIRED_CODE};
pub use session::{session_cookie, NoSession, PasswordLogin, SessionSource, StaticSession, SESSION_COOKIE};

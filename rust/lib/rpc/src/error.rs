use thiserror::Error;

/// Server error code the ERP uses for an expired or unknown session.
pub const SESSION_EXPIRED_CODE: i64 = 100;

const SESSION_EXPIRED_NAME: &str = "odoo.http.SessionExpiredException";

/// Remote-call failure.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The server answered with a JSON-RPC `error` object.
    #[error("{message}")]
    Server {
        code: i64,
        /// Exception class reported by the server, empty if absent.
        name: String,
        message: String,
    },

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("auth: {0}")]
    Auth(String),

    #[error("decode: {0}")]
    Decode(String),
}

impl RpcError {
    pub fn is_session_expired(&self) -> bool {
        matches!(
            self,
            RpcError::Server { code, name, .. }
                if *code == SESSION_EXPIRED_CODE || name == SESSION_EXPIRED_NAME
        )
    }

    /// Message the server meant for the user, if it sent one.
    ///
    /// Transport and decoding failures have none; callers show their own
    /// generic text instead.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            RpcError::Server { message, .. } if !message.trim().is_empty() => Some(message.as_str()),
            _ => None,
        }
    }
}

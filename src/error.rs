use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    HostUnresolvable,
    Timeout,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn host_unresolvable(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::HostUnresolvable, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Other, message)
    }

    /// The only failure class the AI backend retrier waits out.
    pub fn is_host_unresolvable(&self) -> bool {
        self.kind == TransportErrorKind::HostUnresolvable
    }
}

#[derive(Debug, Error)]
pub enum SecretaryError {
    #[error("{0}")]
    Config(String),
    #[error("http {status} {message}")]
    Http { status: u16, message: String },
    #[error(transparent)]
    Transport(TransportError),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("cache: {0}")]
    Cache(String),
    #[error("{0}")]
    Invalid(String),
    #[error("Transactions product not ready after {attempts} attempts")]
    NotReady { attempts: u32 },
}

impl SecretaryError {
    pub fn is_host_unresolvable(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_host_unresolvable())
    }
}

impl From<TransportError> for SecretaryError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl From<reqwest::Error> for SecretaryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return Self::Decode(e.to_string());
        }
        if let Some(status) = e.status() {
            return Self::Http {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("").to_string(),
            };
        }
        Self::Transport(crate::net::classify_reqwest_error(&e))
    }
}

impl From<rusqlite::Error> for SecretaryError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Cache(e.to_string())
    }
}

impl From<serde_json::Error> for SecretaryError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

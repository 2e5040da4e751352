use std::{fmt, sync::Arc};

use tracing::{debug, warn};

use crate::{config::RetryPolicy, error::SecretaryError};

use super::transport::{PromptResponse, PromptTransport};

pub const EMPTY_RESPONSE: &str = "Empty response";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendFailure {
    Status { code: u16, reason: String },
    Unconfigured(String),
    Fetch(String),
}

impl fmt::Display for BackendFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status { code, reason } => write!(f, "Error: {code} {reason}"),
            Self::Unconfigured(message) | Self::Fetch(message) => {
                write!(f, "Error fetching suggestions from the server: {message}")
            }
        }
    }
}

impl From<SecretaryError> for BackendFailure {
    fn from(e: SecretaryError) -> Self {
        match e {
            SecretaryError::Config(message) => Self::Unconfigured(message),
            other => Self::Fetch(other.to_string()),
        }
    }
}

fn settle(resp: PromptResponse) -> Result<String, BackendFailure> {
    match resp {
        PromptResponse::Body(Some(text)) => Ok(text),
        PromptResponse::Body(None) => Ok(EMPTY_RESPONSE.to_string()),
        PromptResponse::Status { code, reason } => Err(BackendFailure::Status { code, reason }),
    }
}

/// Sends a prompt, waiting out resolver failures only. HTTP error statuses
/// and every other transport failure end the call on the spot.
#[derive(Clone)]
pub struct BackendRetrier {
    transport: Arc<dyn PromptTransport>,
    policy: RetryPolicy,
}

impl BackendRetrier {
    pub fn new(transport: Arc<dyn PromptTransport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub async fn try_send(&self, prompt: &str) -> Result<String, BackendFailure> {
        let max_attempts = self.policy.max_attempts.max(1);
        for attempt in 1..max_attempts {
            match self.transport.send_prompt(prompt).await {
                Ok(resp) => return settle(resp),
                Err(e) if e.is_host_unresolvable() => {
                    warn!(attempt, max_attempts, "backend host unresolvable, retrying: {e}");
                    tokio::time::sleep(self.policy.delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }

        debug!(attempt = max_attempts, "final backend attempt");
        match self.transport.send_prompt(prompt).await {
            Ok(resp) => settle(resp),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn send(&self, prompt: &str) -> String {
        match self.try_send(prompt).await {
            Ok(text) => text,
            Err(failure) => failure.to_string(),
        }
    }
}

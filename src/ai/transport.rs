use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::{error::SecretaryError, net};

// The summarization backend can sit on a cold model for minutes.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(200);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(240);

#[derive(Serialize)]
struct BackendRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct BackendResponse {
    #[serde(default)]
    response: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    /// 2xx; `None` when the body or its `response` field is missing.
    Body(Option<String>),
    Status { code: u16, reason: String },
}

#[async_trait]
pub trait PromptTransport: Send + Sync {
    async fn send_prompt(&self, prompt: &str) -> Result<PromptResponse, SecretaryError>;
}

pub struct HttpPromptTransport {
    client: reqwest::Client,
    url: Option<Url>,
}

impl HttpPromptTransport {
    pub fn new(url: Option<Url>) -> Result<Self, SecretaryError> {
        Ok(Self {
            client: net::http_client(CONNECT_TIMEOUT, REQUEST_TIMEOUT)?,
            url,
        })
    }
}

#[async_trait]
impl PromptTransport for HttpPromptTransport {
    async fn send_prompt(&self, prompt: &str) -> Result<PromptResponse, SecretaryError> {
        let url = self
            .url
            .clone()
            .ok_or_else(|| SecretaryError::Config("BACKEND_URL not set".to_string()))?;
        debug!(chars = prompt.len(), "sending prompt");

        let resp = self
            .client
            .post(url)
            .json(&BackendRequest { prompt })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Ok(PromptResponse::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let bytes = resp.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(PromptResponse::Body(None));
        }
        let parsed: BackendResponse = serde_json::from_slice(&bytes)?;
        Ok(PromptResponse::Body(parsed.response))
    }
}

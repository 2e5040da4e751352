use std::{error::Error as StdError, time::Duration};

use url::Url;

use crate::error::{SecretaryError, TransportError, TransportErrorKind};

const USER_AGENT: &str = "PersonalSecretary/0.1";

// Resolver failures surface differently per platform and per layer (hyper, getaddrinfo, okhttp-style proxies).
const UNRESOLVABLE_MARKERS: [&str; 6] = [
    "dns error",
    "failed to lookup address",
    "unable to resolve host",
    "name or service not known",
    "nodename nor servname",
    "no such host",
];

pub fn is_unresolvable_message(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    UNRESOLVABLE_MARKERS.iter().any(|m| lower.contains(m))
}

fn error_chain_messages(e: &reqwest::Error) -> Vec<String> {
    let mut out = vec![e.to_string()];
    let mut source = e.source();
    while let Some(inner) = source {
        out.push(inner.to_string());
        source = inner.source();
    }
    out
}

pub fn classify_reqwest_error(e: &reqwest::Error) -> TransportError {
    let chain = error_chain_messages(e);
    let message = chain.join(": ");
    if e.is_timeout() {
        return TransportError::new(TransportErrorKind::Timeout, message);
    }
    if e.is_connect() && chain.iter().any(|m| is_unresolvable_message(m)) {
        return TransportError::host_unresolvable(message);
    }
    TransportError::other(message)
}

pub fn parse_base_url(raw: &str) -> Result<Url, SecretaryError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SecretaryError::Config("empty base url".to_string()));
    }
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&normalized)
        .map_err(|_| SecretaryError::Config(format!("invalid base url: {trimmed}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(SecretaryError::Config(
            "only http(s) urls are allowed".to_string(),
        )),
    }
}

pub fn join(base: &Url, path: &str) -> Result<Url, SecretaryError> {
    base.join(path.trim_start_matches('/'))
        .map_err(|e| SecretaryError::Config(e.to_string()))
}

pub fn http_client(connect: Duration, total: Duration) -> Result<reqwest::Client, SecretaryError> {
    reqwest::Client::builder()
        .connect_timeout(connect)
        .timeout(total)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| SecretaryError::Config(e.to_string()))
}

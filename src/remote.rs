use std::time::Duration;

use reqwest::{Method, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::{error::SecretaryError, net};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct RemoteApi {
    client: reqwest::Client,
    base: Url,
}

impl RemoteApi {
    pub fn new(base: Url) -> Result<Self, SecretaryError> {
        Ok(Self {
            client: net::http_client(CONNECT_TIMEOUT, REQUEST_TIMEOUT)?,
            base,
        })
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, SecretaryError> {
        self.send_to(method, net::join(&self.base, path)?, body).await
    }

    async fn send_to<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Response, SecretaryError> {
        debug!(method = method.as_str(), host = url.host_str().unwrap_or(""), path = url.path(), "backend request");
        let mut req = self.client.request(method, url);
        if let Some(body) = body {
            req = req.json(body);
        }
        Ok(req.send().await?)
    }

    async fn checked(resp: Response) -> Result<Response, SecretaryError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let fallback = status.canonical_reason().unwrap_or("").to_string();
        let message = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|b| b.message)
            .unwrap_or(fallback);
        Err(SecretaryError::Http {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SecretaryError> {
        let resp = self.send::<()>(Method::GET, path, None).await?;
        Ok(Self::checked(resp).await?.json::<T>().await?)
    }

    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, SecretaryError> {
        let mut url = net::join(&self.base, path)?;
        url.query_pairs_mut().extend_pairs(query);
        let resp = self.send_to::<()>(Method::GET, url, None).await?;
        Ok(Self::checked(resp).await?.json::<T>().await?)
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, SecretaryError> {
        let resp = self.send(Method::POST, path, Some(body)).await?;
        Ok(Self::checked(resp).await?.json::<T>().await?)
    }

    /// Decodes the body whatever the status; the auth routes report failures in-band.
    pub async fn post_json_any_status<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, SecretaryError> {
        let resp = self.send(Method::POST, path, Some(body)).await?;
        Ok(resp.json::<T>().await?)
    }

    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, SecretaryError> {
        let resp = self.send(Method::PUT, path, Some(body)).await?;
        Ok(Self::checked(resp).await?.json::<T>().await?)
    }

    pub async fn delete(&self, path: &str) -> Result<(), SecretaryError> {
        let resp = self.send::<()>(Method::DELETE, path, None).await?;
        Self::checked(resp).await?;
        Ok(())
    }
}

use async_trait::async_trait;
use time::Date;
use tracing::{debug, info};
use url::Url;

use crate::{config::PlaidCredentials, dates, error::SecretaryError, remote::RemoteApi};

use super::types::{
    PublicTokenExchangeRequest, PublicTokenExchangeResponse, SandboxPublicTokenRequest,
    SandboxPublicTokenResponse, Transaction, TransactionsGetOptions, TransactionsGetRequest,
    TransactionsGetResponse,
};

const SANDBOX_INSTITUTION: &str = "ins_109508";
const INITIAL_PRODUCTS: &[&str] = &["transactions"];
const MAX_PAGE: u32 = 30;

/// Where transactions come from. A fresh sandbox item answers
/// `fetch_transactions` with errors until the provider has built its data.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn create_access_token(&self) -> Result<String, SecretaryError>;
    async fn fetch_transactions(
        &self,
        access_token: &str,
        start: Date,
        end: Date,
    ) -> Result<Vec<Transaction>, SecretaryError>;
}

#[derive(Clone)]
pub struct PlaidClient {
    api: RemoteApi,
    credentials: PlaidCredentials,
}

impl PlaidClient {
    pub fn new(base: Url, credentials: PlaidCredentials) -> Result<Self, SecretaryError> {
        Ok(Self {
            api: RemoteApi::new(base)?,
            credentials,
        })
    }

    pub async fn create_sandbox_item(&self) -> Result<String, SecretaryError> {
        let created: SandboxPublicTokenResponse = self
            .api
            .post_json(
                "sandbox/public_token/create",
                &SandboxPublicTokenRequest {
                    client_id: &self.credentials.client_id,
                    secret: &self.credentials.secret,
                    institution_id: SANDBOX_INSTITUTION,
                    initial_products: INITIAL_PRODUCTS,
                },
            )
            .await?;
        let public_token = created
            .public_token
            .ok_or_else(|| SecretaryError::Decode("Plaid did not return public_token".into()))?;

        let exchanged: PublicTokenExchangeResponse = self
            .api
            .post_json(
                "item/public_token/exchange",
                &PublicTokenExchangeRequest {
                    client_id: &self.credentials.client_id,
                    secret: &self.credentials.secret,
                    public_token: &public_token,
                },
            )
            .await?;
        let access_token = exchanged
            .access_token
            .ok_or_else(|| SecretaryError::Decode("Plaid did not return access_token".into()))?;
        info!("plaid sandbox item created");
        Ok(access_token)
    }

    pub async fn transactions(
        &self,
        access_token: &str,
        start: Date,
        end: Date,
        count: u32,
        offset: u32,
    ) -> Result<Vec<Transaction>, SecretaryError> {
        let body = TransactionsGetRequest {
            client_id: &self.credentials.client_id,
            secret: &self.credentials.secret,
            access_token,
            start_date: dates::format_date(start),
            end_date: dates::format_date(end),
            options: TransactionsGetOptions {
                count: count.clamp(1, MAX_PAGE),
                offset,
            },
        };
        let resp: TransactionsGetResponse = self.api.post_json("transactions/get", &body).await?;
        debug!(count = resp.transactions.len(), "plaid transactions page");
        Ok(resp.transactions.into_iter().map(Transaction::from).collect())
    }
}

#[async_trait]
impl TransactionSource for PlaidClient {
    async fn create_access_token(&self) -> Result<String, SecretaryError> {
        self.create_sandbox_item().await
    }

    async fn fetch_transactions(
        &self,
        access_token: &str,
        start: Date,
        end: Date,
    ) -> Result<Vec<Transaction>, SecretaryError> {
        self.transactions(access_token, start, end, MAX_PAGE, 0).await
    }
}

use std::sync::Arc;

use time::Date;
use tracing::{info, warn};

use crate::{config::RetryPolicy, error::SecretaryError};

use super::{client::TransactionSource, types::Transaction};

/// Polls the transactions endpoint until the provider has data. Any failure
/// counts as "not ready yet"; the delay is skipped after the last attempt.
#[derive(Clone)]
pub struct TransactionRetriever {
    source: Arc<dyn TransactionSource>,
    policy: RetryPolicy,
}

impl TransactionRetriever {
    pub fn new(source: Arc<dyn TransactionSource>, policy: RetryPolicy) -> Self {
        Self { source, policy }
    }

    pub async fn fetch(
        &self,
        access_token: &str,
        start: Date,
        end: Date,
    ) -> Result<Vec<Transaction>, SecretaryError> {
        let max_attempts = self.policy.max_attempts.max(1);
        for attempt in 1..=max_attempts {
            match self.source.fetch_transactions(access_token, start, end).await {
                Ok(transactions) => {
                    info!(attempt, count = transactions.len(), "transactions ready");
                    return Ok(transactions);
                }
                Err(e) => {
                    warn!(attempt, max_attempts, "transactions not ready: {e}");
                    if attempt < max_attempts {
                        tokio::time::sleep(self.policy.delay).await;
                    }
                }
            }
        }
        Err(SecretaryError::NotReady {
            attempts: max_attempts,
        })
    }
}

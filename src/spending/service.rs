use std::sync::Arc;

use time::Date;
use tracing::info;

use crate::{ai::BackendRetrier, config::RetryPolicy, dates, error::SecretaryError};

use super::{
    aggregate::{spending_prompt, SpendingReport},
    client::TransactionSource,
    retriever::TransactionRetriever,
};

pub const FETCH_RANGE_DAYS: i64 = 90;

#[derive(Clone)]
pub struct SpendingService {
    source: Arc<dyn TransactionSource>,
    retriever: TransactionRetriever,
    backend: BackendRetrier,
}

impl SpendingService {
    pub fn new(source: Arc<dyn TransactionSource>, policy: RetryPolicy, backend: BackendRetrier) -> Self {
        Self {
            retriever: TransactionRetriever::new(source.clone(), policy),
            source,
            backend,
        }
    }

    pub async fn load_report(&self) -> Result<SpendingReport, SecretaryError> {
        self.load_report_on(dates::today()).await
    }

    pub async fn load_report_on(&self, today: Date) -> Result<SpendingReport, SecretaryError> {
        let token = self.source.create_access_token().await?;
        let start = dates::days_before(today, FETCH_RANGE_DAYS);
        let transactions = self.retriever.fetch(&token, start, today).await?;
        let report = SpendingReport::build(transactions, today);
        info!(
            transactions = report.transactions.len(),
            weekly = report.weekly_total,
            monthly = report.monthly_total,
            "spending report built"
        );
        Ok(report)
    }

    pub async fn advice(&self, report: &SpendingReport) -> String {
        self.backend.send(&spending_prompt(report)).await
    }
}

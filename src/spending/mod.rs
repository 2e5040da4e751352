mod aggregate;
mod client;
mod retriever;
mod service;
mod types;

pub use aggregate::{category_totals, monthly_total, spending_prompt, weekly_total, SpendingReport};
pub use client::{PlaidClient, TransactionSource};
pub use retriever::TransactionRetriever;
pub use service::{SpendingService, FETCH_RANGE_DAYS};
pub use types::{FinanceCategory, Transaction, OTHER_CATEGORY};

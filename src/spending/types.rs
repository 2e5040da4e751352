use serde::{Deserialize, Serialize};
use time::Date;

use crate::dates;

pub const OTHER_CATEGORY: &str = "Other";

#[derive(Serialize)]
pub(crate) struct SandboxPublicTokenRequest<'a> {
    pub client_id: &'a str,
    pub secret: &'a str,
    pub institution_id: &'a str,
    pub initial_products: &'a [&'a str],
}

#[derive(Deserialize)]
pub(crate) struct SandboxPublicTokenResponse {
    #[serde(default)]
    pub public_token: Option<String>,
}

#[derive(Serialize)]
pub(crate) struct PublicTokenExchangeRequest<'a> {
    pub client_id: &'a str,
    pub secret: &'a str,
    pub public_token: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct PublicTokenExchangeResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Serialize)]
pub(crate) struct TransactionsGetOptions {
    pub count: u32,
    pub offset: u32,
}

#[derive(Serialize)]
pub(crate) struct TransactionsGetRequest<'a> {
    pub client_id: &'a str,
    pub secret: &'a str,
    pub access_token: &'a str,
    pub start_date: String,
    pub end_date: String,
    pub options: TransactionsGetOptions,
}

#[derive(Deserialize)]
pub(crate) struct TransactionsGetResponse {
    #[serde(default)]
    pub transactions: Vec<RawTransaction>,
}

/// Provider record; every field may be null.
#[derive(Deserialize)]
pub(crate) struct RawTransaction {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub category: Option<Vec<String>>,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub personal_finance_category: Option<FinanceCategory>,
    #[serde(default)]
    pub payment_channel: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceCategory {
    #[serde(default)]
    pub confidence_level: Option<String>,
    #[serde(default)]
    pub detailed: Option<String>,
    #[serde(default)]
    pub primary: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub name: String,
    pub amount: f64,
    pub date: String,
    pub category: Option<Vec<String>>,
    pub merchant_name: Option<String>,
    pub logo_url: Option<String>,
    pub personal_finance_category: Option<FinanceCategory>,
    pub payment_channel: Option<String>,
}

impl From<RawTransaction> for Transaction {
    fn from(raw: RawTransaction) -> Self {
        Self {
            name: raw.name.unwrap_or_else(|| "Unknown".to_string()),
            amount: raw.amount.unwrap_or(0.0),
            date: raw.date.unwrap_or_default(),
            category: raw.category,
            merchant_name: raw.merchant_name,
            logo_url: raw.logo_url,
            personal_finance_category: raw.personal_finance_category,
            payment_channel: raw.payment_channel,
        }
    }
}

impl Transaction {
    pub fn new(name: &str, amount: f64, date: &str) -> Self {
        Self {
            name: name.to_string(),
            amount,
            date: date.to_string(),
            category: None,
            merchant_name: None,
            logo_url: None,
            personal_finance_category: None,
            payment_channel: None,
        }
    }

    pub fn with_primary_category(mut self, primary: &str) -> Self {
        self.personal_finance_category = Some(FinanceCategory {
            confidence_level: None,
            detailed: None,
            primary: Some(primary.to_string()),
            version: None,
        });
        self
    }

    pub fn parsed_date(&self) -> Option<Date> {
        dates::parse_date(&self.date)
    }

    /// Bucket used for category totals.
    pub fn primary_category(&self) -> &str {
        self.personal_finance_category
            .as_ref()
            .and_then(|c| c.primary.as_deref())
            .unwrap_or(OTHER_CATEGORY)
    }

    /// Label for a listing row; falls back to the legacy category path.
    pub fn category_label(&self) -> &str {
        self.personal_finance_category
            .as_ref()
            .and_then(|c| c.primary.as_deref())
            .or_else(|| self.category.as_ref().and_then(|c| c.first()).map(String::as_str))
            .unwrap_or(OTHER_CATEGORY)
    }

    pub fn display_name(&self) -> &str {
        self.merchant_name.as_deref().unwrap_or(&self.name)
    }
}

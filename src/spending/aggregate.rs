use std::collections::BTreeMap;
use std::fmt::Write;

use serde::Serialize;
use time::Date;

use crate::dates;

use super::types::Transaction;

const REPORT_LIMIT: usize = 30;
const WEEK_DAYS: i64 = 7;

fn since(transactions: &[Transaction], cutoff: Date) -> impl Iterator<Item = &Transaction> {
    transactions
        .iter()
        .filter(move |t| t.parsed_date().is_some_and(|d| d >= cutoff))
}

pub fn weekly_total(transactions: &[Transaction], today: Date) -> f64 {
    since(transactions, dates::days_before(today, WEEK_DAYS))
        .map(|t| t.amount)
        .sum()
}

pub fn monthly_total(transactions: &[Transaction], today: Date) -> f64 {
    since(transactions, dates::minus_one_month(today))
        .map(|t| t.amount)
        .sum()
}

pub fn category_totals(transactions: &[Transaction]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for t in transactions {
        *totals.entry(t.primary_category().to_string()).or_insert(0.0) += t.amount;
    }
    totals
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingReport {
    pub transactions: Vec<Transaction>,
    pub weekly_total: f64,
    pub monthly_total: f64,
    pub category_totals: BTreeMap<String, f64>,
    pub recent: Vec<Transaction>,
}

impl SpendingReport {
    pub fn build(mut transactions: Vec<Transaction>, today: Date) -> Self {
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        transactions.truncate(REPORT_LIMIT);

        let recent = since(&transactions, dates::days_before(today, WEEK_DAYS))
            .cloned()
            .collect();
        Self {
            weekly_total: weekly_total(&transactions, today),
            monthly_total: monthly_total(&transactions, today),
            category_totals: category_totals(&transactions),
            recent,
            transactions,
        }
    }
}

pub fn spending_prompt(report: &SpendingReport) -> String {
    let mut out = String::from("Rate my spending and give me advice.\n");
    out.push_str("Note that the information I give you is all that I can give you.\n");
    let _ = writeln!(out, "Weekly total: ${:.2}", report.weekly_total);
    let _ = writeln!(out, "Monthly total: ${:.2}", report.monthly_total);
    out.push_str("Transactions in past 7 days:\n");
    for t in &report.recent {
        let _ = writeln!(out, "- {}: {} ${:.2}", t.date, t.name, t.amount);
    }
    out
}

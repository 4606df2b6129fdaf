//! Top-N ranker - largest payments by absolute amount

use crate::domain::{TopTransaction, TransactionRecord};

/// Number of transactions shown on the dashboard
pub const DEFAULT_TOP_N: usize = 5;

/// The `n` records with the largest absolute payment amount
///
/// Ties keep their input order.
pub fn top_transactions(records: &[TransactionRecord], n: usize) -> Vec<TopTransaction> {
    let mut ranked: Vec<&TransactionRecord> = records.iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.amount_or_zero().abs().cmp(&a.amount_or_zero().abs()));

    ranked
        .into_iter()
        .take(n)
        .map(|r| TopTransaction {
            date: r.date_token().to_string(),
            amount: r.amount_or_zero(),
            category: r.category_text().to_string(),
            description: r.description_text().to_string(),
        })
        .collect()
}

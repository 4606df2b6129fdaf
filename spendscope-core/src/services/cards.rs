//! Card aggregator - per-card spend and cashback

use rust_decimal::Decimal;

use crate::domain::{round_money, CardGroup, CardSummary, TransactionRecord};

/// Partition records by card id, groups in first-seen order
pub fn group_by_card(records: &[TransactionRecord]) -> Vec<CardGroup> {
    let mut groups: Vec<CardGroup> = Vec::new();

    for record in records {
        let key = record.card_key();
        match groups.iter_mut().find(|g| g.card == key) {
            Some(group) => group.transactions.push(record.clone()),
            None => groups.push(CardGroup {
                card: key,
                transactions: vec![record.clone()],
            }),
        }
    }

    groups
}

/// Summarize each card group
pub fn card_info(groups: &[CardGroup]) -> Vec<CardSummary> {
    groups.iter().map(summarize).collect()
}

fn summarize(group: &CardGroup) -> CardSummary {
    let spent: Decimal = group
        .transactions
        .iter()
        .map(TransactionRecord::amount_or_zero)
        .filter(|amount| amount.is_sign_negative())
        .sum();
    let cashback: Decimal = group
        .transactions
        .iter()
        .map(TransactionRecord::cashback_or_zero)
        .sum();

    CardSummary {
        last_digits: group.card.last_digits(),
        total_spent: round_money(spent.abs()),
        cashback: round_money(cashback),
    }
}

/// Group and summarize in one step
pub fn summarize_cards(records: &[TransactionRecord]) -> Vec<CardSummary> {
    card_info(&group_by_card(records))
}

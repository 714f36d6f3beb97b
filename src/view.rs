//! Presentation-side transaction query: filter, search, sort. Pure and
//! idempotent; the store's list is never reordered in place.

use crate::ledger::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxFilter {
    All,
    Income,
    Expense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Keeps the incoming (most-recent-first) order
    Date,
    /// Non-increasing |amount|
    Amount,
}

pub fn view(
    transactions: &[Transaction],
    filter: TxFilter,
    query: &str,
    sort: SortKey,
) -> Vec<Transaction> {
    let needle = query.to_lowercase();
    let mut out: Vec<Transaction> = transactions
        .iter()
        .filter(|tx| match filter {
            TxFilter::All => true,
            TxFilter::Income => tx.amount > 0.0,
            TxFilter::Expense => tx.amount < 0.0,
        })
        .filter(|tx| {
            needle.is_empty()
                || tx.merchant.to_lowercase().contains(&needle)
                || tx.category.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    match sort {
        // Date strings are display-only and carry no order; the stable
        // no-op keeps the store's most-recent-first arrangement.
        SortKey::Date => {}
        SortKey::Amount => {
            out.sort_by(|a, b| {
                b.amount
                    .abs()
                    .partial_cmp(&a.amount.abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
    }

    out
}

/// USD display formatting: grouped thousands, two decimals, sign ahead
/// of the dollar sign.
pub fn format_currency(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();
    let rem = cents % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, c) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}${}.{:02}", if negative { "-" } else { "" }, grouped, rem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::seed_snapshot;

    fn seed() -> Vec<Transaction> {
        seed_snapshot().recent_transactions
    }

    #[test]
    fn filter_by_sign() {
        let txs = seed();
        let expenses = view(&txs, TxFilter::Expense, "", SortKey::Date);
        assert!(!expenses.is_empty());
        assert!(expenses.iter().all(|tx| tx.amount < 0.0));

        let income = view(&txs, TxFilter::Income, "", SortKey::Date);
        assert!(income.iter().all(|tx| tx.amount > 0.0));

        let all = view(&txs, TxFilter::All, "", SortKey::Date);
        assert_eq!(all.len(), txs.len());
        assert_eq!(all.len(), expenses.len() + income.len());
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        let txs = seed();
        let hits = view(&txs, TxFilter::All, "aws", SortKey::Date);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].merchant, "AWS Services");

        // Category matches too.
        let hits = view(&txs, TxFilter::All, "SOFT", SortKey::Date);
        assert_eq!(hits.len(), 2);

        let hits = view(&txs, TxFilter::All, "no such merchant", SortKey::Date);
        assert!(hits.is_empty());
    }

    #[test]
    fn amount_sort_is_descending_absolute() {
        let txs = seed();
        let sorted = view(&txs, TxFilter::All, "", SortKey::Amount);
        for pair in sorted.windows(2) {
            assert!(pair[0].amount.abs() >= pair[1].amount.abs());
        }
        assert_eq!(sorted[0].merchant, "Client Transfer #402");
    }

    #[test]
    fn date_sort_preserves_input_order() {
        let txs = seed();
        let viewed = view(&txs, TxFilter::All, "", SortKey::Date);
        let ids: Vec<&str> = viewed.iter().map(|tx| tx.id.as_str()).collect();
        let original: Vec<&str> = txs.iter().map(|tx| tx.id.as_str()).collect();
        assert_eq!(ids, original);
    }

    #[test]
    fn currency_formatting() {
        assert_eq!(format_currency(24_500.80), "$24,500.80");
        assert_eq!(format_currency(-15.0), "-$15.00");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(4_500.0), "$4,500.00");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
    }

    #[test]
    fn idempotent_for_identical_arguments() {
        let txs = seed();
        let a = view(&txs, TxFilter::Expense, "ver", SortKey::Amount);
        let b = view(&txs, TxFilter::Expense, "ver", SortKey::Amount);
        let ids_a: Vec<&str> = a.iter().map(|tx| tx.id.as_str()).collect();
        let ids_b: Vec<&str> = b.iter().map(|tx| tx.id.as_str()).collect();
        assert_eq!(ids_a, ids_b);
    }
}

//! Pure reducer: (Snapshot, Request) -> Snapshot
//!
//! Every ledger mutation goes through here. Reducers never touch their
//! input; they return a fresh snapshot so the store can do whole-value
//! replacement and observers can diff by identity.

use anyhow::{bail, Result};

use super::{next_tx_id, FinancialSnapshot, Transaction, TransactionRequest, TxStatus};

/// Apply a transaction request to a snapshot.
///
/// Returns the new snapshot together with the transaction that was
/// created, already sitting at the head of `recent_transactions`.
///
/// Non-finite raw amounts are a caller error and leave the snapshot
/// untouched.
pub fn apply_transaction(
    snapshot: &FinancialSnapshot,
    request: &TransactionRequest,
) -> Result<(FinancialSnapshot, Transaction)> {
    if !request.amount.is_finite() {
        bail!("transaction amount must be finite, got {}", request.amount);
    }

    let signed = request.signed_amount();
    let tx = Transaction {
        id: next_tx_id(),
        merchant: if request.merchant.trim().is_empty() {
            "Unknown Merchant".to_string()
        } else {
            request.merchant.clone()
        },
        amount: signed,
        date: request.date.clone().unwrap_or_else(crate::state::display_time),
        // Unknown categories pass through verbatim; only emptiness is defaulted.
        category: if request.category.trim().is_empty() {
            "General".to_string()
        } else {
            request.category.clone()
        },
        status: TxStatus::Pending,
    };

    let mut next = snapshot.clone();
    next.total_balance += signed;

    next.recent_transactions.insert(0, tx.clone());

    // The newest cash-flow bucket absorbs the net flow, clamped at zero so
    // the chart never dips below the axis.
    if let Some(last) = next.cash_flow.last_mut() {
        last.value = (last.value + signed).max(0.0);
    }

    Ok((next, tx))
}

/// Wholesale balance replacement (the "calibrate balance" operation).
pub fn set_balance(snapshot: &FinancialSnapshot, balance: f64) -> Result<FinancialSnapshot> {
    if !balance.is_finite() {
        bail!("balance must be finite, got {}", balance);
    }
    let mut next = snapshot.clone();
    next.total_balance = balance;
    Ok(next)
}

// Ledger domain types + the pure reducer and the single-owner store.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

pub mod reducer;
pub mod store;

pub use reducer::{apply_transaction, set_balance};
pub use store::LedgerStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxStatus {
    Pending,
    Cleared,
    Failed,
}

impl TxStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxStatus::Pending => "PENDING",
            TxStatus::Cleared => "CLEARED",
            TxStatus::Failed => "FAILED",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub merchant: String,
    /// Signed: negative = expense, positive = income
    pub amount: f64,
    /// Display string, not a sortable timestamp
    pub date: String,
    pub category: String,
    pub status: TxStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// The complete in-memory financial state. Replaced wholesale on every
/// mutation; never patched in place and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    pub total_balance: f64,
    pub monthly_savings: f64,
    pub monthly_goal: f64,
    pub cash_flow: Vec<ChartPoint>,
    pub recent_transactions: Vec<Transaction>,
}

/// Sign of a requested entry; applied to the raw amount before the
/// balance update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Income,
    Expense,
}

#[derive(Debug, Clone)]
pub struct TransactionRequest {
    pub merchant: String,
    /// Raw magnitude from the caller; sign comes from `kind`
    pub amount: f64,
    pub kind: EntryKind,
    pub category: String,
    pub date: Option<String>,
}

impl TransactionRequest {
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            EntryKind::Income => self.amount.abs(),
            EntryKind::Expense => -self.amount.abs(),
        }
    }
}

static TX_SEQ: AtomicU64 = AtomicU64::new(0);

/// Process-unique transaction id: epoch millis plus a sequence so two
/// transactions in the same millisecond still differ.
pub fn next_tx_id() -> String {
    let seq = TX_SEQ.fetch_add(1, Ordering::SeqCst);
    format!("TX-{}-{}", crate::logging::ts_epoch_ms(), seq)
}

//! Single-owner state container.
//!
//! One `LedgerStore` owns the snapshot, the profile, and the account
//! list. Mutations funnel through its methods, serialize on one lock,
//! and replace the snapshot wholesale via the pure reducers. Observers
//! get read-only clones through a watch channel; they never hold a
//! reference into the store.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::sync::watch;

use crate::accounts::{merge_profile, Account, ProfilePatch, UserProfile};
use crate::logging::{json_log, obj, v_num, v_str, Domain};

use super::{reducer, FinancialSnapshot, Transaction, TransactionRequest};

struct Owned {
    snapshot: FinancialSnapshot,
    profile: UserProfile,
    accounts: Vec<Account>,
    last_mutation: Option<Instant>,
}

pub struct LedgerStore {
    inner: Mutex<Owned>,
    cooldown: Duration,
    snapshot_tx: watch::Sender<FinancialSnapshot>,
}

impl LedgerStore {
    pub fn new(
        snapshot: FinancialSnapshot,
        profile: UserProfile,
        accounts: Vec<Account>,
        drift_cooldown: Duration,
    ) -> Self {
        let (snapshot_tx, _) = watch::channel(snapshot.clone());
        Self {
            inner: Mutex::new(Owned {
                snapshot,
                profile,
                accounts,
                last_mutation: None,
            }),
            cooldown: drift_cooldown,
            snapshot_tx,
        }
    }

    /// Read-only view channel; every committed snapshot is broadcast.
    pub fn subscribe(&self) -> watch::Receiver<FinancialSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn snapshot(&self) -> FinancialSnapshot {
        self.inner.lock().expect("ledger lock poisoned").snapshot.clone()
    }

    pub fn profile(&self) -> UserProfile {
        self.inner.lock().expect("ledger lock poisoned").profile.clone()
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.inner.lock().expect("ledger lock poisoned").accounts.clone()
    }

    /// Record a transaction. On success the drift simulator is suppressed
    /// for the cooldown window so it cannot visually overwrite the entry.
    pub fn add_transaction(&self, request: &TransactionRequest) -> Result<Transaction> {
        let mut owned = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("ledger lock poisoned"))?;
        let (next, tx) = reducer::apply_transaction(&owned.snapshot, request)?;
        owned.snapshot = next;
        owned.last_mutation = Some(Instant::now());
        let _ = self.snapshot_tx.send(owned.snapshot.clone());
        json_log(
            Domain::Ledger,
            "transaction_recorded",
            obj(&[
                ("tx_id", v_str(&tx.id)),
                ("merchant", v_str(&tx.merchant)),
                ("amount", v_num(tx.amount)),
                ("category", v_str(&tx.category)),
                ("status", v_str(tx.status.as_str())),
                ("balance", v_num(owned.snapshot.total_balance)),
            ]),
        );
        Ok(tx)
    }

    pub fn set_balance(&self, balance: f64) -> Result<()> {
        let mut owned = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("ledger lock poisoned"))?;
        owned.snapshot = reducer::set_balance(&owned.snapshot, balance)?;
        owned.last_mutation = Some(Instant::now());
        let _ = self.snapshot_tx.send(owned.snapshot.clone());
        json_log(
            Domain::Ledger,
            "balance_calibrated",
            obj(&[("balance", v_num(balance))]),
        );
        Ok(())
    }

    /// Wholesale profile merge; initials are re-derived inside the merge.
    pub fn update_profile(&self, patch: ProfilePatch) -> UserProfile {
        let mut owned = self.inner.lock().expect("ledger lock poisoned");
        owned.profile = merge_profile(&owned.profile, patch);
        json_log(
            Domain::Ledger,
            "profile_updated",
            obj(&[("initials", v_str(&owned.profile.initials))]),
        );
        owned.profile.clone()
    }

    /// Append-only; there is no removal path for accounts.
    pub fn add_account(&self, account: Account) -> usize {
        let mut owned = self.inner.lock().expect("ledger lock poisoned");
        json_log(
            Domain::Ledger,
            "account_created",
            obj(&[
                ("bank", v_str(&account.bank_name)),
                ("number", v_str(&account.number)),
            ]),
        );
        owned.accounts.push(account);
        owned.accounts.len()
    }

    /// True once the post-mutation cooldown has lapsed.
    pub fn drift_allowed(&self) -> bool {
        let owned = self.inner.lock().expect("ledger lock poisoned");
        match owned.last_mutation {
            None => true,
            Some(at) => at.elapsed() >= self.cooldown,
        }
    }

    /// Run one drift step, unless suppressed. The step sees the current
    /// snapshot and returns the replacement; drift does not stamp
    /// `last_mutation`, so it never suppresses itself.
    pub fn apply_drift<F>(&self, step: F) -> bool
    where
        F: FnOnce(&FinancialSnapshot) -> FinancialSnapshot,
    {
        let mut owned = self.inner.lock().expect("ledger lock poisoned");
        if let Some(at) = owned.last_mutation {
            if at.elapsed() < self.cooldown {
                return false;
            }
        }
        owned.snapshot = step(&owned.snapshot);
        let _ = self.snapshot_tx.send(owned.snapshot.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::EntryKind;
    use crate::state::{seed_accounts, seed_profile, seed_snapshot};

    fn store_with_cooldown(cooldown: Duration) -> LedgerStore {
        LedgerStore::new(seed_snapshot(), seed_profile(), seed_accounts(), cooldown)
    }

    fn request(amount: f64) -> TransactionRequest {
        TransactionRequest {
            merchant: "Stripe Payout".to_string(),
            amount,
            kind: EntryKind::Income,
            category: "Income".to_string(),
            date: None,
        }
    }

    #[test]
    fn add_transaction_replaces_snapshot_and_notifies() {
        let store = store_with_cooldown(Duration::from_secs(3));
        let rx = store.subscribe();
        let before = store.snapshot();
        let tx = store.add_transaction(&request(100.0)).unwrap();
        let after = store.snapshot();
        assert_eq!(after.total_balance, before.total_balance + 100.0);
        assert_eq!(after.recent_transactions[0].id, tx.id);
        // Observer sees the committed value without polling the store.
        assert_eq!(rx.borrow().total_balance, after.total_balance);
    }

    #[test]
    fn mutation_suppresses_drift_until_cooldown() {
        let store = store_with_cooldown(Duration::from_secs(60));
        assert!(store.drift_allowed());
        store.add_transaction(&request(10.0)).unwrap();
        assert!(!store.drift_allowed());
        let applied = store.apply_drift(|s| {
            let mut next = s.clone();
            next.total_balance += 1.0;
            next
        });
        assert!(!applied);
    }

    #[test]
    fn drift_applies_when_not_suppressed() {
        let store = store_with_cooldown(Duration::from_millis(0));
        let before = store.snapshot().total_balance;
        let applied = store.apply_drift(|s| {
            let mut next = s.clone();
            next.total_balance = before + 42.0;
            next
        });
        assert!(applied);
        assert_eq!(store.snapshot().total_balance, before + 42.0);
        // Drift itself must not start a suppression window.
        assert!(store.drift_allowed());
    }

    #[test]
    fn invalid_request_leaves_store_intact() {
        let store = store_with_cooldown(Duration::from_secs(3));
        let before = store.snapshot();
        assert!(store.add_transaction(&request(f64::NAN)).is_err());
        let after = store.snapshot();
        assert_eq!(after.total_balance, before.total_balance);
        assert_eq!(after.recent_transactions.len(), before.recent_transactions.len());
        // A rejected request is not a mutation; drift keeps running.
        assert!(store.drift_allowed());
    }

    #[test]
    fn accounts_are_append_only() {
        let store = store_with_cooldown(Duration::from_secs(3));
        let n = store.accounts().len();
        let mut account = store.accounts()[0].clone();
        account.id = "ACC-3".to_string();
        assert_eq!(store.add_account(account), n + 1);
    }
}

//! Cosmetic drift: bounded uniform jitter applied to the live snapshot
//! so the dashboard moves between real events.
//!
//! This is presentation noise, not a volatility model. The only
//! properties that matter: the jitter is bounded by the configured
//! amplitudes, the cash-flow bucket never goes negative, and the ticker
//! is silent for a cooldown window after every real mutation.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::ledger::{FinancialSnapshot, LedgerStore};
use crate::logging::{json_log, obj, v_bool, v_num, Domain};
use crate::metrics::LatencyMeter;

#[derive(Debug, Clone, Copy)]
pub struct DriftParams {
    /// Full width of the balance jitter; draws are U(-a/2, a/2)
    pub balance_amplitude: f64,
    /// Full width of the cash-flow jitter; draws are U(-b/2, b/2)
    pub flow_amplitude: f64,
}

impl Default for DriftParams {
    fn default() -> Self {
        Self { balance_amplitude: 150.0, flow_amplitude: 400.0 }
    }
}

/// RNG for any simulation source; a fixed seed makes a run reproducible.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// One drift step. Pure in the snapshot: the input is untouched, the
/// replacement moves only `total_balance` and the last cash-flow bucket.
pub fn drift_tick<R: Rng>(
    snapshot: &FinancialSnapshot,
    rng: &mut R,
    params: &DriftParams,
) -> FinancialSnapshot {
    let mut next = snapshot.clone();

    let half = params.balance_amplitude / 2.0;
    next.total_balance += rng.gen_range(-half..half);

    if let Some(last) = next.cash_flow.last_mut() {
        let half = params.flow_amplitude / 2.0;
        last.value = (last.value + rng.gen_range(-half..half)).max(0.0);
    }

    next
}

/// Periodic drift ticker with an explicit lifecycle. `start` spawns the
/// task; `stop` cancels it and waits for the cancellation to land, so no
/// tick runs after `stop` returns.
pub struct DriftTask {
    handle: JoinHandle<()>,
}

impl DriftTask {
    pub fn start(
        store: Arc<LedgerStore>,
        params: DriftParams,
        interval: Duration,
        mut rng: StdRng,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval fires immediately; the first drift belongs one period out
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let applied = store.apply_drift(|snapshot| drift_tick(snapshot, &mut rng, &params));
                let balance = store.snapshot().total_balance;
                json_log(
                    Domain::Drift,
                    "drift_tick",
                    obj(&[
                        ("applied", v_bool(applied)),
                        ("balance", v_num(balance)),
                    ]),
                );
            }
        });
        Self { handle }
    }

    pub async fn stop(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }
}

/// Ticker for the cosmetic latency number shown in the header. Publishes
/// each reading on a watch channel; same lifecycle contract as drift.
pub struct LatencyTask {
    handle: JoinHandle<()>,
}

impl LatencyTask {
    pub fn start(
        interval: Duration,
        mut rng: StdRng,
    ) -> (Self, tokio::sync::watch::Receiver<f64>) {
        let mut meter = LatencyMeter::new();
        let (tx, rx) = tokio::sync::watch::channel(meter.ms());
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let ms = meter.tick(&mut rng);
                if tx.send(ms).is_err() {
                    // every receiver is gone; the reading has no audience
                    break;
                }
            }
        });
        (Self { handle }, rx)
    }

    pub async fn stop(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::seed_snapshot;

    #[test]
    fn drift_bounded_by_amplitudes() {
        let params = DriftParams::default();
        let mut rng = seeded_rng(Some(42));
        let mut snap = seed_snapshot();
        for _ in 0..5_000 {
            let next = drift_tick(&snap, &mut rng, &params);
            let balance_step = (next.total_balance - snap.total_balance).abs();
            assert!(balance_step <= params.balance_amplitude / 2.0);
            let old_last = snap.cash_flow.last().unwrap().value;
            let new_last = next.cash_flow.last().unwrap().value;
            assert!(new_last >= 0.0);
            // Clamp can shrink the step but never stretch it.
            assert!((new_last - old_last).abs() <= params.flow_amplitude / 2.0 + 1e-9);
            snap = next;
        }
    }

    #[test]
    fn drift_touches_nothing_else() {
        let params = DriftParams::default();
        let mut rng = seeded_rng(Some(7));
        let snap = seed_snapshot();
        let next = drift_tick(&snap, &mut rng, &params);
        assert_eq!(next.monthly_savings, snap.monthly_savings);
        assert_eq!(next.monthly_goal, snap.monthly_goal);
        assert_eq!(next.recent_transactions.len(), snap.recent_transactions.len());
        for i in 0..snap.cash_flow.len() - 1 {
            assert_eq!(next.cash_flow[i].value, snap.cash_flow[i].value);
        }
    }

    #[test]
    fn drift_deterministic_under_seed() {
        let params = DriftParams::default();
        let snap = seed_snapshot();
        let a = drift_tick(&snap, &mut seeded_rng(Some(123)), &params);
        let b = drift_tick(&snap, &mut seeded_rng(Some(123)), &params);
        assert_eq!(a.total_balance, b.total_balance);
        assert_eq!(a.cash_flow.last().unwrap().value, b.cash_flow.last().unwrap().value);
    }

    #[tokio::test(start_paused = true)]
    async fn drift_task_ticks_and_stops() {
        let store = Arc::new(LedgerStore::new(
            seed_snapshot(),
            crate::state::seed_profile(),
            crate::state::seed_accounts(),
            Duration::from_secs(0),
        ));
        let mut rx = store.subscribe();
        let task = DriftTask::start(
            store.clone(),
            DriftParams::default(),
            Duration::from_secs(15),
            seeded_rng(Some(1)),
        );

        // Let the task spawn and arm its ticker before moving the clock.
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(16)).await;
        tokio::task::yield_now().await;
        assert!(rx.has_changed().unwrap());

        task.stop().await;
        // After stop, no further snapshots arrive.
        rx.borrow_and_update();
        tokio::time::advance(Duration::from_secs(60)).await;
        tokio::task::yield_now().await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn latency_task_publishes_readings() {
        let (task, mut rx) = LatencyTask::start(Duration::from_secs(2), seeded_rng(Some(5)));
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(3)).await;
        tokio::task::yield_now().await;
        assert!(rx.has_changed().unwrap());
        let ms = *rx.borrow_and_update();
        assert!((8.0..=45.0).contains(&ms));
        task.stop().await;
    }
}

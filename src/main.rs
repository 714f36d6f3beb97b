use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::time::MissedTickBehavior;

use ledgerly::drift::{seeded_rng, DriftParams, DriftTask, LatencyTask};
use ledgerly::insight::ProviderKind;
use ledgerly::ledger::LedgerStore;
use ledgerly::logging::{json_log, obj, v_bool, v_num, v_str, Domain};
use ledgerly::metrics::savings_progress;
use ledgerly::state::{seed_accounts, seed_profile, seed_snapshot, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    let store = Arc::new(LedgerStore::new(
        seed_snapshot(),
        seed_profile(),
        seed_accounts(),
        Duration::from_secs(cfg.drift_cooldown_secs),
    ));

    let kind = ProviderKind::from_env(&cfg);
    let provider = kind.build(&cfg)?;
    json_log(
        Domain::System,
        "provider_selected",
        obj(&[
            ("type", v_str(provider.name())),
            ("live", v_bool(matches!(kind, ProviderKind::Http))),
        ]),
    );

    // One-shot startup analysis. Runs concurrently with the tickers; if
    // the process is torn down first the result is simply dropped.
    let insight_handle = {
        let store = store.clone();
        tokio::spawn(async move {
            let snapshot = store.snapshot();
            let text = provider.generate_insight(&snapshot).await;
            json_log(
                Domain::Insight,
                "insight_ready",
                obj(&[("text", v_str(&text))]),
            );
        })
    };

    let drift = DriftTask::start(
        store.clone(),
        DriftParams {
            balance_amplitude: cfg.balance_amplitude,
            flow_amplitude: cfg.flow_amplitude,
        },
        Duration::from_secs(cfg.drift_interval_secs),
        seeded_rng(cfg.rng_seed),
    );
    let (latency, latency_rx) = LatencyTask::start(
        Duration::from_secs(cfg.latency_interval_secs),
        seeded_rng(cfg.rng_seed.map(|s| s.wrapping_add(1))),
    );

    json_log(
        Domain::System,
        "engine_started",
        obj(&[
            ("drift_interval_secs", v_num(cfg.drift_interval_secs as f64)),
            ("latency_interval_secs", v_num(cfg.latency_interval_secs as f64)),
        ]),
    );

    let mut metrics_ticker =
        tokio::time::interval(Duration::from_secs(cfg.metrics_interval_secs));
    metrics_ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    metrics_ticker.tick().await;

    loop {
        tokio::select! {
            _ = metrics_ticker.tick() => {
                let snapshot = store.snapshot();
                json_log(
                    Domain::System,
                    "metrics",
                    obj(&[
                        ("balance", v_num(snapshot.total_balance)),
                        ("savings_progress", v_num(savings_progress(&snapshot))),
                        ("transactions", v_num(snapshot.recent_transactions.len() as f64)),
                        ("latency_ms", v_num(*latency_rx.borrow())),
                    ]),
                );
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    // Teardown: stop every periodic task before exit so nothing leaks.
    drift.stop().await;
    latency.stop().await;
    insight_handle.abort();
    let _ = insight_handle.await;
    json_log(Domain::System, "engine_stopped", obj(&[]));

    Ok(())
}

//! Stub provider so the engine runs as a static demo without keys or
//! backend infrastructure.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::Rng;
use tokio::time::sleep;

use crate::drift::seeded_rng;
use crate::ledger::FinancialSnapshot;
use crate::state::Config;

use super::{keyword_category, InsightProvider, INSIGHTS};

pub struct MockProvider {
    insight_delay: Duration,
    category_delay: Duration,
    rng: Mutex<StdRng>,
}

impl MockProvider {
    pub fn new(cfg: &Config) -> Self {
        Self {
            insight_delay: Duration::from_millis(cfg.insight_delay_ms),
            category_delay: Duration::from_millis(cfg.category_delay_ms),
            rng: Mutex::new(seeded_rng(cfg.rng_seed)),
        }
    }
}

#[async_trait]
impl InsightProvider for MockProvider {
    async fn generate_insight(&self, _snapshot: &FinancialSnapshot) -> String {
        // Simulated thinking latency, then a rotating canned analysis.
        sleep(self.insight_delay).await;
        let idx = {
            let mut rng = self.rng.lock().expect("mock rng poisoned");
            rng.gen_range(0..INSIGHTS.len())
        };
        INSIGHTS[idx].to_string()
    }

    async fn predict_category(&self, merchant: &str) -> String {
        sleep(self.category_delay).await;
        keyword_category(merchant).to_string()
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insight::CATEGORIES;
    use crate::state::seed_snapshot;

    fn fast_provider(seed: u64) -> MockProvider {
        let cfg = Config {
            insight_delay_ms: 0,
            category_delay_ms: 0,
            rng_seed: Some(seed),
            ..Config::from_env()
        };
        MockProvider::new(&cfg)
    }

    #[tokio::test]
    async fn insight_comes_from_the_pool() {
        let provider = fast_provider(42);
        let snap = seed_snapshot();
        for _ in 0..20 {
            let insight = provider.generate_insight(&snap).await;
            assert!(INSIGHTS.contains(&insight.as_str()));
        }
    }

    #[tokio::test]
    async fn insight_deterministic_under_seed() {
        let snap = seed_snapshot();
        let a = fast_provider(7).generate_insight(&snap).await;
        let b = fast_provider(7).generate_insight(&snap).await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn category_matches_keyword_table() {
        let provider = fast_provider(1);
        assert_eq!(provider.predict_category("Uber Business").await, "Travel");
        assert_eq!(provider.predict_category("Totally Unknown Inc").await, "Office");
        for merchant in ["Figma Pro", "AWS Services", "Stripe Payout"] {
            let category = provider.predict_category(merchant).await;
            assert!(CATEGORIES.contains(&category.as_str()));
        }
    }
}

//! Insight + category prediction providers.
//!
//! One seam, two implementations: the deterministic mock (default) and
//! the HTTP client used when an API key is configured. Both are
//! infallible at this boundary. Every failure inside a provider
//! resolves to a fixed fallback, so the caller never sees an error
//! state for this feature.

use anyhow::Result;
use async_trait::async_trait;

use crate::ledger::FinancialSnapshot;
use crate::state::Config;

pub mod http;
pub mod mock;

/// The closed category set the predictor is allowed to answer with.
pub const CATEGORIES: [&str; 6] = ["Software", "Hosting", "Income", "Travel", "Office", "Marketing"];

/// Category returned for unrecognized merchants and for any response
/// outside the closed set.
pub const DEFAULT_CATEGORY: &str = "Office";

/// Canned analysis lines: the mock's answer pool and the HTTP
/// provider's fallback set.
pub const INSIGHTS: [&str; 6] = [
    "Liquidity architecture is optimal. Savings velocity is currently 36% below your 'Growth' threshold. Recommend re-allocating $1,200 from discretionary to the tax-reserve vault.",
    "Variance detected in monthly burn rate. Infrastructure costs have exceeded baseline by 12%. Suggest optimization of AWS instances to reserved tier.",
    "Capital allocation efficiency is at 94%. Surplus liquidity detected in operational accounts. Consider deploying to high-yield static instruments.",
    "System nominal. Revenue streams align with Q3 projections. Alpha vector indicates positive momentum vs S&P 500 baseline.",
    "Spending anomaly detected in 'Travel' sector. Rate of expenditure is 1.5x higher than trailing 30-day average. Awaiting manual override.",
    "Reserve buffers are healthy. Estimated runway extended by 14 days due to recent reduction in 'Software' subscriptions.",
];

#[async_trait]
pub trait InsightProvider {
    /// Free-text analysis of the snapshot. Never fails; a broken
    /// backend yields a member of [`INSIGHTS`].
    async fn generate_insight(&self, snapshot: &FinancialSnapshot) -> String;

    /// One of [`CATEGORIES`]; anything unrecognized resolves to
    /// [`DEFAULT_CATEGORY`].
    async fn predict_category(&self, merchant: &str) -> String;

    fn name(&self) -> &'static str;
}

#[derive(Clone, Copy, Debug)]
pub enum ProviderKind {
    Mock,
    Http,
}

impl ProviderKind {
    /// An API key in the environment switches the engine to real mode.
    pub fn from_env(cfg: &Config) -> Self {
        if cfg.insight_api_key.is_some() {
            ProviderKind::Http
        } else {
            ProviderKind::Mock
        }
    }

    pub fn build(self, cfg: &Config) -> Result<Box<dyn InsightProvider + Send + Sync>> {
        match self {
            ProviderKind::Mock => Ok(Box::new(mock::MockProvider::new(cfg))),
            ProviderKind::Http => Ok(Box::new(http::HttpProvider::new(cfg)?)),
        }
    }
}

/// Deterministic fallback pick: same snapshot, same string, so a flaky
/// backend does not flicker between messages on retry-less re-renders.
pub fn fallback_insight(snapshot: &FinancialSnapshot) -> &'static str {
    let idx = (snapshot.total_balance.to_bits() % INSIGHTS.len() as u64) as usize;
    INSIGHTS[idx]
}

/// Keyword table mirrored by the mock and used to validate nothing: the
/// HTTP provider trusts its backend but clamps to the closed set.
pub fn keyword_category(merchant: &str) -> &'static str {
    let m = merchant.to_lowercase();
    let any = |needles: &[&str]| needles.iter().any(|n| m.contains(n));

    if any(&["uber", "lyft", "flight", "hotel", "airbnb"]) {
        "Travel"
    } else if any(&["aws", "vercel", "digitalocean", "heroku", "hosting"]) {
        "Hosting"
    } else if any(&["figma", "adobe", "linear", "slack", "jetbrains", "cursor"]) {
        "Software"
    } else if any(&["client", "invoice", "payment", "stripe", "paypal"]) {
        "Income"
    } else if any(&["wework", "staples", "office", "fedex"]) {
        "Office"
    } else if any(&["ads", "meta", "linkedin", "google"]) {
        "Marketing"
    } else {
        DEFAULT_CATEGORY
    }
}

//! Real-mode provider: one POST per question, no retries, and a canned
//! answer for every way the call can fail. Transport errors, bad
//! statuses, and off-script category labels all degrade silently; the
//! dashboard never renders an error for this feature.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::ledger::FinancialSnapshot;
use crate::logging::{json_log, obj, params_hash, v_str, Domain};
use crate::state::Config;

use super::{fallback_insight, InsightProvider, CATEGORIES, DEFAULT_CATEGORY};

pub struct HttpProvider {
    client: Client,
    base: Url,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct InsightRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
struct CategoryRequest<'a> {
    merchant: &'a str,
}

#[derive(Debug, Deserialize)]
struct CategoryResponse {
    category: String,
}

impl HttpProvider {
    pub fn new(cfg: &Config) -> Result<Self> {
        let base = Url::parse(&cfg.insight_base)
            .with_context(|| format!("invalid insight base url: {}", cfg.insight_base))?;
        anyhow::ensure!(
            matches!(base.scheme(), "http" | "https"),
            "insight base url must be http(s), got {}",
            base.scheme()
        );
        Ok(Self {
            client: Client::new(),
            base,
            api_key: cfg.insight_api_key.clone().unwrap_or_default(),
        })
    }

    fn prompt_for(snapshot: &FinancialSnapshot) -> String {
        format!(
            "You are a financial analyst terminal. Current balance ${:.2}, \
             monthly savings ${:.2} against a ${:.2} goal, {} recent transactions. \
             Reply with one short insight in a clinical, technical tone.",
            snapshot.total_balance,
            snapshot.monthly_savings,
            snapshot.monthly_goal,
            snapshot.recent_transactions.len()
        )
    }

    async fn request_insight(&self, prompt: &str) -> Result<String> {
        let endpoint = self.base.join("v1/insight").context("bad insight endpoint")?;
        let text = self
            .client
            .post(endpoint)
            .bearer_auth(&self.api_key)
            .json(&InsightRequest { prompt })
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        anyhow::ensure!(!text.trim().is_empty(), "empty insight response");
        Ok(text.trim().to_string())
    }

    async fn request_category(&self, merchant: &str) -> Result<String> {
        let endpoint = self.base.join("v1/category").context("bad category endpoint")?;
        let resp: CategoryResponse = self
            .client
            .post(endpoint)
            .bearer_auth(&self.api_key)
            .json(&CategoryRequest { merchant })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp.category)
    }
}

#[async_trait]
impl InsightProvider for HttpProvider {
    async fn generate_insight(&self, snapshot: &FinancialSnapshot) -> String {
        let prompt = Self::prompt_for(snapshot);
        match self.request_insight(&prompt).await {
            Ok(text) => text,
            Err(err) => {
                json_log(
                    Domain::Insight,
                    "insight_fallback",
                    obj(&[
                        ("reason", v_str(&err.to_string())),
                        ("prompt_hash", v_str(&params_hash(&prompt))),
                    ]),
                );
                fallback_insight(snapshot).to_string()
            }
        }
    }

    async fn predict_category(&self, merchant: &str) -> String {
        match self.request_category(merchant).await {
            // The backend is free text at heart; only the closed set leaves here.
            Ok(label) => {
                let label = label.trim().to_string();
                if CATEGORIES.contains(&label.as_str()) {
                    label
                } else {
                    DEFAULT_CATEGORY.to_string()
                }
            }
            Err(err) => {
                json_log(
                    Domain::Insight,
                    "category_fallback",
                    obj(&[("merchant", v_str(merchant)), ("reason", v_str(&err.to_string()))]),
                );
                DEFAULT_CATEGORY.to_string()
            }
        }
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

use crate::accounts::{Account, AccountKind, CardTheme, UserProfile};
use crate::ledger::{ChartPoint, FinancialSnapshot, Transaction, TxStatus};

#[derive(Clone)]
pub struct Config {
    /// Seconds between drift ticks on the balance / cash-flow series
    pub drift_interval_secs: u64,
    /// Full width of the uniform balance jitter (draws from ±a/2)
    pub balance_amplitude: f64,
    /// Full width of the uniform cash-flow jitter (draws from ±b/2)
    pub flow_amplitude: f64,
    /// Drift stays suppressed this long after a real mutation
    pub drift_cooldown_secs: u64,
    /// Seconds between latency-meter ticks
    pub latency_interval_secs: u64,
    /// Seconds between metrics log lines in the engine loop
    pub metrics_interval_secs: u64,
    /// Simulated thinking delay for the mock insight call, in ms
    pub insight_delay_ms: u64,
    /// Simulated processing delay for the mock category call, in ms
    pub category_delay_ms: u64,
    /// Base URL for the real-mode insight/category endpoints
    pub insight_base: String,
    /// API key; presence switches the provider from mock to HTTP
    pub insight_api_key: Option<String>,
    /// Seed for every random source; 0 means seed from entropy
    pub rng_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            drift_interval_secs: std::env::var("DRIFT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(15),
            balance_amplitude: std::env::var("BALANCE_AMP").ok().and_then(|v| v.parse().ok()).unwrap_or(150.0),
            flow_amplitude: std::env::var("FLOW_AMP").ok().and_then(|v| v.parse().ok()).unwrap_or(400.0),
            drift_cooldown_secs: std::env::var("DRIFT_COOLDOWN_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(3),
            latency_interval_secs: std::env::var("LATENCY_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(2),
            metrics_interval_secs: std::env::var("METRICS_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(15),
            insight_delay_ms: std::env::var("INSIGHT_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(2000),
            category_delay_ms: std::env::var("CATEGORY_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(800),
            insight_base: std::env::var("INSIGHT_BASE").unwrap_or_else(|_| "https://insight.ledgerly.dev".to_string()),
            insight_api_key: std::env::var("INSIGHT_API_KEY").ok(),
            rng_seed: std::env::var("RNG_SEED").ok().and_then(|v| v.parse().ok()),
        }
    }
}

pub fn now_ts() -> u64 {
    chrono::Utc::now().timestamp() as u64
}

/// Local wall-clock time rendered the way the transaction list shows it
pub fn display_time() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}

fn seed_time(offset_minutes: i64) -> String {
    (chrono::Local::now() - chrono::Duration::minutes(offset_minutes))
        .format("%H:%M:%S")
        .to_string()
}

/// The startup snapshot every run begins from. Volatile; rebuilt on restart.
pub fn seed_snapshot() -> FinancialSnapshot {
    FinancialSnapshot {
        total_balance: 24_500.80,
        monthly_savings: 3_200.0,
        monthly_goal: 5_000.0,
        cash_flow: [
            ("Mon", 21_000.0),
            ("Tue", 21_500.0),
            ("Wed", 20_800.0),
            ("Thu", 23_000.0),
            ("Fri", 24_500.0),
            ("Sat", 24_200.0),
            ("Sun", 24_500.0),
        ]
        .iter()
        .map(|(label, value)| ChartPoint { label: label.to_string(), value: *value })
        .collect(),
        recent_transactions: vec![
            seed_tx("1", "Figma Pro", -15.00, 2, "Software", TxStatus::Cleared),
            seed_tx("2", "Client Transfer #402", 4_500.00, 45, "Income", TxStatus::Cleared),
            seed_tx("3", "Vercel Usage", -45.20, 120, "Hosting", TxStatus::Pending),
            seed_tx("4", "Linear App", -12.00, 180, "Software", TxStatus::Cleared),
            seed_tx("5", "Uber Business", -34.50, 240, "Travel", TxStatus::Cleared),
            seed_tx("6", "AWS Services", -142.20, 300, "Infrastructure", TxStatus::Cleared),
        ],
    }
}

fn seed_tx(
    id: &str,
    merchant: &str,
    amount: f64,
    minutes_ago: i64,
    category: &str,
    status: TxStatus,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        merchant: merchant.to_string(),
        amount,
        date: seed_time(minutes_ago),
        category: category.to_string(),
        status,
    }
}

pub fn seed_profile() -> UserProfile {
    UserProfile {
        full_name: "John Doe".to_string(),
        email: "john.doe@ledgerly.com".to_string(),
        role: "Senior Freelancer".to_string(),
        two_factor: true,
        api_key: "pk_live_51M...".to_string(),
        initials: "JD".to_string(),
    }
}

pub fn seed_accounts() -> Vec<Account> {
    vec![
        Account {
            id: "ACC-1".to_string(),
            bank_name: "Mercury Capital".to_string(),
            balance: 18_220.40,
            kind: AccountKind::Debit,
            number: "•••• 4821".to_string(),
            expiry: "09/28".to_string(),
            cvv: "•••".to_string(),
            theme: CardTheme::Neon,
        },
        Account {
            id: "ACC-2".to_string(),
            bank_name: "Brex Business".to_string(),
            balance: 6_280.40,
            kind: AccountKind::Credit,
            number: "•••• 7730".to_string(),
            expiry: "01/27".to_string(),
            cvv: "•••".to_string(),
            theme: CardTheme::Cobalt,
        },
    ]
}

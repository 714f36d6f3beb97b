// Profile + account (card) state. Mutated wholesale on save; no
// validation beyond presence.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub two_factor: bool,
    pub api_key: String,
    /// Derived from `full_name`; not user-editable
    pub initials: String,
}

/// Partial profile from a save action. `None` fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub two_factor: Option<bool>,
    pub api_key: Option<String>,
}

/// First letter of each name word, uppercased, at most two.
pub fn derive_initials(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(|c| c.to_uppercase())
        .collect()
}

pub fn merge_profile(current: &UserProfile, patch: ProfilePatch) -> UserProfile {
    let full_name = patch.full_name.unwrap_or_else(|| current.full_name.clone());
    let initials = if full_name == current.full_name {
        current.initials.clone()
    } else {
        derive_initials(&full_name)
    };
    UserProfile {
        full_name,
        email: patch.email.unwrap_or_else(|| current.email.clone()),
        role: patch.role.unwrap_or_else(|| current.role.clone()),
        two_factor: patch.two_factor.unwrap_or(current.two_factor),
        api_key: patch.api_key.unwrap_or_else(|| current.api_key.clone()),
        initials,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountKind {
    Debit,
    Credit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardTheme {
    Neon,
    Dark,
    Cobalt,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub bank_name: String,
    pub balance: f64,
    pub kind: AccountKind,
    /// Masked display string, never a real PAN
    pub number: String,
    pub expiry: String,
    pub cvv: String,
    pub theme: CardTheme,
}

/// Build a new display card. Only the last four digits exist; they are
/// drawn from the injected RNG so tests stay deterministic.
pub fn new_card<R: Rng>(
    rng: &mut R,
    bank_name: &str,
    balance: f64,
    kind: AccountKind,
    theme: CardTheme,
) -> Account {
    let last_four: u32 = rng.gen_range(1000..10_000);
    Account {
        id: format!("ACC-{}", crate::logging::ts_epoch_ms()),
        bank_name: bank_name.to_string(),
        balance,
        kind,
        number: format!("•••• {}", last_four),
        expiry: "12/29".to_string(),
        cvv: "•••".to_string(),
        theme,
    }
}

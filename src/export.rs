//! CSV export of the transaction list.
//!
//! The merchant column is quoted because merchant names carry commas;
//! nothing else in a row can. Each export returns a manifest with the
//! SHA-256 of the exact bytes written, so a downstream consumer can
//! verify what it received.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

use crate::ledger::Transaction;
use crate::logging::{json_log, obj, v_num, v_str, Domain};

pub const CSV_HEADER: &str = "ID,Date,Merchant,Category,Amount,Status";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportManifest {
    pub path: String,
    pub rows: u64,
    pub content_sha256: String,
}

pub fn render_csv(transactions: &[Transaction]) -> String {
    let mut lines = Vec::with_capacity(transactions.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for tx in transactions {
        lines.push(format!(
            "{},{},\"{}\",{},{},{}",
            tx.id,
            tx.date,
            tx.merchant,
            tx.category,
            tx.amount,
            tx.status.as_str()
        ));
    }
    lines.join("\n")
}

pub fn content_sha256(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn export_csv(path: &Path, transactions: &[Transaction]) -> Result<ExportManifest> {
    let content = render_csv(transactions);
    std::fs::write(path, &content)
        .with_context(|| format!("failed to write export to {}", path.display()))?;
    let manifest = ExportManifest {
        path: path.display().to_string(),
        rows: transactions.len() as u64,
        content_sha256: content_sha256(&content),
    };
    json_log(
        Domain::Export,
        "csv_export",
        obj(&[
            ("path", v_str(&manifest.path)),
            ("rows", v_num(manifest.rows as f64)),
            ("sha256", v_str(&manifest.content_sha256)),
        ]),
    );
    Ok(manifest)
}

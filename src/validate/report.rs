use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::data::extract::{display_value, group_thousands};

const TINYBAR_PER_HBAR: f64 = 100_000_000.0;

/// Backend answer for a validated account.
///
/// Every field is optional and loosely typed: a value of the wrong shape
/// degrades to a placeholder instead of failing the whole report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationReport {
    #[serde(deserialize_with = "lenient_string")]
    pub account_id: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub balance_tinybar: Option<f64>,
    pub tx_count: Option<Value>,
    pub score: Option<Value>,
    #[serde(rename = "last5Tx", deserialize_with = "lenient_list")]
    pub last5_tx: Vec<TxSummary>,
    #[serde(deserialize_with = "lenient_strings")]
    pub flags: Vec<String>,
}

/// One recent transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TxSummary {
    pub transaction_id: Value,
    pub result: Value,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?
        .filter(|v| !v.is_null())
        .map(|v| display_value(&v)))
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Anything but an array is an empty list; entries that are not objects are skipped.
fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<TxSummary>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_strings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items.iter().map(display_value).collect(),
        _ => Vec::new(),
    })
}

/// Display text for a count-like field; absent or `null` reads as `0`.
fn count_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "0".to_string(),
        Some(v) => display_value(v),
    }
}

/// Display-ready text for each field of a [`ValidationReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedReport {
    /// Account the report belongs to.
    pub account: String,
    /// Balance in HBAR, e.g. `1.235 HBAR`.
    pub balance: String,
    pub tx_count: String,
    /// Score out of 100, e.g. `85 / 100`.
    pub score: String,
    /// One `id: result` line per transaction.
    pub transactions: Vec<String>,
    /// Flags joined with `, `.
    pub flags: String,
}

impl RenderedReport {
    /// Render `report`; `requested` names the account when the report does not.
    pub fn new(report: &ValidationReport, requested: &str) -> Self {
        let hbar = report.balance_tinybar.unwrap_or(0.0) / TINYBAR_PER_HBAR;
        Self {
            account: report
                .account_id
                .clone()
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| requested.to_string()),
            balance: format!("{} HBAR", group_thousands(hbar)),
            tx_count: count_text(report.tx_count.as_ref()),
            score: format!("{} / 100", count_text(report.score.as_ref())),
            transactions: report
                .last5_tx
                .iter()
                .map(|tx| {
                    format!(
                        "{}: {}",
                        display_value(&tx.transaction_id),
                        display_value(&tx.result)
                    )
                })
                .collect(),
            flags: report.flags.join(", "),
        }
    }
}

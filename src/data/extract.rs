//! Pure text extractors used by the endpoint probes.
//!
//! Everything here is deterministic and side-effect free: uptime formatting,
//! counter scraping from metrics exposition text, one-line truncation and
//! thousands grouping.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Default maximum width for labels derived from free text.
pub const DEFAULT_LINE_WIDTH: usize = 24;

/// Counter names tried against metrics text, most specific first.
pub const COUNTER_NAMES: &[&str] = &[
    "hguard_requests_total",
    "http_requests_total",
    "requests_total",
];

static COUNTER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    COUNTER_NAMES
        .iter()
        .map(|name| {
            Regex::new(&format!(r"(?i){}\s+(\d+(?:\.\d+)?)", regex::escape(name)))
                .expect("counter pattern is valid")
        })
        .collect()
});

/// Format an uptime in seconds using its two coarsest units.
///
/// Returns `"{d}d {h}h"` from one day up, `"{h}h {m}m"` from one hour up and
/// `"{m}m"` below that. Negative or non-finite input yields an empty string.
pub fn format_uptime(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return String::new();
    }

    let total = seconds.floor() as u64;
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Interpret a JSON value as a duration in seconds.
///
/// Numbers and numeric strings are accepted; anything else is `None`.
pub fn uptime_seconds(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Render a JSON value as display text: strings verbatim, anything else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Scrape the first known request counter from metrics exposition text.
///
/// Patterns are tried strictly in [`COUNTER_NAMES`] order, so a specific
/// counter wins over a generic one regardless of where it appears.
pub fn extract_counter(text: &str) -> Option<f64> {
    COUNTER_PATTERNS.iter().find_map(|re| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
    })
}

/// Collapse whitespace runs, trim, and cut to at most `max_len` characters.
pub fn truncate_line(s: Option<&str>, max_len: usize) -> String {
    let collapsed = s
        .unwrap_or_default()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    collapsed.chars().take(max_len).collect()
}

/// Format a number with comma thousands separators and up to three
/// fraction digits (`1234567` -> `1,234,567`, `1234.5` -> `1,234.5`).
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = (value.abs() * 1_000.0).round() / 1_000.0;
    let fixed = format!("{:.3}", rounded);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if value < 0.0 && rounded > 0.0 {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

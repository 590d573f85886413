//! Endpoint probes.
//!
//! Each probe checks one backend capability and always produces a
//! [`PresentationState`](crate::data::PresentationState); failures never
//! escape a probe.
//!
//! | Probe | Path | Fallback | Failure state |
//! |-------|------|----------|---------------|
//! | [`probe_liveness`] | `/health` | `/healthz` | `err` / `Down` |
//! | [`probe_version`] | `/version` | none | `warn` / `unknown` |
//! | [`probe_metrics`] | `/metrics` | none | `warn` / `Unavailable` |
//!
//! Responses come in several shapes, so field lookups go through a
//! [`FieldChain`]: an ordered list of equivalent field names where the first
//! populated one wins.

mod liveness;
mod metrics;
mod version;

pub use liveness::{probe_liveness, UPTIME_FIELDS};
pub use metrics::probe_metrics;
pub use version::{probe_version, VERSION_FIELDS};

use serde_json::Value;

/// Ordered list of equivalent JSON field names, highest priority first.
#[derive(Debug, Clone, Copy)]
pub struct FieldChain(&'static [&'static str]);

impl FieldChain {
    pub const fn new(fields: &'static [&'static str]) -> Self {
        Self(fields)
    }

    /// Field names in priority order.
    pub fn fields(&self) -> &'static [&'static str] {
        self.0
    }

    /// First populated field of `body`, if `body` is an object.
    pub fn first<'a>(&self, body: &'a Value) -> Option<&'a Value> {
        self.0
            .iter()
            .filter_map(|field| body.get(*field))
            .find(|value| is_populated(value))
    }
}

/// Whether a JSON value carries usable content.
///
/// Null, `false`, empty strings and numeric zero count as unpopulated.
pub fn is_populated(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CHAIN: FieldChain = FieldChain::new(&["primary", "secondary", "tertiary"]);

    #[test]
    fn test_first_respects_priority() {
        let body = json!({"tertiary": 3, "secondary": 2});
        assert_eq!(CHAIN.first(&body), Some(&json!(2)));
    }

    #[test]
    fn test_first_skips_unpopulated() {
        let body = json!({"primary": null, "secondary": "", "tertiary": "x"});
        assert_eq!(CHAIN.first(&body), Some(&json!("x")));

        let body = json!({"primary": 0, "secondary": false});
        assert_eq!(CHAIN.first(&body), None);
    }

    #[test]
    fn test_first_on_non_object() {
        assert_eq!(CHAIN.first(&json!("primary")), None);
        assert_eq!(CHAIN.first(&json!([1, 2])), None);
    }

    #[test]
    fn test_is_populated() {
        assert!(is_populated(&json!(1)));
        assert!(is_populated(&json!("v")));
        assert!(is_populated(&json!(true)));
        assert!(is_populated(&json!({})));
        assert!(!is_populated(&json!(0.0)));
        assert!(!is_populated(&json!(null)));
    }
}

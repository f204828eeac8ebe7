//! Query-string parameters for Ticket Tailor list endpoints.
//!
//! Tools assemble every supported key up front and let [`filter_params`]
//! drop the ones the caller left blank. The upstream API treats an absent
//! filter differently from an empty one, so blank values must never reach
//! the wire.

use std::fmt;

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Free-form string value.
    Text(String),
    /// Integer value, typically Unix seconds.
    Int(i64),
}

impl ParamValue {
    /// Returns false for empty strings and zero.
    ///
    /// Zero is dropped along with empty strings; no current filter can
    /// legitimately be `0`.
    pub fn is_truthy(&self) -> bool {
        match self {
            ParamValue::Text(s) => !s.is_empty(),
            ParamValue::Int(n) => *n != 0,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Int(n) => write!(f, "{}", n),
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

/// Ordered set of query parameters.
///
/// Keys keep their insertion order. Values may be absent until the set is
/// filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, Option<ParamValue>)>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter. `None` records the key as absent.
    pub fn with<V: Into<ParamValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.entries.push((key.into(), value.map(Into::into)));
        self
    }

    /// Returns a copy without absent or falsy entries.
    #[must_use]
    pub fn filtered(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(_, value)| value.as_ref().is_some_and(ParamValue::is_truthy))
                .cloned()
                .collect(),
        }
    }

    /// Looks up the value stored for `key`, if present and not absent.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_ref())
    }

    /// Returns the keys in insertion order.
    #[cfg(test)]
    pub(crate) fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Wire form of the present entries, ready for `RequestBuilder::query`.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.clone(), v.to_string())))
            .collect()
    }
}

/// Removes every entry whose value is absent, empty, or zero.
pub fn filter_params(params: &QueryParams) -> QueryParams {
    params.filtered()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> QueryParams {
        QueryParams::new()
            .with("a", Some("x"))
            .with("b", Some(""))
            .with("c", None::<&str>)
            .with("d", Some("y"))
    }

    #[test]
    fn test_filter_params_drops_empty_and_absent() {
        let expected = QueryParams::new().with("a", Some("x")).with("d", Some("y"));
        assert_eq!(filter_params(&sample()), expected);
    }

    #[test]
    fn test_filter_params_drops_zero() {
        let params = QueryParams::new()
            .with("created_at.gte", Some(0i64))
            .with("created_at.lte", Some(1704067200i64));
        let filtered = filter_params(&params);
        assert_eq!(filtered.keys().collect::<Vec<_>>(), vec!["created_at.lte"]);
    }

    #[test]
    fn test_filter_params_is_idempotent() {
        let cases = [
            sample(),
            QueryParams::new(),
            QueryParams::new().with("only", None::<i64>),
            QueryParams::new()
                .with("n", Some(0i64))
                .with("s", Some(" "))
                .with("t", Some(17i64)),
        ];
        for params in cases {
            let once = filter_params(&params);
            assert_eq!(filter_params(&once), once);
        }
    }

    #[test]
    fn test_filter_params_keeps_order_and_values() {
        let params = QueryParams::new()
            .with("z", Some("1"))
            .with("empty", Some(""))
            .with("a", Some(" padded "))
            .with("m", Some(-3i64));
        let filtered = filter_params(&params);
        assert_eq!(
            filtered.to_pairs(),
            vec![
                ("z".to_string(), "1".to_string()),
                ("a".to_string(), " padded ".to_string()),
                ("m".to_string(), "-3".to_string()),
            ]
        );
    }

    #[test]
    fn test_get_and_keys() {
        let params = sample();
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["a", "b", "c", "d"]);
        assert_eq!(params.get("a"), Some(&ParamValue::Text("x".into())));
        assert_eq!(params.get("c"), None);
        assert_eq!(params.get("missing"), None);
        assert_eq!(QueryParams::new().keys().count(), 0);
    }

    #[test]
    fn test_param_value_display() {
        assert_eq!(ParamValue::from(1709251200i64).to_string(), "1709251200");
        assert_eq!(ParamValue::from("published").to_string(), "published");
    }
}

//! Filter values and their resolution from loosely-shaped JSON input.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

/// Boolean operator joining the values of a grouped filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoolOp {
    /// Every value must match.
    And,
    /// Any value may match.
    #[default]
    Or,
    /// No value may match. Each value is negated and the results are AND-ed.
    Not,
}

impl BoolOp {
    /// Returns the operator used between rendered values.
    pub fn joiner(&self) -> &'static str {
        match self {
            BoolOp::Or => " OR ",
            BoolOp::And | BoolOp::Not => " AND ",
        }
    }
}

impl fmt::Display for BoolOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoolOp::And => write!(f, "AND"),
            BoolOp::Or => write!(f, "OR"),
            BoolOp::Not => write!(f, "NOT"),
        }
    }
}

impl FromStr for BoolOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AND" => Ok(BoolOp::And),
            "OR" => Ok(BoolOp::Or),
            "NOT" => Ok(BoolOp::Not),
            _ => Err(format!("unknown boolean operator: {}", s)),
        }
    }
}

/// Inclusive numeric bound. Dates are epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Range {
    /// Lower bound; rendered as `0` when absent.
    pub from: Option<i64>,
    /// Upper bound; rendered as [`OPEN_UPPER_BOUND`] when absent.
    pub to: Option<i64>,
}

/// Upper bound rendered for a range with no `to`.
///
/// Largest integer a JSON double represents exactly.
pub const OPEN_UPPER_BOUND: i64 = 9_007_199_254_740_991;

impl Range {
    /// Returns the bounds to render, filling in defaults for missing ones.
    pub fn bounds(&self) -> (i64, i64) {
        (self.from.unwrap_or(0), self.to.unwrap_or(OPEN_UPPER_BOUND))
    }

    /// Returns true if neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// The constraint placed on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// A single bare term.
    Scalar(String),
    /// Several values, OR-joined.
    List(Vec<String>),
    /// Inclusive range.
    Range(Range),
    /// Values joined with an explicit operator.
    Grouped { op: BoolOp, values: Vec<String> },
}

impl FilterValue {
    /// Creates a scalar value.
    pub fn scalar(value: impl Into<String>) -> Self {
        FilterValue::Scalar(value.into())
    }

    /// Creates a list value.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterValue::List(values.into_iter().map(Into::into).collect())
    }

    /// Creates a range value.
    pub fn range(from: Option<i64>, to: Option<i64>) -> Self {
        FilterValue::Range(Range { from, to })
    }

    /// Creates a grouped value joined with `op`.
    pub fn grouped<I, S>(op: BoolOp, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterValue::Grouped {
            op,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolves a JSON value into a filter value.
    ///
    /// Returns `None` for `null`, numbers, booleans and any object that is
    /// neither a range (`from`/`to`) nor a group (`value` with optional `bool`).
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(FilterValue::Scalar(s.clone())),
            Value::Array(items) => Some(FilterValue::List(strings(items))),
            Value::Object(map) => from_object(map),
            _ => None,
        }
    }

    /// Returns true if rendering this value would produce no clause.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Scalar(s) => s.is_empty(),
            FilterValue::List(values) | FilterValue::Grouped { values, .. } => {
                values.iter().all(|v| v.is_empty())
            }
            FilterValue::Range(range) => range.is_unbounded(),
        }
    }
}

fn from_object(map: &Map<String, Value>) -> Option<FilterValue> {
    if let Some(value) = map.get("value") {
        let op = match map.get("bool") {
            None | Some(Value::Null) => BoolOp::default(),
            Some(Value::String(s)) => s.parse().ok()?,
            Some(_) => return None,
        };
        let values = match value {
            Value::String(s) => vec![s.clone()],
            Value::Array(items) => strings(items),
            _ => return None,
        };
        return Some(FilterValue::Grouped { op, values });
    }

    if map.contains_key("from") || map.contains_key("to") {
        return Some(FilterValue::Range(Range {
            from: map.get("from").and_then(bound),
            to: map.get("to").and_then(bound),
        }));
    }

    None
}

fn strings(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.as_str().map(str::to_string))
        .collect()
}

/// Reads a range bound. Only whole numbers within `±OPEN_UPPER_BOUND` count;
/// anything else leaves the bound absent.
fn bound(value: &Value) -> Option<i64> {
    let n = match value.as_i64() {
        Some(n) => n,
        None => {
            let f = value.as_f64().filter(|f| f.fract() == 0.0)?;
            if f.abs() > OPEN_UPPER_BOUND as f64 {
                return None;
            }
            f as i64
        }
    };
    (n.abs() <= OPEN_UPPER_BOUND).then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_is_scalar() {
        assert_eq!(
            FilterValue::from_json(&json!("water")),
            Some(FilterValue::scalar("water"))
        );
    }

    #[test]
    fn test_array_is_list() {
        assert_eq!(
            FilterValue::from_json(&json!(["me", "you"])),
            Some(FilterValue::list(["me", "you"]))
        );
    }

    #[test]
    fn test_array_drops_non_strings() {
        assert_eq!(
            FilterValue::from_json(&json!(["a", 1, null, "b"])),
            Some(FilterValue::list(["a", "b"]))
        );
    }

    #[test]
    fn test_object_with_bounds_is_range() {
        assert_eq!(
            FilterValue::from_json(&json!({"from": 1609459200000_i64, "to": 1612137600000_i64})),
            Some(FilterValue::range(Some(1609459200000), Some(1612137600000)))
        );
        assert_eq!(
            FilterValue::from_json(&json!({"to": 5})),
            Some(FilterValue::range(None, Some(5)))
        );
    }

    #[test]
    fn test_non_numeric_bound_is_absent() {
        assert_eq!(
            FilterValue::from_json(&json!({"from": "yesterday", "to": 10})),
            Some(FilterValue::range(None, Some(10)))
        );
    }

    #[test]
    fn test_fractional_bound_is_absent() {
        assert_eq!(
            FilterValue::from_json(&json!({"from": 1.9, "to": 10})),
            Some(FilterValue::range(None, Some(10)))
        );
        assert_eq!(
            FilterValue::from_json(&json!({"from": 2.0})),
            Some(FilterValue::range(Some(2), None))
        );
    }

    #[test]
    fn test_out_of_range_bound_is_absent() {
        assert_eq!(
            FilterValue::from_json(&json!({"from": 1e300, "to": 10})),
            Some(FilterValue::range(None, Some(10)))
        );
        assert_eq!(
            FilterValue::from_json(&json!({"from": 5, "to": u64::MAX})),
            Some(FilterValue::range(Some(5), None))
        );
        assert_eq!(
            FilterValue::from_json(&json!({"to": OPEN_UPPER_BOUND + 1})),
            Some(FilterValue::range(None, None))
        );
        assert_eq!(
            FilterValue::from_json(&json!({"to": OPEN_UPPER_BOUND})),
            Some(FilterValue::range(None, Some(OPEN_UPPER_BOUND)))
        );
    }

    #[test]
    fn test_object_with_value_is_grouped() {
        assert_eq!(
            FilterValue::from_json(&json!({"bool": "NOT", "value": ["a", "b"]})),
            Some(FilterValue::grouped(BoolOp::Not, ["a", "b"]))
        );
    }

    #[test]
    fn test_grouped_defaults_to_or() {
        assert_eq!(
            FilterValue::from_json(&json!({"value": ["Feature Layer"]})),
            Some(FilterValue::grouped(BoolOp::Or, ["Feature Layer"]))
        );
    }

    #[test]
    fn test_grouped_accepts_single_string() {
        assert_eq!(
            FilterValue::from_json(&json!({"bool": "and", "value": "x"})),
            Some(FilterValue::grouped(BoolOp::And, ["x"]))
        );
    }

    #[test]
    fn test_unresolvable_shapes() {
        assert_eq!(FilterValue::from_json(&json!(null)), None);
        assert_eq!(FilterValue::from_json(&json!(42)), None);
        assert_eq!(FilterValue::from_json(&json!(true)), None);
        assert_eq!(FilterValue::from_json(&json!({"value": null})), None);
        assert_eq!(FilterValue::from_json(&json!({"bool": "XOR", "value": ["a"]})), None);
        assert_eq!(FilterValue::from_json(&json!({"other": 1})), None);
    }

    #[test]
    fn test_is_empty() {
        assert!(FilterValue::scalar("").is_empty());
        assert!(FilterValue::list(Vec::<String>::new()).is_empty());
        assert!(FilterValue::list([""]).is_empty());
        assert!(FilterValue::grouped(BoolOp::Not, Vec::<String>::new()).is_empty());
        assert!(FilterValue::range(None, None).is_empty());
        assert!(!FilterValue::range(None, Some(1)).is_empty());
        assert!(!FilterValue::scalar("a").is_empty());
    }

    #[test]
    fn test_range_bounds_defaults() {
        let range = Range {
            from: None,
            to: Some(1612137600000),
        };
        assert_eq!(range.bounds(), (0, 1612137600000));

        let range = Range {
            from: Some(1609459200000),
            to: None,
        };
        // Assumes the open upper bound renders as the largest exact JSON integer.
        assert_eq!(range.bounds(), (1609459200000, OPEN_UPPER_BOUND));
    }

    #[test]
    fn test_bool_op_from_str() {
        assert_eq!("not".parse::<BoolOp>().unwrap(), BoolOp::Not);
        assert_eq!("Or".parse::<BoolOp>().unwrap(), BoolOp::Or);
        assert!("nand".parse::<BoolOp>().is_err());
    }
}

//! Content filters and query assembly.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::clause::{build_clause, EXCLUSION_CLAUSE};
use super::field::{lookup, FIELDS};
use super::value::FilterValue;

/// A mapping of field name to constraint.
///
/// Insertion order does not matter: clauses are always emitted in the order
/// of [`FIELDS`], so semantically equal filters compile to the same string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFilter {
    fields: BTreeMap<String, FilterValue>,
}

impl ContentFilter {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the constraint for `field`, replacing any previous one.
    pub fn with(mut self, field: impl Into<String>, value: FilterValue) -> Self {
        self.insert(field, value);
        self
    }

    /// Sets the constraint for `field`, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, value: FilterValue) {
        self.fields.insert(field.into(), value);
    }

    /// Returns the constraint for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.fields.get(field)
    }

    /// Returns true if no field carries a constraint.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Builds a filter from a JSON value.
    ///
    /// Non-object input yields an empty filter, and fields whose values
    /// cannot be resolved are dropped.
    pub fn from_json(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            tracing::debug!("filter is not a JSON object, treating as empty");
            return Self::default();
        };

        let mut filter = Self::default();
        for (field, raw) in map {
            match FilterValue::from_json(raw) {
                Some(value) => filter.insert(field.clone(), value),
                None => tracing::trace!(field = %field, "dropping unresolvable filter value"),
            }
        }
        filter
    }

    /// Compiles the filter into a query string.
    ///
    /// Each non-empty clause is joined with ` AND `, and the exclusion clause
    /// always comes last. An empty filter compiles to the exclusion clause alone.
    pub fn to_query(&self) -> String {
        for field in self.fields.keys() {
            if lookup(field).is_none() {
                tracing::trace!(field = %field, "ignoring unsupported filter field");
            }
        }

        FIELDS
            .iter()
            .filter_map(|spec| {
                self.fields
                    .get(spec.name)
                    .and_then(|value| build_clause(spec, value))
            })
            .chain(std::iter::once(EXCLUSION_CLAUSE.to_string()))
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

impl<'de> Deserialize<'de> for ContentFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

impl<K: Into<String>> FromIterator<(K, FilterValue)> for ContentFilter {
    fn from_iter<I: IntoIterator<Item = (K, FilterValue)>>(iter: I) -> Self {
        let mut filter = Self::default();
        for (field, value) in iter {
            filter.insert(field, value);
        }
        filter
    }
}

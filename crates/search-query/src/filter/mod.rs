//! Content filter compiler.
//!
//! Turns a mapping of field name to [`FilterValue`] into the boolean query
//! dialect understood by the portal search endpoint.
//!
//! # Query Grammar
//!
//! - Clauses are parenthesized and joined with ` AND `
//! - Lists: `(owner: me OR owner: you)`
//! - Quoted fields: `(tags: "tag 1" OR tags: "tag 2")`
//! - Negated groups: `(-id: 1 AND -id: 2)`
//! - Ranges: `(created: [1609459200000 TO 1612137600000])`
//! - Every query ends with `(-type: "code attachment")`
//!
//! # Example
//!
//! ```
//! use search_query_rs::filter::{BoolOp, ContentFilter, FilterValue};
//!
//! let filter = ContentFilter::new()
//!     .with("terms", FilterValue::scalar("water"))
//!     .with("id", FilterValue::grouped(BoolOp::Not, ["1", "2"]));
//!
//! assert_eq!(
//!     filter.to_query(),
//!     r#"(water) AND (-id: 1 AND -id: 2) AND (-type: "code attachment")"#
//! );
//! ```

mod clause;
mod field;
mod query;
mod value;

pub use clause::{build_clause, EXCLUSION_CLAUSE};
pub use field::{lookup, FieldKind, FieldSpec, FIELDS};
pub use query::ContentFilter;
pub use value::{BoolOp, FilterValue, Range, OPEN_UPPER_BOUND};

#[cfg(test)]
mod tests;

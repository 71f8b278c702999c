//! Renders one parenthesized clause per field.

use super::field::{FieldKind, FieldSpec};
use super::value::{BoolOp, FilterValue};

/// Clause appended to every compiled query.
pub const EXCLUSION_CLAUSE: &str = r#"(-type: "code attachment")"#;

/// Builds the clause for `value` on `spec`.
///
/// Returns `None` when the value is empty or its shape does not fit the
/// field kind (a range on a text field, a list on a date field).
pub fn build_clause(spec: &FieldSpec, value: &FilterValue) -> Option<String> {
    if value.is_empty() {
        return None;
    }

    let is_range_field = spec.kind == FieldKind::Range;
    let expr = match value {
        FilterValue::Range(range) if is_range_field => {
            let (from, to) = range.bounds();
            format!("{}: [{} TO {}]", spec.name, from, to)
        }
        FilterValue::Range(_) => return None,
        _ if is_range_field => return None,
        FilterValue::Scalar(term) => join(spec, BoolOp::Or, std::slice::from_ref(term)),
        FilterValue::List(values) => join(spec, BoolOp::Or, values),
        FilterValue::Grouped { op, values } => join(spec, *op, values),
    };

    Some(format!("({})", expr))
}

fn join(spec: &FieldSpec, op: BoolOp, values: &[String]) -> String {
    let prefix = spec.prefix();
    let negation = if op == BoolOp::Not { "-" } else { "" };

    values
        .iter()
        .filter(|v| !v.is_empty())
        .map(|v| format!("{}{}{}", negation, prefix, spec.render_value(v)))
        .collect::<Vec<_>>()
        .join(op.joiner())
}

//! Static per-field rendering policy.

/// How a field's values are rendered into a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-text search terms, rendered without a `field:` prefix.
    Terms,
    /// Free-text or categorical values (`title`, `tags`, ...).
    Text,
    /// Bare tokens such as identifiers and enum-like values.
    Token,
    /// Numeric or epoch-millisecond date range.
    Range,
}

/// Rendering metadata for a single filterable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as it appears in the compiled query.
    pub name: &'static str,
    /// Kind of values the field accepts.
    pub kind: FieldKind,
    /// Whether each value is wrapped in double quotes.
    pub quoted: bool,
}

impl FieldSpec {
    const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            quoted: matches!(kind, FieldKind::Text),
        }
    }

    /// Returns the `field: ` prefix, or an empty string for search terms.
    pub fn prefix(&self) -> String {
        match self.kind {
            FieldKind::Terms => String::new(),
            _ => format!("{}: ", self.name),
        }
    }

    /// Renders a single value, quoting it when the field requires it.
    pub fn render_value(&self, value: &str) -> String {
        if self.quoted {
            format!("\"{}\"", value)
        } else {
            value.to_string()
        }
    }
}

/// Every supported field, in the order clauses appear in the compiled query.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("terms", FieldKind::Terms),
    FieldSpec::new("owner", FieldKind::Token),
    FieldSpec::new("created", FieldKind::Range),
    FieldSpec::new("modified", FieldKind::Range),
    FieldSpec::new("title", FieldKind::Text),
    FieldSpec::new("typekeywords", FieldKind::Text),
    FieldSpec::new("tags", FieldKind::Text),
    FieldSpec::new("type", FieldKind::Text),
    FieldSpec::new("access", FieldKind::Token),
    FieldSpec::new("culture", FieldKind::Token),
    FieldSpec::new("categories", FieldKind::Text),
    FieldSpec::new("orgid", FieldKind::Token),
    FieldSpec::new("id", FieldKind::Token),
];

/// Looks up the spec for a field name. Names are matched exactly.
pub fn lookup(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|spec| spec.name == name)
}

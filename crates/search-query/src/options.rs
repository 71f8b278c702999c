//! Per-call compile options and connection resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("invalid sort order: {} (expected asc or desc)", s)),
        }
    }
}

/// Opaque credential forwarded to the search backend.
///
/// The compiler never inspects it. It is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a raw token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token for the transport layer.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Request-scoped options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Opaque page cursor.
    pub page: Option<String>,
    pub sort_field: Option<String>,
    pub sort_order: Option<SortOrder>,
    /// Comma-separated fields to return facet counts for.
    pub aggregations: Option<String>,
    /// Bounding box, passed through uninterpreted.
    pub bbox: Option<String>,
    /// Search endpoint; overrides the service default.
    pub endpoint: Option<String>,
    /// Credential; overrides the service default.
    pub credential: Option<Credential>,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_field = Some(field.into());
        self.sort_order = Some(order);
        self
    }

    pub fn with_aggregations(mut self, fields: impl Into<String>) -> Self {
        self.aggregations = Some(fields.into());
        self
    }

    pub fn with_bbox(mut self, bbox: impl Into<String>) -> Self {
        self.bbox = Some(bbox.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }
}

/// Connection defaults supplied by the calling service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceContext {
    pub endpoint: Option<String>,
    pub credential: Option<Credential>,
}

impl ServiceContext {
    pub fn new(endpoint: Option<String>, credential: Option<Credential>) -> Self {
        Self {
            endpoint,
            credential,
        }
    }
}

/// Resolved connection context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Connection {
    pub endpoint: Option<String>,
    pub credential: Option<Credential>,
}

impl Connection {
    /// Resolves each key independently: the per-call option wins, then the
    /// service default, otherwise the key stays unset. Empty values count as unset.
    pub fn resolve(options: &CompileOptions, service: &ServiceContext) -> Self {
        let endpoint = non_empty(options.endpoint.as_deref())
            .or_else(|| non_empty(service.endpoint.as_deref()))
            .map(str::to_string);

        let credential = options
            .credential
            .as_ref()
            .filter(|c| !c.expose().is_empty())
            .or_else(|| {
                service
                    .credential
                    .as_ref()
                    .filter(|c| !c.expose().is_empty())
            })
            .cloned();

        Self {
            endpoint,
            credential,
        }
    }
}

/// Returns `value` if it is present and not empty.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

//! Assembly of the final search parameters.

use serde::Serialize;

use crate::filter::ContentFilter;
use crate::options::{non_empty, CompileOptions, Connection, Credential, ServiceContext, SortOrder};
use crate::paging::PageCursor;

/// Facet count size requested whenever aggregations are present.
pub const COUNT_SIZE: u32 = 200;

/// Paging and aggregation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub start: u32,
    pub num: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_fields: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_size: Option<u32>,
}

/// A compiled search request, ready for the transport layer.
///
/// Absent keys are omitted when serialized, never written as `null`.
/// The credential is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledQuery {
    pub q: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    pub params: SearchParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip)]
    pub credential: Option<Credential>,
}

impl CompiledQuery {
    /// Returns the paging state of this query.
    pub fn page(&self) -> PageCursor {
        PageCursor::new(self.params.start, self.params.num)
    }
}

/// Compiles a filter and its options into a [`CompiledQuery`].
///
/// This is a pure function: it performs no I/O and never fails.
///
/// # Example
///
/// ```
/// use search_query_rs::filter::{ContentFilter, FilterValue};
/// use search_query_rs::options::{CompileOptions, ServiceContext};
/// use search_query_rs::compile;
///
/// let filter = ContentFilter::new().with("terms", FilterValue::scalar("water"));
/// let compiled = compile(&filter, &CompileOptions::new(), &ServiceContext::default());
///
/// assert_eq!(compiled.q, r#"(water) AND (-type: "code attachment")"#);
/// assert_eq!((compiled.params.start, compiled.params.num), (1, 10));
/// ```
pub fn compile(
    filter: &ContentFilter,
    options: &CompileOptions,
    service: &ServiceContext,
) -> CompiledQuery {
    let page = PageCursor::decode(options.page.as_deref());
    let connection = Connection::resolve(options, service);

    let count_fields = non_empty(options.aggregations.as_deref()).map(str::to_string);
    let count_size = count_fields.as_ref().map(|_| COUNT_SIZE);

    let sort_field = non_empty(options.sort_field.as_deref());
    let (sort_field, sort_order) = match (sort_field, options.sort_order) {
        (Some(field), Some(order)) => (Some(field.to_string()), Some(order)),
        _ => (None, None),
    };

    CompiledQuery {
        q: filter.to_query(),
        sort_field,
        sort_order,
        params: SearchParams {
            start: page.start,
            num: page.num,
            count_fields,
            count_size,
        },
        bbox: non_empty(options.bbox.as_deref()).map(str::to_string),
        endpoint: connection.endpoint,
        credential: connection.credential,
    }
}

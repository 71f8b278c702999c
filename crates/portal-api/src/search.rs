//! Wire types for the portal `/search` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use search_query_rs::options::SortOrder;
use search_query_rs::paging::PageCursor;
use search_query_rs::params::CompiledQuery;

/// Form body sent to `<endpoint>/search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchForm<'a> {
    pub f: &'static str,
    pub q: &'a str,
    pub start: u32,
    pub num: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_fields: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<&'a str>,
}

impl<'a> From<&'a CompiledQuery> for SearchForm<'a> {
    fn from(query: &'a CompiledQuery) -> Self {
        Self {
            f: "json",
            q: &query.q,
            start: query.params.start,
            num: query.params.num,
            sort_field: query.sort_field.as_deref(),
            sort_order: query.sort_order,
            count_fields: query.params.count_fields.as_deref(),
            count_size: query.params.count_size,
            bbox: query.bbox.as_deref(),
            token: query.credential.as_ref().map(|c| c.expose()),
        }
    }
}

/// Response from the `/search` endpoint.
///
/// Result entries are passed through as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub start: i64,
    #[serde(default)]
    pub num: u32,
    /// Start of the next page, or `-1` when there is none.
    #[serde(default = "no_next_start")]
    pub next_start: i64,
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Value>,
}

fn no_next_start() -> i64 {
    -1
}

impl SearchResponse {
    /// Returns the cursor for the next page, if the portal reported one.
    pub fn next_page(&self) -> Option<PageCursor> {
        if self.next_start <= 0 {
            return None;
        }
        let start = u32::try_from(self.next_start).ok()?;
        let num = if self.num > 0 { self.num } else { PageCursor::default().num };
        Some(PageCursor::new(start, num))
    }
}

/// Error object embedded in a 200 response body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct PortalErrorBody {
    pub code: u16,
    #[serde(default)]
    pub message: String,
}

//! Opaque pagination cursors.
//!
//! A cursor is the standard base64 encoding of `{"start": <int>, "num": <int>}`.
//! Decoding never fails: a missing or malformed cursor yields the first page.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};

/// Default 1-based offset of the first result.
pub const DEFAULT_START: u32 = 1;

/// Default page size.
pub const DEFAULT_NUM: u32 = 10;

/// Paging state carried between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    /// 1-based offset of the first result.
    pub start: u32,
    /// Number of results per page.
    pub num: u32,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            num: DEFAULT_NUM,
        }
    }
}

impl PageCursor {
    /// Creates a cursor for the given offset and page size.
    pub fn new(start: u32, num: u32) -> Self {
        Self { start, num }
    }

    /// Decodes a cursor, falling back to the defaults on any failure.
    ///
    /// Values that do not fit a `u32` count as malformed.
    ///
    /// # Example
    ///
    /// ```
    /// use search_query_rs::paging::PageCursor;
    ///
    /// let cursor = PageCursor::decode(Some("eyJzdGFydCI6NSwibnVtIjoyMH0="));
    /// assert_eq!(cursor, PageCursor::new(5, 20));
    /// assert_eq!(PageCursor::decode(Some("invalid base 64")), PageCursor::default());
    /// assert_eq!(PageCursor::decode(None), PageCursor::default());
    /// ```
    pub fn decode(cursor: Option<&str>) -> Self {
        match cursor {
            None => Self::default(),
            Some(token) => Self::try_decode(token).unwrap_or_else(|reason| {
                tracing::debug!(reason = %reason, "invalid page cursor, using defaults");
                Self::default()
            }),
        }
    }

    fn try_decode(token: &str) -> Result<Self, String> {
        let bytes = BASE64
            .decode(token.trim())
            .map_err(|e| format!("base64: {}", e))?;
        let cursor: PageCursor =
            serde_json::from_slice(&bytes).map_err(|e| format!("json: {}", e))?;

        if cursor.start < 1 || cursor.num < 1 {
            return Err(format!(
                "out of range: start={} num={}",
                cursor.start, cursor.num
            ));
        }
        Ok(cursor)
    }

    /// Encodes the cursor as an opaque token.
    pub fn encode(&self) -> String {
        // Two integer fields always serialize.
        BASE64.encode(serde_json::to_vec(self).unwrap_or_default())
    }

    /// Returns the cursor for the page following this one.
    pub fn next(&self) -> Self {
        Self {
            start: self.start.saturating_add(self.num),
            num: self.num,
        }
    }
}

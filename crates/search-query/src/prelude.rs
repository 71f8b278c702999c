//! Prelude module for convenient imports.
//!
//! ```
//! use search_query_rs::prelude::*;
//! ```

pub use crate::filter::{BoolOp, ContentFilter, FilterValue, Range};
pub use crate::options::{CompileOptions, Connection, Credential, ServiceContext, SortOrder};
pub use crate::paging::PageCursor;
pub use crate::params::{compile, CompiledQuery, SearchParams, COUNT_SIZE};

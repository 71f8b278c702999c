//! Content search query compiler.
//!
//! Compiles a typed content filter into the boolean query dialect of a
//! portal search backend, together with paging, sorting and aggregation
//! parameters.
//!
//! # Quick Start
//!
//! ```
//! use search_query_rs::prelude::*;
//!
//! let filter = ContentFilter::new()
//!     .with("terms", FilterValue::scalar("water"))
//!     .with("owner", FilterValue::list(["me", "you"]));
//!
//! let options = CompileOptions::new().with_sort("title", SortOrder::Desc);
//! let compiled = compile(&filter, &options, &ServiceContext::default());
//!
//! assert_eq!(
//!     compiled.q,
//!     r#"(water) AND (owner: me OR owner: you) AND (-type: "code attachment")"#
//! );
//! assert_eq!(compiled.sort_order, Some(SortOrder::Desc));
//! ```

pub mod filter;
pub mod options;
pub mod paging;
pub mod params;
pub mod prelude;

pub use params::compile;

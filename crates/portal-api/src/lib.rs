//! Portal content search client.
//!
//! Sends a [`CompiledQuery`](search_query_rs::params::CompiledQuery) to the
//! portal `/search` endpoint and returns the raw result page.
//!
//! ```no_run
//! use portal_api_rs::client::PortalClient;
//! use search_query_rs::prelude::*;
//!
//! # async fn run() -> portal_api_rs::error::Result<()> {
//! let filter = ContentFilter::new().with("terms", FilterValue::scalar("water"));
//! let options = CompileOptions::new().with_endpoint("https://www.arcgis.com/sharing/rest");
//! let query = compile(&filter, &options, &ServiceContext::default());
//!
//! let page = PortalClient::new()?.search(&query).await?;
//! println!("{} results", page.total);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
mod retry;
pub mod search;

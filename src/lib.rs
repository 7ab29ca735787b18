// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # search-client
//!
//! A paginated, rate-limit aware client for the Twitter/X v2 search API.
//!
//! ## Features
//!
//! - **Typed queries**: Search criteria and field selections compose into wire parameters
//! - **Cursor pagination**: Follow `next_token` under an item target, a page limit or to the end
//! - **Fixed cooldown**: A constant pause between consecutive requests, cancellable between pages
//! - **Counts**: Sum per-page totals over the counts endpoints
//! - **Persistence**: JSON, CSV and DuckDB table sinks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use search_client::{ClientConfig, SearchClient, SearchCriteria, SearchEndpoint, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = SearchClient::new(ClientConfig::from_env())?;
//!
//!     let tweets = client
//!         .get_tweets(
//!             SearchCriteria::new(["from:TwitterDev", "-is:retweet"]),
//!             Some(50),
//!             SearchEndpoint::Recent,
//!         )
//!         .await?;
//!
//!     search_client::output::save_to_json("tweets.json", &tweets)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                         SearchClient                          │
//! │  lookups · search_page · get_tweets · get_*_tweets · counts   │
//! └───────────────────────────────────────────────────────────────┘
//!                                │
//! ┌───────────┬──────────┬───────┴───────┬─────────────┬──────────┐
//! │   Query   │ Resource │  Pagination   │    HTTP     │  Output  │
//! ├───────────┼──────────┼───────────────┼─────────────┼──────────┤
//! │ Criteria  │ Base URL │ Driver        │ Bearer auth │ JSON     │
//! │ Fields    │ Segments │ Counts        │ PageSource  │ CSV      │
//! │ ParamBag  │          │ Pacing        │ Status map  │ DuckDB   │
//! └───────────┴──────────┴───────────────┴─────────────┴──────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Closed field vocabularies
pub mod fields;

/// Resource locators
pub mod resource;

/// Query parameter composition
pub mod query;

/// Bearer token authentication
pub mod auth;

/// HTTP transport and the page source seam
pub mod http;

/// Cursor pagination and count aggregation
pub mod pagination;

/// High-level search client
pub mod client;

/// Client configuration
pub mod config;

/// JSON, CSV and DuckDB sinks
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use client::SearchClient;
pub use config::ClientConfig;
pub use pagination::{AggregationMode, FetchBudget, PaginationOutcome, StopReason};
pub use query::{CountQuery, FieldSelection, PageRequest, SearchCriteria};
pub use resource::ResourcePath;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

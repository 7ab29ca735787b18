//! High-level search client
//!
//! [`SearchClient`] bundles the authenticated transport, the API base and the
//! pacing settings, and exposes one method per provider operation: user and
//! tweet lookups, single search pages, paginated search and counts.
//!
//! # Example
//!
//! ```rust,ignore
//! use search_client::{ClientConfig, SearchClient, SearchCriteria};
//!
//! let client = SearchClient::new(ClientConfig::from_env())?;
//! let tweets = client
//!     .get_tweets(SearchCriteria::new(["from:TwitterDev", "-is:retweet"]), Some(50), Default::default())
//!     .await?;
//! ```

mod search;

pub use search::{SearchClient, DEFAULT_TWEET_FIELDS};

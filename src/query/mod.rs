//! Query parameter composition
//!
//! Turns typed search criteria into the flat parameter bag the provider
//! expects on the wire.
//!
//! # Rules
//!
//! - Multi-valued fields are joined with `,` in input order
//! - Absent or empty values never produce a key
//! - Query terms are joined with a single space, without escaping
//! - Time bounds are passed through exactly as given

mod criteria;
mod params;

pub use criteria::{format_timestamp, CountQuery, FieldSelection, PageRequest, SearchCriteria};
pub use params::{keys, tweet_lookup_params, user_lookup_params, ParamBag};

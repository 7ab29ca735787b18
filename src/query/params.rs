//! Wire parameter names and the parameter bag builder

use super::criteria::FieldSelection;
use crate::fields::FieldName;
use crate::types::StringMap;

/// Exact provider parameter names
pub mod keys {
    pub const QUERY: &str = "query";
    pub const MAX_RESULTS: &str = "max_results";
    pub const START_TIME: &str = "start_time";
    pub const END_TIME: &str = "end_time";
    pub const NEXT_TOKEN: &str = "next_token";
    pub const SINCE_ID: &str = "since_id";
    pub const UNTIL_ID: &str = "until_id";
    pub const SORT_ORDER: &str = "sort_order";
    pub const GRANULARITY: &str = "granularity";
    pub const EXPANSIONS: &str = "expansions";
    pub const TWEET_FIELDS: &str = "tweet.fields";
    pub const USER_FIELDS: &str = "user.fields";
    pub const MEDIA_FIELDS: &str = "media.fields";
    pub const PLACE_FIELDS: &str = "place.fields";
    pub const POLL_FIELDS: &str = "poll.fields";
    pub const IDS: &str = "ids";
    pub const USERNAMES: &str = "usernames";
}

/// Accumulates wire parameters, dropping anything absent or empty
#[derive(Debug, Clone, Default)]
pub struct ParamBag {
    params: StringMap,
}

impl ParamBag {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value unless it is empty
    pub fn put(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        if !value.is_empty() {
            self.params.insert(key.to_string(), value);
        }
        self
    }

    /// Insert an optional value
    pub fn put_opt(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.put(key, value);
        }
        self
    }

    /// Join vocabulary members with `,`
    pub fn put_fields<T: FieldName>(&mut self, key: &str, values: &[T]) -> &mut Self {
        let joined = values
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(",");
        self.put(key, joined)
    }

    /// Join free-form values (ids, usernames) with `,`
    pub fn put_list(&mut self, key: &str, values: &[String]) -> &mut Self {
        self.put(key, values.join(","))
    }

    /// Number of parameters collected so far
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether no parameter has been collected
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Finish and return the parameter map
    pub fn into_map(self) -> StringMap {
        self.params
    }
}

/// Parameters for the multi-user lookup endpoint
pub fn user_lookup_params(usernames: &[String], fields: &FieldSelection) -> StringMap {
    let mut bag = ParamBag::new();
    bag.put_list(keys::USERNAMES, usernames);
    fields.write_params(&mut bag);
    bag.into_map()
}

/// Parameters for the tweet lookup endpoint
pub fn tweet_lookup_params(ids: &[String], fields: &FieldSelection) -> StringMap {
    let mut bag = ParamBag::new();
    bag.put_list(keys::IDS, ids);
    fields.write_params(&mut bag);
    bag.into_map()
}

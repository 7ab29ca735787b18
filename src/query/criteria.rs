//! Typed search criteria
//!
//! Each request shape is a plain value with named optional fields. Turning it
//! into wire parameters is a pure function of the value.

use super::params::{keys, ParamBag};
use crate::fields::{Expansion, MediaField, PlaceField, PollField, TweetField, UserField};
use crate::types::{Granularity, SearchEndpoint, SortOrder, StringMap};
use chrono::{DateTime, SecondsFormat, Utc};

/// Format an instant the way the provider expects time bounds
/// (`YYYY-MM-DDTHH:MM:SSZ`, second granularity)
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn collect<T, I>(values: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
{
    values.into_iter().collect()
}

// ============================================================================
// Field Selection
// ============================================================================

/// Requested expansions and optional per-entity fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelection {
    pub expansions: Vec<Expansion>,
    pub tweet: Vec<TweetField>,
    pub user: Vec<UserField>,
    pub media: Vec<MediaField>,
    pub place: Vec<PlaceField>,
    pub poll: Vec<PollField>,
}

impl FieldSelection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn expansions(mut self, values: impl IntoIterator<Item = Expansion>) -> Self {
        self.expansions = collect(values);
        self
    }

    #[must_use]
    pub fn tweet_fields(mut self, values: impl IntoIterator<Item = TweetField>) -> Self {
        self.tweet = collect(values);
        self
    }

    #[must_use]
    pub fn user_fields(mut self, values: impl IntoIterator<Item = UserField>) -> Self {
        self.user = collect(values);
        self
    }

    #[must_use]
    pub fn media_fields(mut self, values: impl IntoIterator<Item = MediaField>) -> Self {
        self.media = collect(values);
        self
    }

    #[must_use]
    pub fn place_fields(mut self, values: impl IntoIterator<Item = PlaceField>) -> Self {
        self.place = collect(values);
        self
    }

    #[must_use]
    pub fn poll_fields(mut self, values: impl IntoIterator<Item = PollField>) -> Self {
        self.poll = collect(values);
        self
    }

    /// True when nothing is selected
    pub fn is_empty(&self) -> bool {
        self.expansions.is_empty()
            && self.tweet.is_empty()
            && self.user.is_empty()
            && self.media.is_empty()
            && self.place.is_empty()
            && self.poll.is_empty()
    }

    pub(crate) fn write_params(&self, bag: &mut ParamBag) {
        bag.put_fields(keys::EXPANSIONS, &self.expansions)
            .put_fields(keys::TWEET_FIELDS, &self.tweet)
            .put_fields(keys::USER_FIELDS, &self.user)
            .put_fields(keys::MEDIA_FIELDS, &self.media)
            .put_fields(keys::PLACE_FIELDS, &self.place)
            .put_fields(keys::POLL_FIELDS, &self.poll);
    }

    /// Wire parameters for this selection alone
    pub fn to_params(&self) -> StringMap {
        let mut bag = ParamBag::new();
        self.write_params(&mut bag);
        bag.into_map()
    }
}

// ============================================================================
// Search Criteria
// ============================================================================

/// What to search for: query terms, bounds, ordering and field selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Query terms, joined by single spaces (`from:user`, `-is:retweet`, ...)
    pub query: Vec<String>,
    /// Oldest instant, inclusive
    pub start_time: Option<String>,
    /// Newest instant, exclusive
    pub end_time: Option<String>,
    pub since_id: Option<String>,
    pub until_id: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub fields: FieldSelection,
}

impl SearchCriteria {
    /// Create criteria from an ordered list of query terms
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            query: terms.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Append one query term
    #[must_use]
    pub fn term(mut self, term: impl Into<String>) -> Self {
        self.query.push(term.into());
        self
    }

    #[must_use]
    pub fn start_time(mut self, value: impl Into<String>) -> Self {
        self.start_time = Some(value.into());
        self
    }

    #[must_use]
    pub fn start_at(self, instant: DateTime<Utc>) -> Self {
        self.start_time(format_timestamp(instant))
    }

    #[must_use]
    pub fn end_time(mut self, value: impl Into<String>) -> Self {
        self.end_time = Some(value.into());
        self
    }

    #[must_use]
    pub fn end_at(self, instant: DateTime<Utc>) -> Self {
        self.end_time(format_timestamp(instant))
    }

    #[must_use]
    pub fn since_id(mut self, id: impl Into<String>) -> Self {
        self.since_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn until_id(mut self, id: impl Into<String>) -> Self {
        self.until_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }

    #[must_use]
    pub fn fields(mut self, fields: FieldSelection) -> Self {
        self.fields = fields;
        self
    }

    /// The query terms joined with single spaces
    pub fn query_string(&self) -> String {
        self.query.join(" ")
    }

    pub(crate) fn write_params(&self, bag: &mut ParamBag) {
        bag.put(keys::QUERY, self.query_string())
            .put_opt(keys::START_TIME, self.start_time.as_deref())
            .put_opt(keys::END_TIME, self.end_time.as_deref())
            .put_opt(keys::SINCE_ID, self.since_id.as_deref())
            .put_opt(keys::UNTIL_ID, self.until_id.as_deref())
            .put_opt(keys::SORT_ORDER, self.sort_order.map(SortOrder::as_str));
        self.fields.write_params(bag);
    }

    /// Wire parameters, without paging keys
    pub fn to_params(&self) -> StringMap {
        let mut bag = ParamBag::new();
        self.write_params(&mut bag);
        bag.into_map()
    }
}

// ============================================================================
// Page Request
// ============================================================================

/// One page worth of search: criteria plus paging state and target window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub criteria: SearchCriteria,
    /// Requested `max_results` for this page
    pub page_size: u32,
    /// Opaque continuation cursor issued by the provider
    pub cursor: Option<String>,
    pub endpoint: SearchEndpoint,
}

impl PageRequest {
    /// Provider default page size
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// First page of the recent window with the default page size
    pub fn new(criteria: SearchCriteria) -> Self {
        Self {
            criteria,
            page_size: Self::DEFAULT_PAGE_SIZE,
            cursor: None,
            endpoint: SearchEndpoint::default(),
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: SearchEndpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Wire parameters including `max_results` and `next_token`
    pub fn to_params(&self) -> StringMap {
        let mut bag = ParamBag::new();
        self.criteria.write_params(&mut bag);
        bag.put(keys::MAX_RESULTS, self.page_size.to_string())
            .put_opt(keys::NEXT_TOKEN, self.cursor.as_deref());
        bag.into_map()
    }
}

// ============================================================================
// Count Query
// ============================================================================

/// Criteria accepted by the counts endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountQuery {
    pub query: Vec<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub since_id: Option<String>,
    pub until_id: Option<String>,
    pub granularity: Granularity,
    /// Cursor to resume from, normally absent
    pub cursor: Option<String>,
    pub endpoint: SearchEndpoint,
}

impl CountQuery {
    /// Count over the full archive, bucketed by day
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            query: terms.into_iter().map(Into::into).collect(),
            start_time: None,
            end_time: None,
            since_id: None,
            until_id: None,
            granularity: Granularity::Day,
            cursor: None,
            endpoint: SearchEndpoint::Archive,
        }
    }

    #[must_use]
    pub fn start_time(mut self, value: impl Into<String>) -> Self {
        self.start_time = Some(value.into());
        self
    }

    #[must_use]
    pub fn end_time(mut self, value: impl Into<String>) -> Self {
        self.end_time = Some(value.into());
        self
    }

    #[must_use]
    pub fn end_at(self, instant: DateTime<Utc>) -> Self {
        self.end_time(format_timestamp(instant))
    }

    #[must_use]
    pub fn since_id(mut self, id: impl Into<String>) -> Self {
        self.since_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn until_id(mut self, id: impl Into<String>) -> Self {
        self.until_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: SearchEndpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Wire parameters for the current cursor
    pub fn to_params(&self) -> StringMap {
        let mut bag = ParamBag::new();
        bag.put(keys::QUERY, self.query.join(" "))
            .put_opt(keys::START_TIME, self.start_time.as_deref())
            .put_opt(keys::END_TIME, self.end_time.as_deref())
            .put_opt(keys::SINCE_ID, self.since_id.as_deref())
            .put_opt(keys::UNTIL_ID, self.until_id.as_deref())
            .put(keys::GRANULARITY, self.granularity.as_str())
            .put_opt(keys::NEXT_TOKEN, self.cursor.as_deref());
        bag.into_map()
    }
}

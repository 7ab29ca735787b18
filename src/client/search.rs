//! Search client implementation

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::fields::{TweetField, UserField};
use crate::http::{HttpClient, PageSource};
use crate::pagination::{
    AggregationMode, CountAggregator, FetchBudget, Page, Pacer, PaginationDriver,
    PaginationOutcome, TokioPacer,
};
use crate::query::{
    tweet_lookup_params, user_lookup_params, CountQuery, FieldSelection, PageRequest,
    SearchCriteria,
};
use crate::resource::ResourcePath;
use crate::types::{JsonValue, SearchEndpoint};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Tweet fields requested by [`SearchClient::get_tweets`] when the caller
/// selected none
pub const DEFAULT_TWEET_FIELDS: [TweetField; 5] = [
    TweetField::AuthorId,
    TweetField::ConversationId,
    TweetField::PublicMetrics,
    TweetField::InReplyToUserId,
    TweetField::CreatedAt,
];

/// Authenticated client for the search API
#[derive(Clone)]
pub struct SearchClient {
    http: HttpClient,
    base: ResourcePath,
    config: ClientConfig,
    pacer: Arc<dyn Pacer>,
    cancel: Option<CancellationToken>,
}

impl SearchClient {
    /// Validate `config` and build the transport
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_token(config.http(), config.token()?)?;

        Ok(Self {
            http,
            base: config.base_path(),
            config,
            pacer: Arc::new(TokioPacer),
            cancel: None,
        })
    }

    /// Build from defaults overlaid with the process environment
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Replace the pacer used between pages
    #[must_use]
    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    /// Stop paginated calls between pages once `token` is cancelled
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The API base every path is built from
    pub fn base(&self) -> &ResourcePath {
        &self.base
    }

    fn driver(&self, cooldown: Duration) -> PaginationDriver<'_> {
        let driver = PaginationDriver::new(&self.http, self.base.clone())
            .with_config(self.config.pagination(cooldown))
            .with_pacer(Arc::clone(&self.pacer));
        match &self.cancel {
            Some(token) => driver.with_cancellation(token.clone()),
            None => driver,
        }
    }

    fn aggregator(&self) -> CountAggregator<'_> {
        let aggregator = CountAggregator::new(&self.http, self.base.clone())
            .with_cooldown(self.config.cooldown())
            .with_pacer(Arc::clone(&self.pacer));
        match &self.cancel {
            Some(token) => aggregator.with_cancellation(token.clone()),
            None => aggregator,
        }
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Look up one user by handle
    pub async fn get_user(&self, username: &str, fields: &FieldSelection) -> Result<JsonValue> {
        if username.trim().is_empty() {
            return Err(Error::invalid_value("username", "must not be empty"));
        }
        let path = self.base.user_by_username(username);
        self.http.fetch(&path, &fields.to_params()).await
    }

    /// Look up several users by handle
    pub async fn get_users(
        &self,
        usernames: &[String],
        fields: &FieldSelection,
    ) -> Result<JsonValue> {
        if usernames.is_empty() {
            return Err(Error::invalid_value("usernames", "at least one is required"));
        }
        let path = self.base.users_by();
        self.http
            .fetch(&path, &user_lookup_params(usernames, fields))
            .await
    }

    /// Look up tweets by id
    pub async fn get_tweets_by_ids(
        &self,
        ids: &[String],
        fields: &FieldSelection,
    ) -> Result<JsonValue> {
        if ids.is_empty() {
            return Err(Error::invalid_value("ids", "at least one is required"));
        }
        let path = self.base.tweets();
        self.http.fetch(&path, &tweet_lookup_params(ids, fields)).await
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Fetch exactly one search page
    pub async fn search_page(&self, request: &PageRequest) -> Result<Page> {
        let path = self.base.search(request.endpoint);
        let body = self.http.fetch(&path, &request.to_params()).await?;
        Ok(Page::new(body))
    }

    /// Collect tweets matching `criteria`
    ///
    /// `Some(n)` stops once `n` tweets are collected (at least the minimum
    /// page size); `None` follows every cursor using full pages.
    pub async fn get_tweets(
        &self,
        criteria: SearchCriteria,
        target: Option<u32>,
        endpoint: SearchEndpoint,
    ) -> Result<Vec<JsonValue>> {
        let mut criteria = criteria;
        if criteria.fields.tweet.is_empty() {
            criteria.fields.tweet = DEFAULT_TWEET_FIELDS.to_vec();
        }

        let request = PageRequest::new(criteria)
            .with_page_size(self.config.max_page_size)
            .with_endpoint(endpoint);

        let outcome = self
            .driver(self.config.target_cooldown())
            .run(request, FetchBudget::items_or_all(target), AggregationMode::Items)
            .await?;
        Ok(outcome.into_records())
    }

    /// Walk the full-archive search for at most `max_pages` pages
    pub async fn get_all_tweets(
        &self,
        request: PageRequest,
        max_pages: Option<u32>,
        mode: AggregationMode,
    ) -> Result<PaginationOutcome> {
        self.paged(request.with_endpoint(SearchEndpoint::Archive), max_pages, mode)
            .await
    }

    /// Walk the recent search for at most `max_pages` pages
    pub async fn get_recent_tweets(
        &self,
        request: PageRequest,
        max_pages: Option<u32>,
        mode: AggregationMode,
    ) -> Result<PaginationOutcome> {
        self.paged(request.with_endpoint(SearchEndpoint::Recent), max_pages, mode)
            .await
    }

    async fn paged(
        &self,
        request: PageRequest,
        max_pages: Option<u32>,
        mode: AggregationMode,
    ) -> Result<PaginationOutcome> {
        debug!(
            "Paged search on {:?} (max_pages={:?}, mode={:?})",
            request.endpoint, max_pages, mode
        );
        self.driver(self.config.cooldown())
            .run(request, FetchBudget::pages_or_all(max_pages), mode)
            .await
    }

    // ========================================================================
    // Counts
    // ========================================================================

    /// Total number of tweets matching `query`
    pub async fn get_tweet_count(&self, query: CountQuery) -> Result<u64> {
        self.aggregator().run(query).await
    }

    /// Number of tweets a user has posted since the account was created
    ///
    /// The window ends one minute before now, since the provider rejects end
    /// times too close to the request time.
    pub async fn get_tweet_count_user(&self, username: &str) -> Result<u64> {
        let fields = FieldSelection::new().user_fields([UserField::CreatedAt]);
        let user = self.get_user(username, &fields).await?;

        let created_at = user
            .get("data")
            .and_then(|data| data.get("created_at"))
            .and_then(JsonValue::as_str)
            .ok_or_else(|| {
                Error::decode(format!("user '{username}' response has no data.created_at"))
            })?;

        info!("Counting tweets from {} since {}", username, created_at);

        let query = CountQuery::new([format!("from:{username}")])
            .start_time(created_at)
            .end_at(Utc::now() - chrono::Duration::minutes(1));
        self.get_tweet_count(query).await
    }
}

impl std::fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchClient")
            .field("base", &self.base)
            .field("http", &self.http)
            .field("cancellable", &self.cancel.is_some())
            .finish_non_exhaustive()
    }
}

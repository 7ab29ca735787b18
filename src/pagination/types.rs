//! Pagination types
//!
//! Defines the page view, budgets, aggregation modes and the termination
//! predicate shared by the drivers.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use std::time::Duration;

// ============================================================================
// Page
// ============================================================================

/// One decoded provider response
///
/// Missing keys read as absent: no `data` means no items, no `meta` means a
/// zero count and no continuation cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    body: JsonValue,
}

impl Page {
    /// Wrap a decoded response body
    pub fn new(body: JsonValue) -> Self {
        Self { body }
    }

    /// Item records in `data`
    pub fn items(&self) -> &[JsonValue] {
        self.body
            .get("data")
            .and_then(JsonValue::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of item records on this page
    pub fn item_count(&self) -> usize {
        self.items().len()
    }

    /// Whether the page carries no items
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    fn meta_u64(&self, key: &str) -> u64 {
        self.body
            .get("meta")
            .and_then(|meta| meta.get(key))
            .and_then(JsonValue::as_u64)
            .unwrap_or(0)
    }

    /// `meta.result_count`
    pub fn result_count(&self) -> u64 {
        self.meta_u64("result_count")
    }

    /// `meta.total_tweet_count` (counts endpoints)
    pub fn total_count(&self) -> u64 {
        self.meta_u64("total_tweet_count")
    }

    /// `meta.next_token`; an empty token counts as absent
    pub fn next_token(&self) -> Option<&str> {
        self.body
            .get("meta")
            .and_then(|meta| meta.get("next_token"))
            .and_then(JsonValue::as_str)
            .filter(|token| !token.is_empty())
    }

    /// The raw body
    pub fn body(&self) -> &JsonValue {
        &self.body
    }

    /// Take the raw body
    pub fn into_body(self) -> JsonValue {
        self.body
    }

    /// Take the item records
    pub fn into_items(self) -> Vec<JsonValue> {
        match self.body {
            JsonValue::Object(mut map) => match map.remove("data") {
                Some(JsonValue::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }
}

// ============================================================================
// Budget
// ============================================================================

/// When a multi-page fetch should stop, besides cursor exhaustion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchBudget {
    /// Stop once this many items have been collected
    Items(u32),
    /// Stop after this many pages
    ///
    /// `Pages(0)` still issues the first request but returns nothing.
    Pages(u32),
    /// Follow cursors until the provider runs out
    Unbounded,
}

impl FetchBudget {
    /// Item target for `Some(n)`, unbounded for `None`
    pub fn items_or_all(target: Option<u32>) -> Self {
        target.map_or(Self::Unbounded, Self::Items)
    }

    /// Page limit for `Some(n)`, unbounded for `None`
    pub fn pages_or_all(limit: Option<u32>) -> Self {
        limit.map_or(Self::Unbounded, Self::Pages)
    }

    fn initial_remaining(self) -> Option<i64> {
        match self {
            Self::Items(n) | Self::Pages(n) => Some(i64::from(n)),
            Self::Unbounded => None,
        }
    }
}

/// What the caller gets back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregationMode {
    /// Every page body, as returned
    RawPages,
    /// The `data` records of every page, concatenated
    #[default]
    Items,
}

/// Results accumulated by a pagination run, in fetch order
#[derive(Debug, Clone, PartialEq)]
pub enum Collected {
    Pages(Vec<JsonValue>),
    Items(Vec<JsonValue>),
}

impl Collected {
    /// Empty accumulator for a mode
    pub fn new(mode: AggregationMode) -> Self {
        match mode {
            AggregationMode::RawPages => Self::Pages(Vec::new()),
            AggregationMode::Items => Self::Items(Vec::new()),
        }
    }

    /// Add one page
    pub fn push(&mut self, page: Page) {
        match self {
            Self::Pages(pages) => pages.push(page.into_body()),
            Self::Items(items) => items.extend(page.into_items()),
        }
    }

    /// Drop items beyond `limit` (raw pages are left whole)
    pub fn truncate_items(&mut self, limit: usize) {
        if let Self::Items(items) = self {
            items.truncate(limit);
        }
    }

    /// Number of pages or items held
    pub fn len(&self) -> usize {
        match self {
            Self::Pages(v) | Self::Items(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The accumulated values
    pub fn into_vec(self) -> Vec<JsonValue> {
        match self {
            Self::Pages(v) | Self::Items(v) => v,
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Provider page size bounds and the pause between consecutive fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Pause between two consecutive fetches of one run
    pub cooldown: Duration,
    /// Smallest `max_results` the provider accepts
    pub min_page_size: u32,
    /// Largest `max_results` the provider accepts
    pub max_page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_secs(3),
            min_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl PaginationConfig {
    /// Set the cooldown
    #[must_use]
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Set the page size bounds
    #[must_use]
    pub fn with_page_bounds(mut self, min: u32, max: u32) -> Self {
        self.min_page_size = min;
        self.max_page_size = max;
        self
    }

    /// Page size for `wanted` remaining items, kept within the provider bounds
    pub fn clamp_page_size(&self, wanted: i64) -> u32 {
        wanted.clamp(i64::from(self.min_page_size), i64::from(self.max_page_size)) as u32
    }

    /// Reject bounds the clamp cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.min_page_size == 0 || self.min_page_size > self.max_page_size {
            return Err(Error::config(format!(
                "invalid page size bounds {}..={}",
                self.min_page_size, self.max_page_size
            )));
        }
        Ok(())
    }
}

// ============================================================================
// State machine
// ============================================================================

/// Why a pagination run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The last page had no continuation cursor
    Exhausted,
    /// The item target or page limit was reached
    BudgetSpent,
    /// A page came back without items
    EmptyPage,
    /// The caller cancelled between pages
    Cancelled,
}

/// Decision taken after each page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch again with this cursor
    Continue { cursor: String },
    /// Stop
    Done(StopReason),
}

impl NextPage {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// The termination predicate
///
/// `remaining` is `None` for an unbounded run. An empty page always stops,
/// then a spent budget, then a missing cursor.
pub fn next_step(cursor: Option<&str>, remaining: Option<i64>, last_item_count: usize) -> NextPage {
    if last_item_count == 0 {
        return NextPage::Done(StopReason::EmptyPage);
    }
    if remaining.is_some_and(|left| left <= 0) {
        return NextPage::Done(StopReason::BudgetSpent);
    }
    match cursor {
        Some(cursor) if !cursor.is_empty() => NextPage::Continue {
            cursor: cursor.to_string(),
        },
        _ => NextPage::Done(StopReason::Exhausted),
    }
}

/// Progress of one pagination run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Pages fetched so far
    pub pages_fetched: u32,
    /// Items seen so far (before any truncation)
    pub items_fetched: u64,
    /// Budget left; `None` when unbounded
    pub remaining: Option<i64>,
    /// Cursor for the next fetch
    pub cursor: Option<String>,
}

impl PaginationState {
    /// Fresh state for a budget, starting at `cursor`
    pub fn new(budget: FetchBudget, cursor: Option<String>) -> Self {
        Self {
            pages_fetched: 0,
            items_fetched: 0,
            remaining: budget.initial_remaining(),
            cursor,
        }
    }

    /// Account for one fetched page with `item_count` items
    pub fn record_page(&mut self, budget: FetchBudget, item_count: usize) {
        self.pages_fetched += 1;
        self.items_fetched += item_count as u64;
        let spent = match budget {
            FetchBudget::Items(_) => item_count as i64,
            FetchBudget::Pages(_) => 1,
            FetchBudget::Unbounded => 0,
        };
        if let Some(left) = self.remaining.as_mut() {
            *left -= spent;
        }
    }
}

/// Everything a pagination run produced
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationOutcome {
    pub collected: Collected,
    pub pages_fetched: u32,
    pub items_fetched: u64,
    pub stop_reason: StopReason,
}

impl PaginationOutcome {
    /// The collected pages or items
    pub fn into_records(self) -> Vec<JsonValue> {
        self.collected.into_vec()
    }
}

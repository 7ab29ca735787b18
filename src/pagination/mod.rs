//! Pagination module
//!
//! Drives cursor-based pagination over the search and counts endpoints.
//!
//! # Overview
//!
//! The provider returns an opaque `meta.next_token` while more results exist.
//! [`PaginationDriver`] follows it under a [`FetchBudget`] (item target, page
//! limit or unbounded), pausing a fixed cooldown between consecutive fetches,
//! and collects either raw pages or flattened items. [`CountAggregator`] does
//! the same walk over the counts endpoints and sums the per-page totals.
//!
//! The loop is a small state machine: every fetched page is fed to
//! [`next_step`], which is the only place that decides whether to continue.

mod counts;
mod driver;
mod pacing;
mod types;

pub use counts::CountAggregator;
pub use driver::PaginationDriver;
pub use pacing::{Pacer, Pacing, TokioPacer};
pub use types::{
    next_step, AggregationMode, Collected, FetchBudget, NextPage, Page, PaginationConfig,
    PaginationOutcome, PaginationState, StopReason,
};

//! Count aggregation over the counts endpoints

use super::pacing::{Pacer, Pacing};
use super::types::Page;
use crate::error::{Error, Result};
use crate::http::PageSource;
use crate::query::CountQuery;
use crate::resource::ResourcePath;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Sums `meta.total_tweet_count` across every page of a counts query
pub struct CountAggregator<'a> {
    source: &'a dyn PageSource,
    base: ResourcePath,
    pacing: Pacing,
}

impl<'a> CountAggregator<'a> {
    pub fn new(source: &'a dyn PageSource, base: ResourcePath) -> Self {
        Self {
            source,
            base,
            pacing: Pacing::default(),
        }
    }

    #[must_use]
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.pacing = self.pacing.with_cooldown(cooldown);
        self
    }

    #[must_use]
    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacing = self.pacing.with_pacer(pacer);
        self
    }

    /// Abort between pages once `token` is cancelled
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.pacing = self.pacing.with_cancellation(token);
        self
    }

    /// Walk every page of `query` and return the summed total
    ///
    /// A partial sum is never returned: a transport failure or a
    /// cancellation fails the whole run.
    pub async fn run(&self, query: CountQuery) -> Result<u64> {
        let path = self.base.counts(query.endpoint);
        let mut query = query;
        let mut total: u64 = 0;
        let mut pages_fetched: u32 = 0;

        loop {
            let page = Page::new(self.source.fetch(&path, &query.to_params()).await?);
            pages_fetched += 1;
            total += page.total_count();

            debug!(
                "Counts page {}: {} (running total {})",
                pages_fetched,
                page.total_count(),
                total
            );

            let Some(cursor) = page.next_token() else {
                break;
            };
            let cursor = cursor.to_string();

            if !self.pacing.between_pages().await {
                return Err(Error::Cancelled { pages_fetched });
            }
            query.cursor = Some(cursor);
        }

        info!(
            "Counted {} matching item(s) over {} page(s)",
            total, pages_fetched
        );
        Ok(total)
    }
}

impl std::fmt::Debug for CountAggregator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountAggregator")
            .field("base", &self.base)
            .field("pacing", &self.pacing)
            .finish_non_exhaustive()
    }
}

//! Search pagination driver
//!
//! INIT checks the budget and page size, then the driver alternates
//! FETCHING and CONTINUE until [`next_step`] says DONE.

use super::pacing::{Pacer, Pacing};
use super::types::{
    next_step, AggregationMode, Collected, FetchBudget, NextPage, Page, PaginationConfig,
    PaginationOutcome, PaginationState, StopReason,
};
use crate::error::{Error, Result};
use crate::http::PageSource;
use crate::query::PageRequest;
use crate::resource::ResourcePath;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Follows search cursors under a budget
pub struct PaginationDriver<'a> {
    source: &'a dyn PageSource,
    base: ResourcePath,
    config: PaginationConfig,
    pacing: Pacing,
}

impl<'a> PaginationDriver<'a> {
    /// Create a driver fetching from `source` under the API `base`
    pub fn new(source: &'a dyn PageSource, base: ResourcePath) -> Self {
        let config = PaginationConfig::default();
        Self {
            source,
            base,
            pacing: Pacing::new(config.cooldown),
            config,
        }
    }

    /// Set page bounds and cooldown
    #[must_use]
    pub fn with_config(mut self, config: PaginationConfig) -> Self {
        self.pacing = self.pacing.with_cooldown(config.cooldown);
        self.config = config;
        self
    }

    /// Replace the pacer used for the cooldown
    #[must_use]
    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacing = self.pacing.with_pacer(pacer);
        self
    }

    /// Stop gracefully between pages once `token` is cancelled
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.pacing = self.pacing.with_cancellation(token);
        self
    }

    /// The active configuration
    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Reject budgets and page sizes the provider would refuse
    fn check_preconditions(&self, request: &PageRequest, budget: FetchBudget) -> Result<()> {
        self.config.validate()?;

        match budget {
            FetchBudget::Items(target) if target < self.config.min_page_size => {
                Err(Error::invalid_value(
                    "target",
                    format!(
                        "must be at least {}, got {target}",
                        self.config.min_page_size
                    ),
                ))
            }
            FetchBudget::Items(_) => Ok(()),
            FetchBudget::Pages(_) | FetchBudget::Unbounded => {
                let size = request.page_size;
                if size < self.config.min_page_size || size > self.config.max_page_size {
                    return Err(Error::invalid_value(
                        "max_results",
                        format!(
                            "must be within {}..={}, got {size}",
                            self.config.min_page_size, self.config.max_page_size
                        ),
                    ));
                }
                Ok(())
            }
        }
    }

    /// Run the loop and collect results per `mode`
    ///
    /// At least one fetch is always issued; a zero page budget discards it.
    /// With an item target the page
    /// size shrinks to the remaining count and the flattened result is cut
    /// at the target. Errors abandon everything gathered so far.
    pub async fn run(
        &self,
        request: PageRequest,
        budget: FetchBudget,
        mode: AggregationMode,
    ) -> Result<PaginationOutcome> {
        self.check_preconditions(&request, budget)?;

        let path = self.base.search(request.endpoint);
        let mut request = request;
        if let FetchBudget::Items(target) = budget {
            request.page_size = self.config.clamp_page_size(i64::from(target));
        }

        let mut state = PaginationState::new(budget, request.cursor.clone());
        let mut collected = Collected::new(mode);
        let keep_pages = budget != FetchBudget::Pages(0);

        let stop_reason = loop {
            request.cursor.clone_from(&state.cursor);
            let page = Page::new(self.source.fetch(&path, &request.to_params()).await?);
            let item_count = page.item_count();
            state.record_page(budget, item_count);

            debug!(
                "Page {}: {} items (max_results={}, remaining={:?})",
                state.pages_fetched, item_count, request.page_size, state.remaining
            );

            let next = next_step(page.next_token(), state.remaining, item_count);
            if keep_pages && item_count > 0 {
                collected.push(page);
            }

            match next {
                NextPage::Done(reason) => break reason,
                NextPage::Continue { cursor } => {
                    if !self.pacing.between_pages().await {
                        break StopReason::Cancelled;
                    }
                    state.cursor = Some(cursor);
                    if let (FetchBudget::Items(_), Some(left)) = (budget, state.remaining) {
                        request.page_size = self.config.clamp_page_size(left);
                    }
                }
            }
        };

        if let FetchBudget::Items(target) = budget {
            collected.truncate_items(target as usize);
        }

        info!(
            "Pagination finished after {} page(s), {} item(s): {:?}",
            state.pages_fetched, state.items_fetched, stop_reason
        );

        Ok(PaginationOutcome {
            collected,
            pages_fetched: state.pages_fetched,
            items_fetched: state.items_fetched,
            stop_reason,
        })
    }
}

impl std::fmt::Debug for PaginationDriver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationDriver")
            .field("base", &self.base)
            .field("config", &self.config)
            .field("pacing", &self.pacing)
            .finish_non_exhaustive()
    }
}

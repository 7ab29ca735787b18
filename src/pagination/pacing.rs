//! Pauses between consecutive fetches
//!
//! The provider rate-limits per window, so a run waits a fixed cooldown
//! between two fetches. There is no backoff: the delay never changes.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Waits for a given delay
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Block the current task for `delay`
    async fn pause(&self, delay: Duration);
}

/// Real-time pacer backed by `tokio::time::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Cooldown, pacer and optional cancellation for one driver
#[derive(Clone)]
pub struct Pacing {
    cooldown: Duration,
    pacer: Arc<dyn Pacer>,
    cancel: Option<CancellationToken>,
}

impl Pacing {
    /// Real-time pacing with the given cooldown
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            pacer: Arc::new(TokioPacer),
            cancel: None,
        }
    }

    /// Replace the cooldown
    #[must_use]
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Replace the pacer
    #[must_use]
    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    /// Watch a cancellation token between pages
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The configured cooldown
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Whether the run has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    /// Wait out the cooldown before the next fetch
    ///
    /// Returns `false` when the run was cancelled before or during the wait,
    /// in which case the next fetch must not be issued.
    pub async fn between_pages(&self) -> bool {
        if self.is_cancelled() {
            return false;
        }

        match &self.cancel {
            Some(token) => {
                tokio::select! {
                    () = self.pacer.pause(self.cooldown) => {}
                    () = token.cancelled() => return false,
                }
            }
            None => self.pacer.pause(self.cooldown).await,
        }

        !self.is_cancelled()
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

impl std::fmt::Debug for Pacing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pacing")
            .field("cooldown", &self.cooldown)
            .field("cancellable", &self.cancel.is_some())
            .finish_non_exhaustive()
    }
}

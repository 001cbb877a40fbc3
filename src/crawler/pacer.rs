//! Request pacing against the upstream catalog
//!
//! Every fetch after the first one in a run waits out a fixed delay, no
//! matter which category or page it belongs to. The wait goes through a
//! [`Sleeper`] so tests can observe pauses without waiting for them.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Something that can pause the calling task
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Spaces consecutive upstream fetches by a fixed delay
pub struct Pacer {
    delay: Duration,
    sleeper: Arc<dyn Sleeper>,
    fetches: u64,
    pauses: u64,
}

impl Pacer {
    /// Creates a pacer that sleeps on the tokio timer
    pub fn new(delay: Duration) -> Self {
        Self::with_sleeper(delay, Arc::new(TokioSleeper))
    }

    pub fn with_sleeper(delay: Duration, sleeper: Arc<dyn Sleeper>) -> Self {
        Self {
            delay,
            sleeper,
            fetches: 0,
            pauses: 0,
        }
    }

    /// Waits until the next fetch may be sent
    ///
    /// The first call returns immediately; each later call pauses for the
    /// full delay before returning.
    pub async fn before_fetch(&mut self) {
        if self.fetches > 0 {
            tracing::trace!("Pacing next fetch by {:?}", self.delay);
            self.sleeper.sleep(self.delay).await;
            self.pauses += 1;
        }
        self.fetches += 1;
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of fetches released so far
    pub fn fetches(&self) -> u64 {
        self.fetches
    }

    /// Number of pauses taken so far
    pub fn pauses(&self) -> u64 {
        self.pauses
    }
}

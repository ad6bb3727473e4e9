//! Fixed-interval cycle loop

use crate::cycle::Monitor;
use feedwatch_core::{CancellationFlag, CycleReport, SourceRegistry};
use std::sync::Arc;
use std::time::Duration;

const CANCEL_POLL: Duration = Duration::from_millis(200);

/// Runs a cycle over the registry every `interval` until cancelled.
///
/// Cycles never overlap: the next one starts `interval` after the previous
/// one finished.
pub struct Scheduler {
    registry: Arc<dyn SourceRegistry>,
    monitor: Arc<Monitor>,
    interval: Duration,
}

impl Scheduler {
    pub fn new(registry: Arc<dyn SourceRegistry>, monitor: Arc<Monitor>, interval: Duration) -> Self {
        Self {
            registry,
            monitor,
            interval,
        }
    }

    /// Run exactly one cycle with the current registry contents.
    ///
    /// A registry that cannot be read is an error; nothing is processed.
    pub async fn run_once(&self, cancel: &CancellationFlag) -> feedwatch_core::Result<CycleReport> {
        let sources = self.registry.list_sources()?;
        if sources.is_empty() {
            tracing::warn!("no channels configured");
        }
        Ok(self.monitor.run_cycle(&sources, cancel).await)
    }

    /// Loop until `cancel` is raised. Returns the number of completed cycles.
    pub async fn run(&self, cancel: &CancellationFlag) -> usize {
        tracing::info!(interval_secs = self.interval.as_secs(), "monitor started");
        let mut cycles = 0;

        while !cancel.is_cancelled() {
            match self.run_once(cancel).await {
                Ok(_) => cycles += 1,
                Err(e) => tracing::error!(error = %e, "could not read channel registry"),
            }

            if !self.wait(cancel).await {
                break;
            }
        }

        tracing::info!(cycles, "monitor stopped");
        cycles
    }

    /// Sleep for one interval. Returns false if cancelled meanwhile.
    async fn wait(&self, cancel: &CancellationFlag) -> bool {
        let deadline = tokio::time::sleep(self.interval);
        tokio::pin!(deadline);

        let mut poll = tokio::time::interval(CANCEL_POLL);
        poll.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = &mut deadline => return !cancel.is_cancelled(),
                _ = poll.tick() => {
                    if cancel.is_cancelled() {
                        return false;
                    }
                }
            }
        }
    }
}

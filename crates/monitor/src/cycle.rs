//! One monitoring cycle
//!
//! Sources are processed sequentially in registry order. Every source ends in
//! exactly one [`SourceOutcome`]; errors and panics raised while processing a
//! source are contained at the per-source boundary so the remaining sources
//! still run.

use feedwatch_cache::{decide, Decision, Ledger, ResolutionCache};
use feedwatch_core::{
    CancellationFlag, CycleReport, Delivery, FeedFetcher, Notification, Notifier, NotifyError,
    Platform, Result, SourceConfig, SourceOutcome, TargetProvider,
};
use feedwatch_utils::tracing::{cycle_span, source_span};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::Instrument;

/// Orchestrates resolution, fetching, change detection and notification
pub struct Monitor {
    platform: Platform,
    resolution: Arc<ResolutionCache>,
    ledger: Arc<Ledger>,
    fetcher: Arc<dyn FeedFetcher>,
    notifier: Arc<dyn Notifier>,
    targets: Arc<dyn TargetProvider>,
}

impl Monitor {
    pub fn new(
        resolution: Arc<ResolutionCache>,
        ledger: Arc<Ledger>,
        fetcher: Arc<dyn FeedFetcher>,
        notifier: Arc<dyn Notifier>,
        targets: Arc<dyn TargetProvider>,
    ) -> Self {
        Self {
            platform: Platform::YouTube,
            resolution,
            ledger,
            fetcher,
            notifier,
            targets,
        }
    }

    /// Process `sources` in order, stopping early if `cancel` is raised.
    ///
    /// Cancellation is only observed between sources. Ledger updates made
    /// before the stop are kept.
    pub async fn run_cycle(&self, sources: &[SourceConfig], cancel: &CancellationFlag) -> CycleReport {
        self.cycle(sources, cancel)
            .instrument(cycle_span(sources.len()))
            .await
    }

    async fn cycle(&self, sources: &[SourceConfig], cancel: &CancellationFlag) -> CycleReport {
        let mut report = CycleReport::begin();
        tracing::info!("checking for new uploads");

        for source in sources {
            if cancel.is_cancelled() {
                tracing::info!(
                    remaining = sources.len() - report.sources.len(),
                    "cycle cancelled"
                );
                report.cancelled = true;
                break;
            }

            let outcome = self
                .isolated(source)
                .instrument(source_span(&source.name))
                .await;
            tracing::debug!(source = %source.name, outcome = outcome.label(), "source done");
            report.push(source.name.clone(), outcome);
        }

        let report = report.finish();
        let summary = report.summary();
        tracing::info!(
            skipped = summary.skipped,
            first_seen = summary.first_seen,
            unchanged = summary.unchanged,
            notified = summary.notified,
            errored = summary.errored,
            "cycle finished"
        );
        report
    }

    async fn isolated(&self, source: &SourceConfig) -> SourceOutcome {
        match AssertUnwindSafe(self.process(source)).catch_unwind().await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => {
                tracing::error!(source = %source.name, error = %e, "source failed");
                SourceOutcome::Errored {
                    message: e.to_string(),
                }
            }
            Err(panic) => {
                let message = format!("panicked: {}", panic_message(panic.as_ref()));
                tracing::error!(source = %source.name, %message, "source failed");
                SourceOutcome::Errored { message }
            }
        }
    }

    async fn process(&self, source: &SourceConfig) -> Result<SourceOutcome> {
        let key = &source.notification_target_key;
        let Some(target_url) = self.targets.target_url(key) else {
            tracing::warn!(target_key = %key, "webhook not configured, skipping");
            return Ok(SourceOutcome::SkippedNoTarget {
                target_key: key.clone(),
            });
        };

        let channel_id = match self.resolution.resolve(&source.source_reference).await {
            Ok(id) => id,
            Err(e) if e.is_resolution_failure() => {
                tracing::warn!(reference = %source.source_reference, error = %e, "could not resolve channel");
                return Ok(SourceOutcome::SkippedUnresolved {
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        };

        let item = match self.fetcher.fetch_latest(&channel_id).await {
            Ok(Some(item)) => item,
            Ok(None) => {
                tracing::info!(channel_id = %channel_id, "no uploads in feed");
                return Ok(SourceOutcome::SkippedNoData);
            }
            Err(e) if e.is_fetch_unavailable() => {
                tracing::warn!(channel_id = %channel_id, error = %e, "feed unavailable");
                return Ok(SourceOutcome::SkippedNoData);
            }
            Err(e) => return Err(e),
        };

        let previous = self.ledger.get_one(self.platform, &source.source_reference);
        match decide(previous.as_deref(), &item.item_id) {
            Decision::FirstObservation => {
                self.ledger
                    .record(self.platform, &source.source_reference, &item.item_id)?;
                tracing::info!(item_id = %item.item_id, "first observation recorded, not notifying");
                Ok(SourceOutcome::FirstSeen {
                    item_id: item.item_id,
                })
            }
            Decision::Unchanged => {
                tracing::debug!(item_id = %item.item_id, "no new upload");
                Ok(SourceOutcome::Unchanged {
                    item_id: item.item_id,
                })
            }
            Decision::NewItem { previous } => {
                tracing::info!(previous = %previous, item_id = %item.item_id, title = %item.title, "new upload");
                let notification = Notification::for_item(source, &item, target_url);
                let delivery = self.deliver(&notification).await;

                // The ledger advances whatever the delivery outcome
                self.ledger
                    .record(self.platform, &source.source_reference, &item.item_id)?;
                Ok(SourceOutcome::Notified {
                    item_id: item.item_id,
                    delivery,
                })
            }
        }
    }

    async fn deliver(&self, notification: &Notification) -> Delivery {
        match self.notifier.send(notification).await {
            Ok(()) => {
                tracing::info!(item_id = %notification.item_id, "notification sent");
                Delivery::Delivered
            }
            Err(e @ NotifyError::RateLimited { .. }) => {
                tracing::warn!(error = %e, "notification not sent");
                Delivery::RateLimited
            }
            Err(e) => {
                tracing::error!(error = %e, "notification not sent");
                Delivery::Failed(e.to_string())
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

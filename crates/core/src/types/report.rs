//! Per-source outcomes and the cycle report

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::{self, Display};

/// What happened to a notification attempt for a new item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum Delivery {
    Delivered,
    RateLimited,
    Failed(String),
}

/// Terminal state of one source within one cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SourceOutcome {
    /// The notification target key did not resolve to a URL
    SkippedNoTarget { target_key: String },
    /// The source reference could not be turned into a stable id
    SkippedUnresolved { reason: String },
    /// The feed was empty or unreachable
    SkippedNoData,
    /// First item ever recorded for this source; nothing was sent
    FirstSeen { item_id: String },
    /// The latest item matches the ledger
    Unchanged { item_id: String },
    /// A new item was announced and the ledger advanced
    Notified { item_id: String, delivery: Delivery },
    /// Something unexpected went wrong; sibling sources were unaffected
    Errored { message: String },
}

impl SourceOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            SourceOutcome::SkippedNoTarget { .. } => "skipped_no_target",
            SourceOutcome::SkippedUnresolved { .. } => "skipped_unresolved",
            SourceOutcome::SkippedNoData => "skipped_no_data",
            SourceOutcome::FirstSeen { .. } => "first_seen",
            SourceOutcome::Unchanged { .. } => "unchanged",
            SourceOutcome::Notified { .. } => "notified",
            SourceOutcome::Errored { .. } => "errored",
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            SourceOutcome::SkippedNoTarget { .. }
                | SourceOutcome::SkippedUnresolved { .. }
                | SourceOutcome::SkippedNoData
        )
    }
}

impl Display for SourceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceOutcome::SkippedNoTarget { target_key } => {
                write!(f, "skipped: missing webhook '{target_key}'")
            }
            SourceOutcome::SkippedUnresolved { reason } => write!(f, "skipped: {reason}"),
            SourceOutcome::SkippedNoData => write!(f, "skipped: no feed data"),
            SourceOutcome::FirstSeen { item_id } => write!(f, "first seen {item_id}"),
            SourceOutcome::Unchanged { item_id } => write!(f, "unchanged ({item_id})"),
            SourceOutcome::Notified { item_id, delivery } => match delivery {
                Delivery::Delivered => write!(f, "notified {item_id}"),
                Delivery::RateLimited => write!(f, "new item {item_id}, webhook rate limited"),
                Delivery::Failed(reason) => write!(f, "new item {item_id}, delivery failed: {reason}"),
            },
            SourceOutcome::Errored { message } => write!(f, "error: {message}"),
        }
    }
}

/// Outcome for one named source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub name: String,
    pub outcome: SourceOutcome,
}

/// Counts of terminal states in a cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CycleSummary {
    pub skipped: usize,
    pub first_seen: usize,
    pub unchanged: usize,
    pub notified: usize,
    pub errored: usize,
}

/// Result of one pass over the tracked sources
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub sources: Vec<SourceReport>,
    /// True when cancellation stopped the cycle before every source ran
    pub cancelled: bool,
}

impl CycleReport {
    pub fn begin() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            sources: Vec::new(),
            cancelled: false,
        }
    }

    pub fn push(&mut self, name: impl Into<String>, outcome: SourceOutcome) {
        self.sources.push(SourceReport {
            name: name.into(),
            outcome,
        });
    }

    pub fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }

    /// Outcome recorded for the source with this name
    pub fn outcome_of(&self, name: &str) -> Option<&SourceOutcome> {
        self.sources
            .iter()
            .find(|report| report.name == name)
            .map(|report| &report.outcome)
    }

    pub fn summary(&self) -> CycleSummary {
        let mut summary = CycleSummary::default();
        for report in &self.sources {
            match report.outcome {
                SourceOutcome::FirstSeen { .. } => summary.first_seen += 1,
                SourceOutcome::Unchanged { .. } => summary.unchanged += 1,
                SourceOutcome::Notified { .. } => summary.notified += 1,
                SourceOutcome::Errored { .. } => summary.errored += 1,
                _ => summary.skipped += 1,
            }
        }
        summary
    }
}

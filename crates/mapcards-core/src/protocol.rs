//! Message contract between the collection pipeline and its collaborators.
//!
//! Commands are tagged by `action`, mirroring the extension runtime's
//! message shape, so a JSON bridge can forward them without translation.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::CanonicalRecord;

/// Accumulator lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollectionStatus {
    #[default]
    Idle,
    Collecting,
    Stopped,
}

impl std::fmt::Display for CollectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectionStatus::Idle => write!(f, "idle"),
            CollectionStatus::Collecting => write!(f, "collecting"),
            CollectionStatus::Stopped => write!(f, "stopped"),
        }
    }
}

/// Records extracted from one intercepted response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateBatch {
    pub records: Vec<CanonicalRecord>,
    pub source_url: String,
    pub timestamp: DateTime<Utc>,
}

/// Result of one `submitCandidates` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub accepted: usize,
    pub total: usize,
    pub limit: usize,
    pub limit_reached: bool,
}

/// Why an auto-scroll session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StopReason {
    /// The configured cycle ceiling was reached.
    CycleLimit,
    /// No new result elements appeared for the stall threshold.
    Stalled,
    /// The scroll target is within its bottom threshold.
    ReachedEnd,
    /// Stopped by an explicit command.
    Requested,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::CycleLimit => write!(f, "cycle limit reached"),
            StopReason::Stalled => write!(f, "no new items"),
            StopReason::ReachedEnd => write!(f, "reached end of results"),
            StopReason::Requested => write!(f, "stop requested"),
        }
    }
}

/// Informational status emitted by the scroll driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollStatus {
    pub active: bool,
    pub scroll_count: u32,
    pub item_count: usize,
    /// Set only on the final, inactive status of a session.
    pub stop_reason: Option<StopReason>,
}

/// Pacing for one auto-scroll session.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollOptions {
    /// Delay between cycles.
    pub interval: Duration,
    pub max_cycles: u32,
    /// Consecutive no-growth cycles before stopping.
    pub stall_threshold: u32,
    /// Sub-steps each cycle's scroll is split into.
    pub steps: u32,
    pub step_interval: Duration,
    /// Fraction of the viewport height scrolled per cycle.
    pub scroll_fraction: f64,
    /// Near-bottom threshold in pixels when a results container was found.
    pub container_end_threshold: f64,
    /// Near-bottom threshold in pixels when scrolling the whole document.
    pub document_end_threshold: f64,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            max_cycles: 50,
            stall_threshold: 8,
            steps: 4,
            step_interval: Duration::from_millis(200),
            scroll_fraction: 0.6,
            container_end_threshold: 50.0,
            document_end_threshold: 100.0,
        }
    }
}

impl ScrollOptions {
    /// Applies caller overrides from a `startAutoScroll` command.
    #[must_use]
    pub fn with_overrides(&self, interval_seconds: Option<u64>, max_cycles: Option<u32>) -> Self {
        let mut options = self.clone();
        if let Some(secs) = interval_seconds.filter(|s| *s > 0) {
            options.interval = Duration::from_secs(secs);
        }
        if let Some(cycles) = max_cycles.filter(|c| *c > 0) {
            options.max_cycles = cycles;
        }
        options
    }
}

/// Commands accepted by the background dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    StartCollection,
    StopCollection,
    GetCollectedData,
    SubmitCandidates {
        records: Vec<CanonicalRecord>,
        source_url: String,
        timestamp: DateTime<Utc>,
    },
    ClearData,
    SetCollectionLimit {
        #[serde(default)]
        limit: Option<usize>,
    },
    GetCollectionLimit,
    StartAutoScroll {
        #[serde(default)]
        interval_seconds: Option<u64>,
        #[serde(default)]
        max_cycles: Option<u32>,
    },
    StopAutoScroll,
    ScrollStatusChanged {
        status: ScrollStatus,
    },
    GetAutoScrollStatus,
    RequestExport,
}

impl From<CandidateBatch> for Command {
    fn from(batch: CandidateBatch) -> Self {
        Command::SubmitCandidates {
            records: batch.records,
            source_url: batch.source_url,
            timestamp: batch.timestamp,
        }
    }
}

/// Replies produced by the background dispatcher, one per command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Reply {
    Started,
    Stopped {
        data_count: usize,
    },
    CollectedData {
        records: Vec<CanonicalRecord>,
        collection_status: CollectionStatus,
    },
    Added(SubmitOutcome),
    Cleared,
    LimitUpdated {
        limit: usize,
    },
    Limit {
        limit: usize,
    },
    ScrollStarted {
        changed: bool,
    },
    ScrollStopped {
        changed: bool,
    },
    ScrollStatus(ScrollStatus),
    Updated,
    Exported {
        path: Option<String>,
        count: usize,
    },
    Failed {
        reason: String,
    },
}

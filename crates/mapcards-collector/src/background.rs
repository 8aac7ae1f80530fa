//! Background dispatcher.
//!
//! One tokio task owns the [`Accumulator`] and the last known scroll status.
//! Everything else talks to it through [`BackgroundHandle`], sending
//! [`Command`]s and receiving one [`Reply`] each.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use mapcards_core::{
    AppConfig, CandidateBatch, CandidateSink, CollectionStatus, Command, Reply, ScrollControl,
    ScrollOptions, ScrollStatus, TransportError,
};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::accumulator::Accumulator;
use crate::error::CollectorError;
use crate::export::write_export;

/// Settings for a dispatcher instance.
#[derive(Debug, Clone)]
pub struct BackgroundConfig {
    /// Initial limit, and the fallback for a missing or zero `setCollectionLimit`.
    pub collection_limit: usize,
    /// Pacing applied to `startAutoScroll` fields the caller leaves out.
    pub scroll_options: ScrollOptions,
    pub export_dir: PathBuf,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            collection_limit: 500,
            scroll_options: ScrollOptions::default(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl BackgroundConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            collection_limit: config.collection_limit,
            scroll_options: config.scroll_options(),
            export_dir: config.export_dir.clone(),
        }
    }
}

struct Envelope {
    command: Command,
    reply_tx: Option<oneshot::Sender<Reply>>,
}

/// Cloneable sender side of the dispatcher.
#[derive(Clone)]
pub struct BackgroundHandle {
    tx: mpsc::UnboundedSender<Envelope>,
}

impl BackgroundHandle {
    /// Sends a command and waits for its reply.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::Closed`] if the dispatcher task has exited.
    pub async fn send(&self, command: Command) -> Result<Reply, CollectorError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Envelope {
                command,
                reply_tx: Some(reply_tx),
            })
            .map_err(|_| CollectorError::Closed)?;
        reply_rx.await.map_err(|_| CollectorError::Closed)
    }

    /// Enqueues a command without waiting for the reply.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::Closed`] if the dispatcher task has exited.
    pub fn post(&self, command: Command) -> Result<(), CollectorError> {
        self.tx
            .send(Envelope {
                command,
                reply_tx: None,
            })
            .map_err(|_| CollectorError::Closed)
    }
}

impl CandidateSink for BackgroundHandle {
    fn deliver(&self, batch: CandidateBatch) -> Result<(), TransportError> {
        self.post(batch.into()).map_err(|_| TransportError::Closed)
    }
}

/// Spawns the dispatcher. The task ends once every handle is dropped.
///
/// Must be called from within a tokio runtime.
#[must_use]
pub fn spawn_background(
    config: BackgroundConfig,
    scroll: Option<Arc<dyn ScrollControl>>,
) -> (BackgroundHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<Envelope>();
    let mut dispatcher = Dispatcher {
        accumulator: Accumulator::new(config.collection_limit),
        scroll_status: ScrollStatus::default(),
        scroll,
        config,
    };

    let handle = tokio::spawn(async move {
        while let Some(Envelope { command, reply_tx }) = rx.recv().await {
            let reply = dispatcher.handle(command).await;
            if let Some(reply_tx) = reply_tx {
                // The caller may have stopped waiting.
                let _ = reply_tx.send(reply);
            }
        }
        tracing::debug!("background dispatcher stopped");
    });

    (BackgroundHandle { tx }, handle)
}

/// Relays scroll driver status events into the dispatcher.
#[must_use]
pub fn spawn_status_forwarder(
    mut status_rx: mpsc::UnboundedReceiver<ScrollStatus>,
    handle: BackgroundHandle,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(status) = status_rx.recv().await {
            if handle.post(Command::ScrollStatusChanged { status }).is_err() {
                break;
            }
        }
    })
}

struct Dispatcher {
    accumulator: Accumulator,
    scroll_status: ScrollStatus,
    scroll: Option<Arc<dyn ScrollControl>>,
    config: BackgroundConfig,
}

impl Dispatcher {
    async fn handle(&mut self, command: Command) -> Reply {
        match command {
            Command::StartCollection => {
                self.accumulator.start();
                tracing::info!(limit = self.accumulator.limit(), "collection started");
                Reply::Started
            }
            Command::StopCollection => {
                let data_count = self.accumulator.stop();
                tracing::info!(count = data_count, "collection stopped");
                Reply::Stopped { data_count }
            }
            Command::GetCollectedData => Reply::CollectedData {
                records: self.accumulator.records().to_vec(),
                collection_status: self.accumulator.status(),
            },
            Command::SubmitCandidates {
                records,
                source_url,
                ..
            } => {
                let offered = records.len();
                let was_collecting = self.accumulator.status() == CollectionStatus::Collecting;
                let outcome = self.accumulator.submit(records);
                tracing::debug!(
                    url = %source_url,
                    offered,
                    accepted = outcome.accepted,
                    total = outcome.total,
                    "candidates submitted"
                );
                if was_collecting && outcome.limit_reached {
                    self.stop_scrolling();
                }
                Reply::Added(outcome)
            }
            Command::ClearData => {
                self.accumulator.clear();
                Reply::Cleared
            }
            Command::SetCollectionLimit { limit } => {
                let limit = limit
                    .filter(|l| *l > 0)
                    .unwrap_or(self.config.collection_limit);
                self.accumulator.set_limit(limit);
                tracing::info!(limit, "collection limit updated");
                Reply::LimitUpdated { limit }
            }
            Command::GetCollectionLimit => Reply::Limit {
                limit: self.accumulator.limit(),
            },
            Command::StartAutoScroll {
                interval_seconds,
                max_cycles,
            } => {
                let options = self
                    .config
                    .scroll_options
                    .with_overrides(interval_seconds, max_cycles);
                match &self.scroll {
                    Some(scroll) => Reply::ScrollStarted {
                        changed: scroll.start(options),
                    },
                    None => no_scroll_driver(),
                }
            }
            Command::StopAutoScroll => match &self.scroll {
                Some(scroll) => Reply::ScrollStopped {
                    changed: scroll.stop(),
                },
                None => no_scroll_driver(),
            },
            Command::ScrollStatusChanged { status } => {
                self.scroll_status = status;
                Reply::Updated
            }
            Command::GetAutoScrollStatus => Reply::ScrollStatus(self.scroll_status),
            Command::RequestExport => self.export().await,
        }
    }

    fn stop_scrolling(&self) {
        if let Some(scroll) = &self.scroll {
            if scroll.stop() {
                tracing::info!("auto-scroll stopped at collection limit");
            }
        }
    }

    async fn export(&self) -> Reply {
        let records = self.accumulator.records();
        match write_export(
            &self.config.export_dir,
            records,
            self.accumulator.limit(),
            Utc::now(),
        )
        .await
        {
            Ok(path) => Reply::Exported {
                path: path.map(|p| p.display().to_string()),
                count: records.len(),
            },
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                Reply::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

fn no_scroll_driver() -> Reply {
    tracing::warn!("no scroll driver attached");
    Reply::Failed {
        reason: "no scroll driver attached".to_owned(),
    }
}

#[cfg(test)]
#[path = "background_test.rs"]
mod tests;

//! Seams between the page-side pipeline and the background context.

use thiserror::Error;

use crate::protocol::{CandidateBatch, ScrollOptions};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport channel is closed")]
    Closed,
}

/// Destination for extracted candidate batches.
///
/// Delivery must not block: interception callbacks call this inline.
pub trait CandidateSink: Send + Sync {
    /// Hands a batch to the background context.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Closed`] when the receiving side is gone.
    fn deliver(&self, batch: CandidateBatch) -> Result<(), TransportError>;
}

/// Start/stop control over an auto-scroll actor.
pub trait ScrollControl: Send + Sync {
    /// Starts a session; returns `false` if one was already running.
    fn start(&self, options: ScrollOptions) -> bool;

    /// Stops the running session; returns `false` if none was active.
    fn stop(&self) -> bool;
}

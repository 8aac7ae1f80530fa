//! Response interception.
//!
//! [`Interceptor`] decides which responses to inspect, parses their bodies,
//! runs the extractor, and forwards non-empty batches to a
//! [`CandidateSink`]. Nothing here can fail outward: unparseable bodies and
//! a missing or closed transport degrade to "nothing collected".

mod client;
mod relevance;
mod xhr;

use std::sync::Arc;

use chrono::Utc;
use mapcards_core::{CandidateBatch, CandidateSink};
use serde_json::Value;

use crate::extract::extract_records;

pub use client::{InterceptedResponse, InterceptingClient};
pub use relevance::is_relevant_url;
pub use xhr::{wrap_onload, XhrLoad};

/// Prefixes some endpoints put before JSON to defeat script inclusion.
const JSON_GUARD_PREFIXES: [&str; 3] = [")]}'", "for(;;);", "while(1);"];

pub struct Interceptor {
    sink: Option<Arc<dyn CandidateSink>>,
}

impl Interceptor {
    /// Creates an interceptor forwarding batches to `sink`.
    ///
    /// Without a sink extraction still runs but nothing is collected; this is
    /// logged once as a warning.
    #[must_use]
    pub fn new(sink: Option<Arc<dyn CandidateSink>>) -> Self {
        if sink.is_none() {
            tracing::warn!("no transport to the collector; extracted records will be discarded");
        }
        Self { sink }
    }

    /// Inspects a response body if `url` passes the relevance filter.
    ///
    /// Returns the number of records extracted.
    pub fn observe(&self, url: &str, body: &[u8]) -> usize {
        if !is_relevant_url(url) {
            return 0;
        }
        tracing::debug!(url, "inspecting relevant response");
        self.inspect_body(url, body)
    }

    /// Text variant of [`Interceptor::observe`] for callback-style sources.
    pub fn observe_text(&self, url: &str, text: &str) -> usize {
        if !is_relevant_url(url) {
            return 0;
        }
        match parse_text(text) {
            Some(value) => self.inspect_value(url, &value),
            None => 0,
        }
    }

    /// Inspects a body without the relevance filter.
    pub fn inspect_body(&self, url: &str, body: &[u8]) -> usize {
        match parse_body(body) {
            Some(value) => self.inspect_value(url, &value),
            None => {
                tracing::trace!(url, "response body is not JSON");
                0
            }
        }
    }

    /// Runs the extractor on an already-parsed body and forwards the result.
    pub fn inspect_value(&self, url: &str, value: &Value) -> usize {
        let records = extract_records(value, url);
        let count = records.len();
        if count == 0 {
            return 0;
        }

        tracing::debug!(url, count, "intercepted records");
        if let Some(sink) = &self.sink {
            let batch = CandidateBatch {
                records,
                source_url: url.to_owned(),
                timestamp: Utc::now(),
            };
            if let Err(e) = sink.deliver(batch) {
                tracing::warn!(url, count, error = %e, "dropping intercepted records");
            }
        }
        count
    }
}

/// Strict JSON first, then a lenient pass over the decoded text.
fn parse_body(body: &[u8]) -> Option<Value> {
    serde_json::from_slice(body)
        .ok()
        .or_else(|| parse_text(&String::from_utf8_lossy(body)))
}

fn parse_text(text: &str) -> Option<Value> {
    let mut text = text.trim_start_matches('\u{feff}').trim_start();
    for guard in JSON_GUARD_PREFIXES {
        if let Some(rest) = text.strip_prefix(guard) {
            text = rest.trim_start();
            break;
        }
    }
    serde_json::from_str(text.trim_end()).ok()
}

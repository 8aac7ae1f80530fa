//! In-memory collection session: identity-by-id deduplication under a
//! capacity ceiling.

use std::collections::HashSet;

use mapcards_core::{CanonicalRecord, CollectionStatus, SubmitOutcome};

/// Owns the session state. Mutated only through its own methods; the
/// background dispatcher is its single owner.
#[derive(Debug, Clone)]
pub struct Accumulator {
    status: CollectionStatus,
    limit: usize,
    records: Vec<CanonicalRecord>,
    known_ids: HashSet<String>,
}

impl Accumulator {
    /// Creates an idle, empty session. A zero `limit` is raised to 1.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            status: CollectionStatus::Idle,
            limit: limit.max(1),
            records: Vec::new(),
            known_ids: HashSet::new(),
        }
    }

    #[must_use]
    pub fn status(&self) -> CollectionStatus {
        self.status
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Begins a fresh session from any state.
    pub fn start(&mut self) {
        self.reset_records();
        self.status = CollectionStatus::Collecting;
    }

    /// Stops collecting and returns the number of records kept.
    pub fn stop(&mut self) -> usize {
        self.status = CollectionStatus::Stopped;
        self.records.len()
    }

    /// Empties the buffer and returns to idle from any state.
    pub fn clear(&mut self) {
        self.reset_records();
        self.status = CollectionStatus::Idle;
    }

    /// Takes effect on the next capacity check. A zero `limit` is raised to 1.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
    }

    /// Admits candidates in order until the slots free at entry are used up.
    ///
    /// Candidates whose `id` is already stored, or was admitted earlier in
    /// this call, are skipped. Candidates without an `id` always pass the
    /// identity check. Reaching the limit moves the session to `stopped`.
    /// Outside `collecting` nothing is admitted.
    pub fn submit(&mut self, candidates: Vec<CanonicalRecord>) -> SubmitOutcome {
        if self.status != CollectionStatus::Collecting {
            return self.outcome(0);
        }

        let remaining = self.limit.saturating_sub(self.records.len());
        let mut accepted = 0;
        for record in candidates {
            if accepted == remaining {
                break;
            }
            if !record.is_identifiable() {
                tracing::debug!("skipping record without title or id");
                continue;
            }
            if let Some(id) = record.id.as_deref().filter(|id| !id.is_empty()) {
                if !self.known_ids.insert(id.to_owned()) {
                    continue;
                }
            }
            self.records.push(record);
            accepted += 1;
        }

        if self.records.len() >= self.limit {
            self.status = CollectionStatus::Stopped;
            tracing::info!(
                total = self.records.len(),
                limit = self.limit,
                "collection limit reached"
            );
        }
        self.outcome(accepted)
    }

    fn outcome(&self, accepted: usize) -> SubmitOutcome {
        SubmitOutcome {
            accepted,
            total: self.records.len(),
            limit: self.limit,
            limit_reached: self.records.len() >= self.limit,
        }
    }

    fn reset_records(&mut self) {
        self.records.clear();
        self.known_ids.clear();
    }
}

#[cfg(test)]
#[path = "accumulator_test.rs"]
mod tests;

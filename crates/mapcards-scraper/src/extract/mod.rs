//! Heuristic extraction of business records from intercepted JSON payloads.
//!
//! Two independent passes walk the payload: a structural pass that looks for
//! tagged or rated objects, and a keyword pass that matches medical/clinic
//! vocabulary in names. Both may report the same object; deduplication is
//! left to the accumulator.

mod fields;
mod keyword;
mod normalize;
mod structural;

use chrono::{DateTime, Utc};
use mapcards_core::CanonicalRecord;
use serde_json::Value;

pub use normalize::process_business_object;

/// Extract canonical records from a parsed response body.
///
/// Pure apart from the timestamp; malformed or unrelated payloads yield an
/// empty vector.
#[must_use]
pub fn extract_records(body: &Value, source_url: &str) -> Vec<CanonicalRecord> {
    extract_records_at(body, source_url, Utc::now())
}

/// Same as [`extract_records`] with an explicit collection timestamp.
#[must_use]
pub fn extract_records_at(
    body: &Value,
    source_url: &str,
    collected_at: DateTime<Utc>,
) -> Vec<CanonicalRecord> {
    let mut candidates = Vec::new();
    structural::find_business_objects(body, &mut candidates);
    let structural_hits = candidates.len();
    keyword::find_keyword_objects(body, &mut candidates);

    let records: Vec<CanonicalRecord> = candidates
        .into_iter()
        .filter_map(|candidate| process_business_object(candidate, source_url, collected_at))
        .collect();

    tracing::debug!(
        source_url,
        structural_hits,
        records = records.len(),
        "extracted records from response"
    );
    records
}

#[cfg(test)]
#[path = "../extract_test.rs"]
mod tests;

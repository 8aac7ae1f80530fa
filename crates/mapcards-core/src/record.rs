//! Canonical business record and its completeness score.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rating summary attached to a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingData {
    pub rating_value: Option<f64>,
    pub review_count: Option<u64>,
    pub rating_count: Option<u64>,
}

/// A normalized business listing extracted from a map-search payload.
///
/// Absent optionals serialize as explicit `null` so exports stay lossless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRecord {
    /// Provider-assigned identifier; the sole deduplication key.
    pub id: Option<String>,
    pub title: Option<String>,
    pub short_title: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    /// Coordinate pair in the order the source delivered it.
    pub coordinates: Option<[f64; 2]>,
    pub display_coordinates: Option<[f64; 2]>,
    pub rating_data: Option<RatingData>,
    pub categories: Option<Vec<String>>,
    pub phones: Option<Vec<String>>,
    /// Opaque schedule structure, passed through unmodified.
    pub working_hours: Option<serde_json::Value>,
    pub uri: Option<String>,
    pub url: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub source_url: String,
    pub collected_at: DateTime<Utc>,
    /// Per-extraction correlation id. Not part of record identity.
    pub request_id: Option<String>,
    #[serde(default)]
    pub data_quality: f64,
    /// Additional provider fields copied verbatim.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, serde_json::Value>,
}

impl CanonicalRecord {
    /// Creates an empty record stamped with its origin.
    #[must_use]
    pub fn new(source_url: impl Into<String>, collected_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title: None,
            short_title: None,
            description: None,
            address: None,
            coordinates: None,
            display_coordinates: None,
            rating_data: None,
            categories: None,
            phones: None,
            working_hours: None,
            uri: None,
            url: None,
            website: None,
            source_url: source_url.into(),
            collected_at,
            request_id: None,
            data_quality: 0.0,
            extras: BTreeMap::new(),
        }
    }

    /// A record is admissible when it has a non-empty title or an id.
    #[must_use]
    pub fn is_identifiable(&self) -> bool {
        let has_title = self.title.as_deref().is_some_and(|t| !t.trim().is_empty());
        let has_id = self.id.as_deref().is_some_and(|id| !id.is_empty());
        has_title || has_id
    }

    /// A zero (or NaN) rating value counts as no rating.
    #[must_use]
    pub fn has_rating(&self) -> bool {
        self.rating_data
            .as_ref()
            .and_then(|r| r.rating_value)
            .is_some_and(|v| v.abs() > 0.0)
    }

    #[must_use]
    pub fn has_reviews(&self) -> bool {
        self.rating_data
            .as_ref()
            .and_then(|r| r.review_count)
            .is_some_and(|n| n > 0)
    }

    #[must_use]
    pub fn has_address(&self) -> bool {
        text_len(self.address.as_deref()) > 5
    }

    #[must_use]
    pub fn has_phones(&self) -> bool {
        self.phones.as_ref().is_some_and(|p| !p.is_empty())
    }

    #[must_use]
    pub fn has_categories(&self) -> bool {
        self.categories.as_ref().is_some_and(|c| !c.is_empty())
    }
}

fn text_len(s: Option<&str>) -> usize {
    s.map_or(0, |s| s.chars().count())
}

/// Weights in hundredths so the sum is exact: title, address, rating,
/// reviews, coordinates, phones, categories.
const QUALITY_WEIGHTS: [u32; 7] = [20, 20, 15, 15, 10, 10, 10];

/// Weighted completeness score in `[0, 1]`.
///
/// Advisory only; never used to admit or reject a record.
#[must_use]
pub fn calculate_data_quality(record: &CanonicalRecord) -> f64 {
    let present = [
        text_len(record.title.as_deref()) > 2,
        record.has_address(),
        record.has_rating(),
        record.has_reviews(),
        record.coordinates.is_some(),
        record.has_phones(),
        record.has_categories(),
    ];

    let possible: u32 = QUALITY_WEIGHTS.iter().sum();
    let achieved: u32 = QUALITY_WEIGHTS
        .iter()
        .zip(present)
        .filter_map(|(weight, hit)| hit.then_some(*weight))
        .sum();

    if possible == 0 {
        return 0.0;
    }
    f64::from(achieved) / f64::from(possible)
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;

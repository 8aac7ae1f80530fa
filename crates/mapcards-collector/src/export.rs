//! Export document for a collected buffer.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use mapcards_core::{calculate_data_quality, CanonicalRecord};
use serde::Serialize;

use crate::error::CollectorError;

const REQUEST_CONTEXT: &str = "Collected by mapcards listing collector";
const REQUEST_QUERY: &str = "business cards data collection";
const DISPLAY_TYPE: &str = "multiple";

#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    pub data: ExportData,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub request_id: String,
    pub request_serp_id: String,
    pub request_context: String,
    pub request_query: String,
    pub display_type: String,
    pub total_result_count: usize,
    pub request_results: usize,
    pub collection_limit: usize,
    pub collection_stats: CollectionStats,
    pub items: Vec<CanonicalRecord>,
}

/// Field coverage counts over the exported items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub total_found: usize,
    pub with_rating: usize,
    pub with_reviews: usize,
    pub with_address: usize,
    pub with_coordinates: usize,
    pub with_phones: usize,
    pub with_categories: usize,
    pub with_working_hours: usize,
    /// Mean data quality as a percentage with one decimal, e.g. `"72.5%"`.
    pub average_data_quality: String,
}

impl CollectionStats {
    fn from_items(items: &[CanonicalRecord]) -> Self {
        let count = |pred: fn(&CanonicalRecord) -> bool| items.iter().filter(|r| pred(r)).count();

        let average_data_quality = if items.is_empty() {
            "0%".to_owned()
        } else {
            let sum: f64 = items.iter().map(|r| r.data_quality).sum();
            #[allow(clippy::cast_precision_loss)]
            let mean = sum / items.len() as f64;
            format!("{:.1}%", mean * 100.0)
        };

        Self {
            total_found: items.len(),
            with_rating: count(CanonicalRecord::has_rating),
            with_reviews: count(CanonicalRecord::has_reviews),
            with_address: count(CanonicalRecord::has_address),
            with_coordinates: count(|r| r.coordinates.is_some()),
            with_phones: count(CanonicalRecord::has_phones),
            with_categories: count(CanonicalRecord::has_categories),
            with_working_hours: count(|r| r.working_hours.as_ref().is_some_and(|h| !h.is_null())),
            average_data_quality,
        }
    }
}

/// Builds the export document. Quality is recomputed so exported scores
/// always agree with extraction-time scoring.
#[must_use]
pub fn build_export(
    records: &[CanonicalRecord],
    collection_limit: usize,
    now: DateTime<Utc>,
) -> ExportDocument {
    let items: Vec<CanonicalRecord> = records
        .iter()
        .map(|record| {
            let mut item = record.clone();
            item.data_quality = calculate_data_quality(&item);
            item
        })
        .collect();

    ExportDocument {
        data: ExportData {
            request_id: format!("mapcards-{}", now.timestamp_millis()),
            request_serp_id: format!("collector-{}", file_timestamp(now)),
            request_context: REQUEST_CONTEXT.to_owned(),
            request_query: REQUEST_QUERY.to_owned(),
            display_type: DISPLAY_TYPE.to_owned(),
            total_result_count: items.len(),
            request_results: items.len(),
            collection_limit,
            collection_stats: CollectionStats::from_items(&items),
            items,
        },
    }
}

/// `business_data_<timestamp>.json`, with `:` and `.` in the timestamp
/// replaced so the name is portable.
#[must_use]
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("business_data_{}.json", file_timestamp(now))
}

fn file_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H-%M-%S-%3fZ").to_string()
}

/// Writes the export for `records` into `dir`.
///
/// Returns `Ok(None)` without touching the filesystem when there is nothing
/// to export.
///
/// # Errors
///
/// Returns [`CollectorError::Serialize`] if the document cannot be encoded
/// and [`CollectorError::Io`] if the directory or file cannot be written.
pub async fn write_export(
    dir: &Path,
    records: &[CanonicalRecord],
    collection_limit: usize,
    now: DateTime<Utc>,
) -> Result<Option<PathBuf>, CollectorError> {
    if records.is_empty() {
        tracing::info!("nothing to export");
        return Ok(None);
    }

    let document = build_export(records, collection_limit, now);
    let bytes = serde_json::to_vec_pretty(&document)?;

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| CollectorError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    let path = dir.join(export_file_name(now));
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|source| CollectorError::Io {
            path: path.clone(),
            source,
        })?;

    tracing::info!(path = %path.display(), count = records.len(), "export written");
    Ok(Some(path))
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;

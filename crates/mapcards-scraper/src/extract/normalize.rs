//! Mapping of raw candidate objects onto [`CanonicalRecord`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use mapcards_core::{calculate_data_quality, CanonicalRecord, RatingData};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::fields::{
    coordinate_pair, count, first_present, first_text, identifier, number, present, string_list,
};

/// Provider fields copied verbatim into [`CanonicalRecord::extras`].
const EXTRA_KEYS: [&str; 10] = [
    "analyticsId",
    "logId",
    "bounds",
    "email",
    "socialNetworks",
    "priceLevel",
    "features",
    "services",
    "photos",
    "verified",
];

const CATEGORY_NAME_KEYS: [&str; 1] = ["name"];
const PHONE_TEXT_KEYS: [&str; 3] = ["formatted", "number", "value"];

/// Minimum title length (in characters) for a candidate to be kept.
const MIN_TITLE_CHARS: usize = 3;

/// Normalize a raw candidate object.
///
/// Returns `None` when the resolved title is shorter than three characters;
/// that is the only admission rule. The quality score is computed and
/// attached but never consulted here.
#[must_use]
pub fn process_business_object(
    obj: &Map<String, Value>,
    source_url: &str,
    collected_at: DateTime<Utc>,
) -> Option<CanonicalRecord> {
    let title = first_text(obj, &["title", "name"])?;
    if title.chars().count() < MIN_TITLE_CHARS {
        return None;
    }

    let mut record = CanonicalRecord::new(source_url, collected_at);
    record.id = present(obj, "id").and_then(identifier);
    record.title = Some(title);
    record.short_title = first_text(obj, &["shortTitle"]);
    record.description = first_text(obj, &["description"]);
    record.address = first_text(obj, &["address", "fullAddress"]);
    record.coordinates = first_coordinates(obj, &["coordinates", "displayCoordinates"]);
    record.display_coordinates = first_coordinates(obj, &["displayCoordinates", "coordinates"]);
    record.rating_data = rating_data(obj);
    record.categories =
        present(obj, "categories").and_then(|v| string_list(v, &CATEGORY_NAME_KEYS));
    record.phones = present(obj, "phones").and_then(|v| string_list(v, &PHONE_TEXT_KEYS));
    record.working_hours = present(obj, "workingHours").cloned();
    record.uri = first_text(obj, &["uri"]);
    record.url = first_text(obj, &["url"]);
    record.website = first_text(obj, &["website"]);
    record.request_id = Some(correlation_id(collected_at));
    record.extras = extras(obj);
    record.data_quality = calculate_data_quality(&record);

    Some(record)
}

fn first_coordinates(obj: &Map<String, Value>, keys: &[&str]) -> Option<[f64; 2]> {
    keys.iter()
        .filter_map(|key| present(obj, key))
        .find_map(coordinate_pair)
}

/// Nested `ratingData` wins; otherwise flat rating/review fields are folded
/// into the same shape.
fn rating_data(obj: &Map<String, Value>) -> Option<RatingData> {
    if let Some(Value::Object(nested)) = present(obj, "ratingData") {
        return Some(RatingData {
            rating_value: nested.get("ratingValue").and_then(number),
            review_count: nested.get("reviewCount").and_then(count),
            rating_count: nested.get("ratingCount").and_then(count),
        });
    }

    let has_flat = ["rating", "ratingValue", "reviewCount"]
        .iter()
        .any(|key| obj.contains_key(*key));
    if !has_flat {
        return None;
    }

    Some(RatingData {
        rating_value: first_present(obj, &["rating", "ratingValue"]).and_then(number),
        review_count: obj.get("reviewCount").and_then(count),
        rating_count: obj.get("ratingCount").and_then(count),
    })
}

fn extras(obj: &Map<String, Value>) -> BTreeMap<String, Value> {
    EXTRA_KEYS
        .iter()
        .filter_map(|key| present(obj, key).map(|v| ((*key).to_owned(), v.clone())))
        .collect()
}

fn correlation_id(collected_at: DateTime<Utc>) -> String {
    format!(
        "intercepted-{}-{}",
        collected_at.timestamp_millis(),
        Uuid::new_v4().simple()
    )
}

//! Keyword pass: rated objects whose name mentions clinic vocabulary.
//!
//! Some pages omit the `type` discriminator on business objects; they are
//! still recognisable by what they are called.

use serde_json::{Map, Value};

use super::fields::{any_present, first_present};

const MAX_DEPTH: usize = 8;

const NAME_KEYS: [&str; 3] = ["title", "name", "shortTitle"];
const RATING_KEYS: [&str; 3] = ["rating", "ratingData", "ratingValue"];
const REVIEW_KEYS: [&str; 2] = ["reviewCount", "reviews"];

/// Lower-case fragments; Cyrillic stems cover inflected forms.
const MEDICAL_KEYWORDS: [&str; 9] = [
    "клиник",
    "медицин",
    "больниц",
    "поликлиник",
    "центр",
    "doctor",
    "clinic",
    "medical",
    "hospital",
];

pub(super) fn find_keyword_objects<'a>(value: &'a Value, out: &mut Vec<&'a Map<String, Value>>) {
    visit(value, 0, out);
}

fn visit<'a>(value: &'a Value, depth: usize, out: &mut Vec<&'a Map<String, Value>>) {
    if depth > MAX_DEPTH {
        return;
    }

    match value {
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::Object(obj) => {
                        if is_keyword_candidate(obj) {
                            out.push(obj);
                        }
                        walk_fields(obj, depth + 1, out);
                    }
                    other => visit(other, depth + 1, out),
                }
            }
        }
        Value::Object(obj) => {
            if is_keyword_candidate(obj) {
                out.push(obj);
            }
            walk_fields(obj, depth, out);
        }
        _ => {}
    }
}

fn walk_fields<'a>(
    obj: &'a Map<String, Value>,
    depth: usize,
    out: &mut Vec<&'a Map<String, Value>>,
) {
    if depth > MAX_DEPTH {
        return;
    }
    for child in obj.values() {
        visit(child, depth + 1, out);
    }
}

fn is_keyword_candidate(obj: &Map<String, Value>) -> bool {
    let Some(name) = first_present(obj, &NAME_KEYS).and_then(Value::as_str) else {
        return false;
    };
    if !any_present(obj, &RATING_KEYS) && !any_present(obj, &REVIEW_KEYS) {
        return false;
    }

    let lower = name.to_lowercase();
    MEDICAL_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

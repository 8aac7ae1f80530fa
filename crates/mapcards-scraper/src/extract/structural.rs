//! Structural pass: tagged business objects and rated named objects.

use serde_json::{Map, Value};

use super::fields::{any_present, present};

const MAX_DEPTH: usize = 10;

/// Discriminator values under `type` that mark a business entity.
const BUSINESS_KINDS: [&str; 3] = ["business", "organization", "clinic"];

/// Well-known container fields, explored before anything else.
const PRIORITY_KEYS: [&str; 6] = [
    "data",
    "items",
    "results",
    "businesses",
    "organizations",
    "places",
];

const NAME_KEYS: [&str; 2] = ["title", "name"];
const RATING_KEYS: [&str; 3] = ["rating", "ratingData", "reviewCount"];

pub(super) fn find_business_objects<'a>(value: &'a Value, out: &mut Vec<&'a Map<String, Value>>) {
    visit(value, 0, out);
}

fn visit<'a>(value: &'a Value, depth: usize, out: &mut Vec<&'a Map<String, Value>>) {
    if depth > MAX_DEPTH {
        return;
    }

    match value {
        Value::Array(items) => {
            // Array elements are judged at the array's own depth.
            for item in items {
                match item {
                    Value::Object(obj) => {
                        if is_business_candidate(obj) {
                            out.push(obj);
                        }
                        walk_fields(obj, depth + 1, out);
                    }
                    other => visit(other, depth + 1, out),
                }
            }
        }
        Value::Object(obj) => {
            if is_business_candidate(obj) {
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

    // Only the first present priority container is followed; the
    // remaining priority keys are skipped so the same subtree is not
    // re-walked through sibling aliases.
    if let Some(container) = PRIORITY_KEYS.iter().find_map(|key| present(obj, key)) {
        visit(container, depth + 1, out);
    }
    for (key, child) in obj {
        if !PRIORITY_KEYS.contains(&key.as_str()) {
            visit(child, depth + 1, out);
        }
    }
}

fn is_business_candidate(obj: &Map<String, Value>) -> bool {
    let tagged = obj
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|kind| BUSINESS_KINDS.contains(&kind));

    tagged || (any_present(obj, &NAME_KEYS) && any_present(obj, &RATING_KEYS))
}

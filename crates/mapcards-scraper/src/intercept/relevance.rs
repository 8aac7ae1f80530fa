//! URL allow-list deciding which responses are worth parsing.

/// Map and search endpoint fragments.
const MAP_PATH_FRAGMENTS: [&str; 8] = [
    "maps.yandex.ru",
    "yandex.ru/maps",
    "/maps/api/",
    "/search",
    "/businesscard",
    "/geosearch",
    "/orginfo",
    "/yandsearch",
];

/// Health, business and rating vocabulary, English and Russian.
const URL_KEYWORDS: [&str; 27] = [
    "clinic",
    "medical",
    "doctor",
    "hospital",
    "health",
    "клиника",
    "медицин",
    "доктор",
    "больница",
    "здоровье",
    "rating",
    "review",
    "business",
    "organization",
    "рейтинг",
    "отзыв",
    "бизнес",
    "организац",
    "search",
    "filter",
    "category",
    "ajax",
    "api",
    "цвет",
    "flower",
    "beauty",
    "salon",
];

/// Case-insensitive substring match against the known fragments and
/// keywords.
#[must_use]
pub fn is_relevant_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }
    let lower = url.to_lowercase();
    MAP_PATH_FRAGMENTS
        .iter()
        .chain(URL_KEYWORDS.iter())
        .any(|needle| lower.contains(needle))
}

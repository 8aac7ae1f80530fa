//! Selector tables for result items and their scrollable containers.

/// Result-like element groups, one per site family plus a generic group.
/// Counts are summed across groups without deduplication.
pub const ITEM_COUNT_SELECTORS: [&str; 4] = [
    r#"[class*="search-snippet-view"], [class*="business-card"], [class*="search-business-snippet"]"#,
    r#"[class*="minicard"], [class*="card"], [data-testid*="searchResult"]"#,
    r#"[data-result-index], [class*="section-result"]"#,
    r#"[data-testid*="business"], [class*="organization"], [class*="clinic"]"#,
];

/// Candidate results containers, most specific first.
pub const CONTAINER_SELECTORS: [&str; 4] = [
    r#"[class*="scroll__scrollbar"], [class*="scroll__scrollbar _noprint"]"#,
    r#"[class*="search-list"], [class*="search-results"], [class*="business-list"]"#,
    r#"[class*="sidebar"], [class*="search-sidebar"], [class*="results-sidebar"]"#,
    r#"[class*="search-snippet"], [class*="business-card"], [class*="organization-card"]"#,
];

/// A container qualifies only if it holds at least one of these.
pub const RESULT_ITEM_SELECTOR: &str =
    r#"[class*="search-snippet"], [class*="business-card"], [class*="organization-card"]"#;

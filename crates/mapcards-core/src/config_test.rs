use std::collections::HashMap;
use std::env::VarError;
use std::time::Duration;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

fn assert_invalid(map: &HashMap<&str, &str>, expected_var: &str) {
    let result = build_app_config(lookup_from_map(map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == expected_var),
        "expected InvalidEnvVar({expected_var}), got: {result:?}"
    );
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "MAPCARDS_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.collection_limit, 500);
    assert_eq!(cfg.scroll_interval_secs, 3);
    assert_eq!(cfg.scroll_max_cycles, 50);
    assert_eq!(cfg.scroll_stall_threshold, 8);
    assert_eq!(cfg.scroll_steps, 4);
    assert_eq!(cfg.scroll_step_interval_ms, 200);
    assert_eq!(cfg.export_dir.to_str(), Some("."));
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "mapcards/0.1 (listing-collector)");
}

#[test]
fn build_app_config_applies_overrides() {
    let mut map = HashMap::new();
    map.insert("MAPCARDS_ENV", "production");
    map.insert("MAPCARDS_COLLECTION_LIMIT", "25");
    map.insert("MAPCARDS_SCROLL_INTERVAL_SECS", "5");
    map.insert("MAPCARDS_EXPORT_DIR", "/tmp/exports");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.collection_limit, 25);
    assert_eq!(cfg.scroll_interval_secs, 5);
    assert_eq!(cfg.export_dir.to_str(), Some("/tmp/exports"));
}

#[test]
fn build_app_config_rejects_zero_limit() {
    let mut map = HashMap::new();
    map.insert("MAPCARDS_COLLECTION_LIMIT", "0");
    assert_invalid(&map, "MAPCARDS_COLLECTION_LIMIT");
}

#[test]
fn build_app_config_rejects_non_numeric_limit() {
    let mut map = HashMap::new();
    map.insert("MAPCARDS_COLLECTION_LIMIT", "lots");
    assert_invalid(&map, "MAPCARDS_COLLECTION_LIMIT");
}

#[test]
fn build_app_config_rejects_zero_scroll_steps() {
    let mut map = HashMap::new();
    map.insert("MAPCARDS_SCROLL_STEPS", "0");
    assert_invalid(&map, "MAPCARDS_SCROLL_STEPS");
}

#[test]
fn build_app_config_rejects_invalid_step_interval() {
    let mut map = HashMap::new();
    map.insert("MAPCARDS_SCROLL_STEP_INTERVAL_MS", "-200");
    assert_invalid(&map, "MAPCARDS_SCROLL_STEP_INTERVAL_MS");
}

#[test]
fn scroll_options_reflect_config() {
    let mut map = HashMap::new();
    map.insert("MAPCARDS_SCROLL_MAX_CYCLES", "10");
    map.insert("MAPCARDS_SCROLL_STEP_INTERVAL_MS", "50");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let options = cfg.scroll_options();
    assert_eq!(options.interval, Duration::from_secs(3));
    assert_eq!(options.max_cycles, 10);
    assert_eq!(options.stall_threshold, 8);
    assert_eq!(options.step_interval, Duration::from_millis(50));
}

#[test]
fn scroll_overrides_ignore_zero_values() {
    let cfg = build_app_config(lookup_from_map(&HashMap::new())).unwrap();
    let options = cfg.scroll_options().with_overrides(Some(0), Some(12));
    assert_eq!(options.interval, Duration::from_secs(3));
    assert_eq!(options.max_cycles, 12);
}

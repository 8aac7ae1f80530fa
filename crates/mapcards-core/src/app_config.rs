use std::path::PathBuf;
use std::time::Duration;

use crate::protocol::ScrollOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub collection_limit: usize,
    pub scroll_interval_secs: u64,
    pub scroll_max_cycles: u32,
    pub scroll_stall_threshold: u32,
    pub scroll_steps: u32,
    pub scroll_step_interval_ms: u64,
    pub export_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl AppConfig {
    /// Default pacing for `startAutoScroll` commands that omit fields.
    #[must_use]
    pub fn scroll_options(&self) -> ScrollOptions {
        ScrollOptions {
            interval: Duration::from_secs(self.scroll_interval_secs),
            max_cycles: self.scroll_max_cycles,
            stall_threshold: self.scroll_stall_threshold,
            steps: self.scroll_steps,
            step_interval: Duration::from_millis(self.scroll_step_interval_ms),
            ..ScrollOptions::default()
        }
    }
}

pub mod app_config;
pub mod config;
pub mod protocol;
pub mod record;
pub mod transport;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use protocol::{
    CandidateBatch, CollectionStatus, Command, Reply, ScrollOptions, ScrollStatus, StopReason,
    SubmitOutcome,
};
pub use record::{calculate_data_quality, CanonicalRecord, RatingData};
pub use transport::{CandidateSink, ScrollControl, TransportError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

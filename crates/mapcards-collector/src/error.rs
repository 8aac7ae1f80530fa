use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("background dispatcher is not running")]
    Closed,

    #[error("failed to write {path}: {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    /// Network failures pass through unchanged from the wrapped client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A page rejected a selector string.
#[derive(Debug, Error)]
#[error("invalid selector \"{selector}\": {reason}")]
pub struct SelectorError {
    pub selector: String,
    pub reason: String,
}

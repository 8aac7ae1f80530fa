//! Callback-style interception for completion handlers.

use std::sync::Arc;

use super::Interceptor;

/// A completed request as seen by a load callback.
#[derive(Debug, Clone)]
pub struct XhrLoad {
    pub url: String,
    pub status: u16,
    pub response_text: String,
}

/// Wraps a caller's load callback so every completion is inspected first.
///
/// The caller's callback, if any, always runs afterwards with the same
/// load, whether or not inspection found anything.
pub fn wrap_onload<F>(interceptor: Arc<Interceptor>, mut inner: Option<F>) -> impl FnMut(&XhrLoad)
where
    F: FnMut(&XhrLoad),
{
    move |load: &XhrLoad| {
        let count = interceptor.observe_text(&load.url, &load.response_text);
        if count > 0 {
            tracing::debug!(url = %load.url, status = load.status, count, "intercepted records from load callback");
        }
        if let Some(callback) = inner.as_mut() {
            callback(load);
        }
    }
}

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, Method, Request, StatusCode, Url};
use serde_json::Value;

use super::Interceptor;
use crate::error::ScraperError;

/// A fully buffered response, handed back exactly as received.
#[derive(Debug, Clone)]
pub struct InterceptedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub url: Url,
    pub body: Vec<u8>,
}

impl InterceptedResponse {
    /// Body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body parsed as JSON.
    ///
    /// # Errors
    ///
    /// Returns the parse error when the body is not valid JSON.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP client whose responses pass through an [`Interceptor`] on the way
/// back to the caller.
///
/// The caller always receives the response unchanged. Transport errors
/// propagate exactly as the inner client reports them, and interception
/// never turns a success into a failure.
pub struct InterceptingClient {
    client: Client,
    interceptor: Arc<Interceptor>,
}

impl InterceptingClient {
    /// Creates a client with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        interceptor: Arc<Interceptor>,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self::with_client(client, interceptor))
    }

    /// Wraps an existing client.
    #[must_use]
    pub fn with_client(client: Client, interceptor: Arc<Interceptor>) -> Self {
        Self {
            client,
            interceptor,
        }
    }

    /// Issues a `GET` for `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] for invalid URLs and network failures.
    pub async fn get(&self, url: &str) -> Result<InterceptedResponse, ScraperError> {
        let request = self.client.request(Method::GET, url).build()?;
        self.execute(request).await
    }

    /// Executes an arbitrary request, inspecting the body when the request
    /// URL is relevant. Non-2xx responses are inspected too.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] when sending or reading the body fails.
    pub async fn execute(&self, request: Request) -> Result<InterceptedResponse, ScraperError> {
        let request_url = request.url().to_string();
        let response = self.client.execute(request).await?;

        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().clone();
        let body = response.bytes().await?.to_vec();

        let count = self.interceptor.observe(&request_url, &body);
        if count > 0 {
            tracing::debug!(url = %request_url, status = status.as_u16(), count, "intercepted records from response");
        }

        Ok(InterceptedResponse {
            status,
            headers,
            url,
            body,
        })
    }
}

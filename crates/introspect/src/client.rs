//! Configurable GraphQL introspection client.
//!
//! This module provides a flexible client for executing introspection queries
//! with support for custom headers, timeouts, retry logic, and a configurable
//! type-reference depth.

use crate::{
    introspection_query, GraphQLError, IntrospectionError, Result, DEFAULT_TYPE_REF_DEPTH,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Default timeout for introspection requests (30 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default number of retry attempts.
const DEFAULT_RETRIES: u32 = 0;

/// A configurable client for executing GraphQL introspection queries.
///
/// Clients are plain values: build one per endpoint and pass it to whatever
/// needs it.
///
/// # Examples
///
/// ```no_run
/// use sdl_introspect::{render, IntrospectionClient};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = IntrospectionClient::new()
///     .with_header("Authorization", "Bearer my-token")
///     .with_timeout(Duration::from_secs(60))
///     .with_retries(3);
/// let data = client.execute("https://api.example.com/graphql").await?;
/// println!("{}", render(&data)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IntrospectionClient {
    headers: HashMap<String, String>,
    timeout: Duration,
    connect_timeout: Duration,
    retries: u32,
    type_ref_depth: usize,
}

impl Default for IntrospectionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl IntrospectionClient {
    /// Creates a new introspection client with default settings.
    ///
    /// Default settings:
    /// - 30 second request timeout
    /// - 10 second connection timeout
    /// - No retries
    /// - No custom headers
    /// - Type references fetched 7 levels deep
    #[must_use]
    pub fn new() -> Self {
        Self {
            headers: HashMap::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            retries: DEFAULT_RETRIES,
            type_ref_depth: DEFAULT_TYPE_REF_DEPTH,
        }
    }

    /// Adds a custom HTTP header to be sent with the introspection request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds multiple HTTP headers from an iterator.
    #[must_use]
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.insert(name.into(), value.into());
        }
        self
    }

    /// Sets the request timeout (connection + transfer).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the number of retry attempts on failure.
    ///
    /// Retries use exponential backoff starting at 1 second.
    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Sets how many `ofType` levels the introspection query requests.
    #[must_use]
    pub fn with_type_ref_depth(mut self, depth: usize) -> Self {
        self.type_ref_depth = depth;
        self
    }

    /// The introspection query this client sends.
    #[must_use]
    pub fn query(&self) -> String {
        introspection_query(self.type_ref_depth)
    }

    /// Executes an introspection query and returns the response's `data` value.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The network request fails after all retry attempts
    /// - The server returns an HTTP error status
    /// - The body is not JSON or has no `data`
    /// - The response carries a non-empty `errors` array
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, url: &str) -> Result<Value> {
        let mut response = self.execute_raw(url).await?;
        take_data(&mut response)
    }

    /// Executes introspection and returns the whole response body.
    ///
    /// This is useful when you need the original introspection JSON format
    /// rather than SDL.
    ///
    /// # Errors
    ///
    /// Same as [`IntrospectionClient::execute`].
    #[tracing::instrument(skip(self))]
    pub async fn execute_raw(&self, url: &str) -> Result<Value> {
        let headers = self.header_map()?;
        let mut last_error = None;
        let attempts = self.retries + 1;

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = Duration::from_secs(1 << (attempt - 1).min(16)); // 1s, 2s, 4s, ...
                tracing::info!(
                    attempt,
                    delay_secs = delay.as_secs(),
                    "Retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            match self.execute_once(url, &headers).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Request failed");
                    let retryable = Self::is_retryable(&e);
                    last_error = Some(e);
                    if !retryable {
                        break;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| IntrospectionError::Network("No attempts made".to_string())))
    }

    /// Executes a single introspection request without retry logic.
    async fn execute_once(&self, url: &str, headers: &HeaderMap) -> Result<Value> {
        tracing::debug!("Creating HTTP client with timeouts");
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(|e| {
                IntrospectionError::Network(format!("Failed to create HTTP client: {e}"))
            })?;

        let query_body = serde_json::json!({
            "query": self.query()
        });

        tracing::info!(type_ref_depth = self.type_ref_depth, "Sending introspection query");
        let response = client
            .post(url)
            .headers(headers.clone())
            .json(&query_body)
            .send()
            .await
            .map_err(|e| IntrospectionError::Network(e.to_string()))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Received response");

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %error_body, "HTTP error response");
            return Err(IntrospectionError::Http(status.as_u16(), error_body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| IntrospectionError::Network(e.to_string()))?;

        parse_response_body(&body)
    }

    /// Request headers: JSON content type, then the custom headers.
    ///
    /// Custom headers replace defaults of the same name.
    fn header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                IntrospectionError::Network(format!("Invalid header name '{name}': {e}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                IntrospectionError::Network(format!("Invalid value for header '{name}': {e}"))
            })?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }

    /// Determines if an error is retryable.
    ///
    /// Network errors and 5xx server errors are retryable. Parse errors,
    /// GraphQL errors, 4xx client errors and structural errors are not.
    const fn is_retryable(error: &IntrospectionError) -> bool {
        match error {
            IntrospectionError::Network(_) => true,
            IntrospectionError::Http(status, _) => *status >= 500,
            IntrospectionError::Parse(_)
            | IntrospectionError::GraphQL(_)
            | IntrospectionError::Structure(_) => false,
        }
    }
}

/// Interprets a GraphQL response body.
///
/// Returns the parsed body when it is JSON without errors. A non-empty
/// `errors` array becomes [`IntrospectionError::GraphQL`], so callers never
/// see data from a failed introspection.
///
/// # Errors
///
/// Returns [`IntrospectionError::Parse`] for a non-JSON body and
/// [`IntrospectionError::GraphQL`] when the server reported errors.
pub fn parse_response_body(body: &str) -> Result<Value> {
    let json: Value = serde_json::from_str(body).map_err(|e| {
        tracing::error!(error = %e, "Failed to parse introspection response");
        IntrospectionError::Parse(e.to_string())
    })?;

    if let Some(errors) = json.get("errors").filter(|errors| !errors.is_null()) {
        let errors: Vec<GraphQLError> = serde_json::from_value(errors.clone())
            .map_err(|e| IntrospectionError::Parse(format!("malformed errors array: {e}")))?;
        if !errors.is_empty() {
            tracing::error!(count = errors.len(), "GraphQL server reported errors");
            return Err(IntrospectionError::GraphQL(errors));
        }
    }

    Ok(json)
}

/// Moves the `data` value out of a parsed response.
fn take_data(response: &mut Value) -> Result<Value> {
    match response.get_mut("data").map(Value::take) {
        Some(data) if !data.is_null() => Ok(data),
        _ => Err(IntrospectionError::Parse(
            "response has no data".to_string(),
        )),
    }
}

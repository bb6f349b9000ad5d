//! Minimal GraphQL-over-HTTP client.
//!
//! Jobs treat the CRM API as a black box: every operation is a plain HTTP
//! POST with a JSON body `{"query": "<graphql text>"}`, and the response is
//! the standard `{data, errors}` envelope.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when talking to the GraphQL endpoint.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The response carried GraphQL errors.
    #[error("GraphQL errors: {0}")]
    GraphQL(String),

    /// The response carried neither data nor errors.
    #[error("missing data in response")]
    MissingData,
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphQLResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphQLErrorEntry>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorEntry {
    message: String,
}

/// Parse a raw response body into the `data` value.
///
/// # Errors
///
/// Returns `ClientError::Parse` for malformed JSON, `ClientError::GraphQL`
/// when the envelope carries errors, and `ClientError::MissingData` when it
/// carries neither data nor errors.
pub fn parse_response(body: &str) -> Result<Value, ClientError> {
    let envelope: GraphQLResponse = serde_json::from_str(body)?;

    if let Some(errors) = envelope.errors
        && !errors.is_empty()
    {
        let joined = errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ClientError::GraphQL(joined));
    }

    envelope.data.ok_or(ClientError::MissingData)
}

/// Client for the CRM GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GraphqlClient {
    /// Create a client for the given endpoint URL.
    #[must_use]
    pub fn new(endpoint: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Execute a GraphQL operation and return the `data` value.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] for network, HTTP-status, parse, or
    /// GraphQL-level failures. Callers treat every variant as non-fatal.
    pub async fn execute(&self, query: &str) -> Result<Value, ClientError> {
        let response = self
            .http
            .post(&self.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        parse_response(&body)
    }
}

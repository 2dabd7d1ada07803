//! GraphQL transport port
//!
//! The composition core never performs I/O: it produces document text and
//! consumes a fetch acknowledgment. This module provides the boundary
//! contract for executing that text, plus an HTTP implementation speaking
//! the standard GraphQL-over-HTTP envelope (`{query, operationName,
//! variables}` request, `{data, errors}` response).

use crate::config::EndpointConfig;
use crate::error::TransportError;
use crate::session::QueryHandle;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

/// Executes a rendered document against a GraphQL server
#[async_trait]
pub trait GraphQlTransport: Send + Sync {
    async fn execute(
        &self,
        document: &str,
        operation_name: &str,
        variables: Value,
    ) -> Result<Value, TransportError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryPayload<'a> {
    query: &'a str,
    operation_name: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    data: Option<Value>,
    errors: Option<Vec<ExecutionError>>,
}

#[derive(Debug, Deserialize)]
struct ExecutionError {
    message: String,
}

/// Decode a GraphQL response envelope into its data payload
///
/// A present, non-empty `errors` array wins over `data`: partial data from a
/// failed execution is not surfaced.
fn decode_envelope(body: &str) -> Result<Value, TransportError> {
    let envelope: ResponseEnvelope = serde_json::from_str(body)?;

    if let Some(errors) = envelope.errors {
        if !errors.is_empty() {
            return Err(TransportError::GraphQl {
                messages: errors.into_iter().map(|e| e.message).collect(),
            });
        }
    }
    envelope.data.ok_or(TransportError::MissingData)
}

/// HTTP transport posting documents as JSON
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    pub fn new(config: &EndpointConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder().timeout(Duration::from_secs(config.timeout_secs));

        if !config.headers.is_empty() {
            use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

            let mut headers = HeaderMap::new();
            for (key, value) in &config.headers {
                // Invalid configured headers are skipped rather than fatal
                match (
                    HeaderName::from_bytes(key.as_bytes()),
                    HeaderValue::from_str(value),
                ) {
                    (Ok(name), Ok(value)) => {
                        headers.insert(name, value);
                    }
                    _ => tracing::warn!(header = %key, "ignoring invalid configured header"),
                }
            }
            builder = builder.default_headers(headers);
        }

        Ok(Self {
            client: builder.build()?,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl GraphQlTransport for HttpTransport {
    #[instrument(skip(self, document, variables), fields(url = %self.url))]
    async fn execute(
        &self,
        document: &str,
        operation_name: &str,
        variables: Value,
    ) -> Result<Value, TransportError> {
        let payload = QueryPayload {
            query: document,
            operation_name,
            variables,
        };

        let response = self.client.post(&self.url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!(operation = operation_name, bytes = body.len(), "GraphQL response received");
        decode_envelope(&body)
    }
}

/// Execute a query handle's document and acknowledge the fetch
///
/// Renders under current visibility, sends the document, and on success
/// replaces the session's fetched-fragment record with the fragments that
/// were actually on the wire.
pub async fn fetch_query(
    transport: &dyn GraphQlTransport,
    handle: &QueryHandle,
    variables: Value,
) -> Result<Value, TransportError> {
    let rendered = handle.rendered()?;
    let data = transport
        .execute(&rendered.document, &rendered.operation_name, variables)
        .await?;
    handle.did_fetch()?;
    Ok(data)
}

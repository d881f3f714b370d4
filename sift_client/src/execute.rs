//! Running a compiled filter against the persons endpoint

use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::Instant;

use crate::http::error_message;
use crate::{ClientError, PeopleClient};

const PERSONS_PATH: &str = "/people/2/persons";

/// Why a query did not succeed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum QueryFailure {
    /// The request never completed.
    Network(String),
    /// The server answered with a non-success status.
    Http(String),
}

impl fmt::Display for QueryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryFailure::Network(message) => write!(
                f,
                "Network error: {} (the server may be unreachable or blocking cross-origin requests)",
                message
            ),
            QueryFailure::Http(message) => write!(f, "{}", message),
        }
    }
}

/// Everything observed about one query request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOutcome {
    pub success: bool,
    pub http_status: Option<u16>,
    pub status_text: Option<String>,
    pub body: Option<Value>,
    pub elapsed_ms: u64,
    pub failure: Option<QueryFailure>,
}

/// Path and query for a persons search with an already-encoded filter.
///
/// The `filter` parameter is left out when there is no filter.
pub fn query_path(encoded_filter: &str) -> String {
    if encoded_filter.is_empty() {
        format!("{}?includeTotalCount=true", PERSONS_PATH)
    } else {
        format!(
            "{}?includeTotalCount=true&filter={}",
            PERSONS_PATH, encoded_filter
        )
    }
}

/// Runs filters against the persons endpoint.
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    client: PeopleClient,
}

impl QueryExecutor {
    pub fn new(client: PeopleClient) -> Self {
        Self { client }
    }

    /// Execute a search with an encoded filter.
    ///
    /// Failures are part of the outcome rather than an error, so status,
    /// timing and body are available either way.
    pub async fn execute(&self, encoded_filter: &str) -> QueryOutcome {
        let started = Instant::now();
        let path = query_path(encoded_filter);

        let response = match self.client.send(&path).await {
            Ok(response) => response,
            Err(e) => return network_failure(e, started),
        };

        let status = response.status();
        let status_text = status.canonical_reason().map(str::to_string);
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return network_failure(ClientError::Network(e.to_string()), started),
        };
        let elapsed_ms = elapsed_since(started);
        let body = parse_body(&text);

        debug!("Query finished with {} in {} ms", status, elapsed_ms);

        let failure = if status.is_success() {
            None
        } else {
            let message = error_message(body.as_ref().unwrap_or(&Value::Null));
            warn!("Query failed with {}: {}", status, message);
            Some(QueryFailure::Http(message))
        };

        QueryOutcome {
            success: failure.is_none(),
            http_status: Some(status.as_u16()),
            status_text,
            body,
            elapsed_ms,
            failure,
        }
    }
}

fn network_failure(error: ClientError, started: Instant) -> QueryOutcome {
    let message = match error {
        ClientError::Network(message) => message,
        other => other.to_string(),
    };
    warn!("Query request failed: {}", message);

    QueryOutcome {
        success: false,
        http_status: None,
        status_text: None,
        body: None,
        elapsed_ms: elapsed_since(started),
        failure: Some(QueryFailure::Network(message)),
    }
}

/// JSON body when it parses, the raw text otherwise, nothing when empty.
fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}

fn elapsed_since(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

//! Authenticated HTTP access to the People API

use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde_json::Value;

use crate::{ClientConfig, ClientError, Credentials};

/// Message used when an error body carries nothing readable.
pub const FALLBACK_ERROR_MESSAGE: &str = "Request failed";

/// HTTP client bound to one base URL and API key.
#[derive(Debug, Clone)]
pub struct PeopleClient {
    http: Client,
    base_url: String,
}

impl PeopleClient {
    /// Create a client from unchecked settings.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(&config.validate()?)
    }

    /// Create a client from validated credentials.
    ///
    /// Every request carries `Authorization: App <key>`.
    pub fn new(credentials: &Credentials) -> Result<Self, ClientError> {
        let mut authorization = HeaderValue::from_str(&format!("App {}", credentials.api_key))
            .map_err(|_| {
                ClientError::Config(vec![
                    "API key cannot be sent in a request header".to_string(),
                ])
            })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: credentials.base_url.clone(),
        })
    }

    /// Full URL for a path that already carries its (encoded) query string.
    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    /// Send a GET request. Only transport failures are errors here.
    pub async fn send(&self, path_and_query: &str) -> Result<Response, ClientError> {
        let url = self.url(path_and_query);
        debug!("GET {}", url);

        self.http
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))
    }

    /// GET a JSON document. Non-success statuses become [`ClientError::Http`].
    pub async fn get_json(&self, path_and_query: &str) -> Result<Value, ClientError> {
        let response = self.send(path_and_query).await?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !status.is_success() {
            let body = serde_json::from_str(&text).unwrap_or(Value::Null);
            return Err(ClientError::Http {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_str(&text)
            .map_err(|e| ClientError::Decode(format!("{} returned invalid JSON: {}", path_and_query, e)))
    }
}

/// Readable message from an error body, falling back to a fixed message.
pub fn error_message(body: &Value) -> String {
    extract_error_message(body).unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}

/// Pull a readable message out of a People API error body.
///
/// Looks at `requestError.serviceException` first, then a top-level
/// `message` or `error` string.
pub fn extract_error_message(body: &Value) -> Option<String> {
    if let Some(exception) = body.pointer("/requestError/serviceException") {
        let text = exception.get("text").and_then(Value::as_str);
        let message_id = exception.get("messageId").and_then(Value::as_str);
        match (message_id, text) {
            (Some(id), Some(text)) => return Some(format!("{} ({})", text, id)),
            (None, Some(text)) => return Some(text.to_string()),
            (Some(id), None) => return Some(id.to_string()),
            (None, None) => {}
        }
    }

    ["message", "error"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

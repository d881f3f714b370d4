//! Connection settings for the People API

use std::fmt;

use crate::ClientError;

/// Base URL and API key as the user supplied them.
#[derive(Clone, Default)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
}

/// Settings that passed validation and are ready to use.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    /// Absolute http(s) URL without a trailing slash.
    pub base_url: String,
    /// API key with surrounding whitespace and non-ASCII characters removed.
    pub api_key: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Check both settings before any request is made.
    ///
    /// Every problem found is reported, not just the first one.
    pub fn validate(&self) -> Result<Credentials, ClientError> {
        let mut errors = Vec::new();

        let base_url = match normalize_base_url(&self.base_url) {
            Ok(url) => url,
            Err(message) => {
                errors.push(message);
                String::new()
            }
        };

        let api_key = sanitize_api_key(&self.api_key);
        if api_key.is_empty() {
            if self.api_key.trim().is_empty() {
                errors.push("API key is required".to_string());
            } else {
                errors.push("API key contains no usable characters".to_string());
            }
        } else if api_key.chars().any(|c| c.is_ascii_control()) {
            errors.push("API key contains control characters".to_string());
        }

        if errors.is_empty() {
            Ok(Credentials { base_url, api_key })
        } else {
            Err(ClientError::Config(errors))
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("has_api_key", &!self.api_key.trim().is_empty())
            .finish()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Strip surrounding whitespace and every non-ASCII character.
pub fn sanitize_api_key(api_key: &str) -> String {
    api_key.trim().chars().filter(char::is_ascii).collect()
}

/// Turn user input into an absolute base URL.
///
/// A bare host gets `https://`; trailing slashes are removed.
fn normalize_base_url(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Base URL is required".to_string());
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = reqwest::Url::parse(&candidate)
        .map_err(|e| format!("Base URL '{}' is not a valid URL: {}", trimmed, e))?;

    match url.scheme() {
        "http" | "https" => Ok(candidate.trim_end_matches('/').to_string()),
        other => Err(format!(
            "Base URL must use http or https, got '{}'",
            other
        )),
    }
}

//! Error types for talking to the People API

use std::fmt;

/// Errors that can occur before or while calling the People API
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Base URL or API key is missing or unusable. Detected before any request.
    Config(Vec<String>),
    /// The request could not complete.
    Network(String),
    /// The request completed with a non-success status.
    Http { status: u16, message: String },
    /// A response body could not be read as expected.
    Decode(String),
    /// No attribute source produced anything.
    AttributesUnavailable(Vec<String>),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Config(errors) => {
                write!(f, "Invalid configuration: {}", errors.join("; "))
            }
            ClientError::Network(message) => {
                write!(
                    f,
                    "Network error: {} (the server may be unreachable or blocking cross-origin requests)",
                    message
                )
            }
            ClientError::Http { status, message } => {
                write!(f, "HTTP {}: {}", status, message)
            }
            ClientError::Decode(message) => write!(f, "Unexpected response: {}", message),
            ClientError::AttributesUnavailable(errors) => {
                write!(f, "Could not load any attributes: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ClientError {}

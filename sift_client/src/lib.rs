//! People API access for filter building.
//!
//! - [`ClientConfig`] validates the base URL and API key
//! - [`AttributeDirectory`] discovers the filterable attributes of an account
//! - [`QueryExecutor`] runs a compiled filter and reports what happened

mod config;
mod directory;
mod errors;
mod execute;
mod http;

pub use config::{ClientConfig, Credentials, sanitize_api_key};
pub use directory::{AttributeDirectory, DEFAULT_PAGE_LIMIT, DirectoryReport, MAX_PAGES};
pub use errors::ClientError;
pub use execute::{QueryExecutor, QueryFailure, QueryOutcome, query_path};
pub use http::{FALLBACK_ERROR_MESSAGE, PeopleClient, error_message, extract_error_message};

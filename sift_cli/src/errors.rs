use std::fmt;

/// Errors that end a CLI command. Details are reported through `ui` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliError {
    ConfigError,
    FileError,
    InputError,
    NetworkError,
    QueryError,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigError => write!(f, "Invalid connection settings"),
            CliError::FileError => write!(f, "Failed to read or write a file"),
            CliError::InputError => write!(f, "Invalid input"),
            CliError::NetworkError => write!(f, "Failed to reach the People API"),
            CliError::QueryError => write!(f, "Query failed"),
        }
    }
}

impl std::error::Error for CliError {}

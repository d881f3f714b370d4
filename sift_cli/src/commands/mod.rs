mod attributes;
mod build;
mod compile;
mod condition_prompt;
mod operators;
mod run;

pub use attributes::list_attributes;
pub use build::build_filter;
pub use compile::compile_file;
pub use operators::list_operators;
pub use run::run_file;

use tokio::runtime::Runtime;

use sift_client::{
    AttributeDirectory, ClientConfig, ClientError, DirectoryReport, PeopleClient, QueryExecutor,
    QueryOutcome,
};

use crate::errors::CliError;
use crate::ui;

/// Create the async runtime for commands that talk to the People API.
fn runtime() -> Result<Runtime, CliError> {
    Runtime::new().map_err(|e| {
        ui::error_with_details("Failed to create async runtime", &e.to_string());
        CliError::NetworkError
    })
}

/// Validate connection settings and create a client, reporting every problem.
fn connect(config: &ClientConfig) -> Result<PeopleClient, CliError> {
    PeopleClient::from_config(config).map_err(|e| {
        match e {
            ClientError::Config(errors) => {
                ui::error("Connection settings are incomplete:");
                for error in errors {
                    ui::error(&format!("  - {}", error));
                }
                ui::info("Use --base-url and --api-key, or set SIFT_BASE_URL and SIFT_API_KEY");
            }
            other => ui::error_with_details("Failed to create client", &other.to_string()),
        }
        CliError::ConfigError
    })
}

/// Load the attribute directory behind a spinner and surface partial failures.
fn load_directory(runtime: &Runtime, client: PeopleClient) -> Result<DirectoryReport, CliError> {
    let spinner = ui::spinner("Loading attributes");
    let result = runtime.block_on(AttributeDirectory::new(client).list_attributes());
    spinner.finish_and_clear();

    match result {
        Ok(report) => {
            for warning in &report.warnings {
                ui::warning(warning);
            }
            Ok(report)
        }
        Err(ClientError::AttributesUnavailable(errors)) => {
            ui::error("Could not load any attributes:");
            for error in errors {
                ui::error(&format!("  - {}", error));
            }
            Err(CliError::NetworkError)
        }
        Err(e) => {
            ui::error_with_details("Could not load attributes", &e.to_string());
            Err(CliError::NetworkError)
        }
    }
}

/// Run an encoded filter behind a spinner.
fn execute(runtime: &Runtime, client: PeopleClient, encoded_filter: &str) -> QueryOutcome {
    let spinner = ui::spinner("Running query");
    let outcome = runtime.block_on(QueryExecutor::new(client).execute(encoded_filter));
    spinner.finish_and_clear();
    outcome
}

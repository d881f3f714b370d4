use sift_client::ClientConfig;

use super::{connect, load_directory, runtime};
use crate::errors::CliError;
use crate::ui::{self, OutputFormat};

/// Lists the filterable attributes of the account.
pub fn list_attributes(config: &ClientConfig, output_format: OutputFormat) -> Result<(), CliError> {
    ui::header("Listing attributes");
    let client = connect(config)?;
    let runtime = runtime()?;
    let report = load_directory(&runtime, client)?;

    ui::success(&format!("Found {} attributes", report.attributes.len()));

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_attribute_list(&report.attributes),
        OutputFormat::Json => ui::json_output(&report),
    }

    Ok(())
}

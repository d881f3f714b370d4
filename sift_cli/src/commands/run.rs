use serde_json::json;
use std::path::Path;

use sift_client::ClientConfig;
use sift_core::attribute::standard_attributes;
use sift_core::filter::compile;

use super::{connect, execute, runtime};
use crate::errors::CliError;
use crate::files::load_filter_set;
use crate::ui::{self, OutputFormat};

/// Compiles a filter file and runs it against the persons endpoint.
pub fn run_file(
    path: &Path,
    config: &ClientConfig,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header(&format!("Running {}", path.display()));
    let client = connect(config)?;
    let mut filter_set = load_filter_set(path)?;
    filter_set.resolve_types(&standard_attributes());

    let compiled = compile(&filter_set);
    if compiled.is_empty() {
        ui::info("No usable conditions, running without a filter");
    } else {
        ui::debug(&format!("Filter: {}", compiled.raw));
    }

    let runtime = runtime()?;
    let outcome = execute(&runtime, client, &compiled.encoded);

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_outcome(&outcome),
        OutputFormat::Json => ui::json_output(&json!({
            "filter": {"raw": compiled.raw, "encoded": compiled.encoded},
            "outcome": outcome,
        })),
    }

    if outcome.success {
        Ok(())
    } else {
        Err(CliError::QueryError)
    }
}

use inquire::{Confirm, Select, Text};
use std::path::PathBuf;

use sift_client::ClientConfig;
use sift_core::filter::{Combinator, FilterSet, compile};

use super::condition_prompt::prompt_condition;
use super::{connect, execute, load_directory, runtime};
use crate::errors::CliError;
use crate::files::save_filter_set;
use crate::ui::{self, OutputFormat};

/// Interactively build a filter from the account's attributes.
///
/// The compiled preview is shown after every added condition. The finished
/// filter can be saved and run.
pub fn build_filter(
    config: &ClientConfig,
    save: Option<PathBuf>,
    run: bool,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Building filter");
    let client = connect(config)?;
    let runtime = runtime()?;
    let report = load_directory(&runtime, client.clone())?;
    ui::success(&format!("Loaded {} attributes", report.attributes.len()));

    let logic = Select::new("Combine conditions with:", vec![Combinator::And, Combinator::Or])
        .prompt()
        .map_err(|_| CliError::InputError)?;
    let mut filter_set = FilterSet::new(logic);

    loop {
        let condition = prompt_condition(&report.attributes)?;
        filter_set.conditions.push(condition);

        ui::pretty_output_compiled(&compile(&filter_set));

        let add_more = Confirm::new("Add another condition?")
            .with_default(false)
            .prompt()
            .map_err(|_| CliError::InputError)?;
        if !add_more {
            break;
        }
    }

    let compiled = compile(&filter_set);
    if output_format == OutputFormat::Json {
        ui::json_output(&filter_set);
    }

    let save_path = match save {
        Some(path) => Some(path),
        None => prompt_save_path()?,
    };
    if let Some(path) = save_path {
        save_filter_set(&path, &filter_set)?;
        ui::success(&format!("Saved filter to {}", path.display()));
    }

    let should_run = run
        || Confirm::new("Run the filter now?")
            .with_default(true)
            .prompt()
            .map_err(|_| CliError::InputError)?;
    if !should_run {
        return Ok(());
    }

    let outcome = execute(&runtime, client, &compiled.encoded);
    match output_format {
        OutputFormat::Pretty => ui::pretty_output_outcome(&outcome),
        OutputFormat::Json => ui::json_output(&outcome),
    }

    if outcome.success {
        Ok(())
    } else {
        Err(CliError::QueryError)
    }
}

fn prompt_save_path() -> Result<Option<PathBuf>, CliError> {
    let save = Confirm::new("Save the filter to a file?")
        .with_default(false)
        .prompt()
        .map_err(|_| CliError::InputError)?;
    if !save {
        return Ok(None);
    }

    Text::new("File:")
        .with_default("filter.json")
        .prompt()
        .map(|path| Some(PathBuf::from(path)))
        .map_err(|_| CliError::InputError)
}

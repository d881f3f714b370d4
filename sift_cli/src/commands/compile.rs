use serde_json::json;
use std::path::Path;

use sift_core::attribute::standard_attributes;
use sift_core::filter::compile;

use crate::errors::CliError;
use crate::files::load_filter_set;
use crate::ui::{self, OutputFormat};

/// Compiles a filter file without contacting the API.
///
/// Field types come from the file, or from the standard attributes when the
/// field is a standard one.
pub fn compile_file(path: &Path, output_format: OutputFormat) -> Result<(), CliError> {
    ui::header(&format!("Compiling {}", path.display()));
    let mut filter_set = load_filter_set(path)?;
    filter_set.resolve_types(&standard_attributes());

    let compiled = compile(&filter_set);
    ui::debug(&format!(
        "{} of {} conditions are usable",
        filter_set.conditions.iter().filter(|c| c.is_complete()).count(),
        filter_set.conditions.len()
    ));

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_compiled(&compiled),
        OutputFormat::Json => ui::json_output(&json!({
            "raw": compiled.raw,
            "encoded": compiled.encoded,
        })),
    }

    Ok(())
}

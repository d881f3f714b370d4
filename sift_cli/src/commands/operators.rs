use serde_json::json;

use sift_core::filter::operators_for;
use sift_core::{Attribute, AttributeType};

use crate::errors::CliError;
use crate::ui::{self, OutputFormat};

/// Shows the operators offered for an attribute type, narrowed by field name when given.
pub fn list_operators(
    attribute_type: AttributeType,
    field: Option<String>,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    let name = field.unwrap_or_default();
    let attribute = Attribute::new(&name, attribute_type);
    let operators = operators_for(&attribute);

    match output_format {
        OutputFormat::Pretty => {
            if name.is_empty() {
                ui::header(&format!("Operators for {} attributes", attribute_type));
            } else {
                ui::header(&format!("Operators for {} ({})", name, attribute_type));
            }
            ui::pretty_output_operator_list(&operators);
        }
        OutputFormat::Json => {
            let operators: Vec<_> = operators
                .iter()
                .map(|op| json!({"code": op.code(), "label": op.label()}))
                .collect();
            ui::json_output(&operators);
        }
    }

    Ok(())
}

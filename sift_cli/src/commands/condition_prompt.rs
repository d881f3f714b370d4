use chrono::NaiveDate;
use inquire::validator::ValueRequiredValidator;
use inquire::{Confirm, DateSelect, Select, Text};
use std::fmt;

use sift_core::filter::{
    Combinator, Condition, ItemCondition, ListMode, Operator, RawValue, applicable_operators,
    operators_for,
};
use sift_core::{Attribute, AttributeType};

use crate::errors::CliError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wrapper for Operator that customizes Display for Inquire prompts.
struct InquireOperator(Operator);
impl fmt::Display for InquireOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0.label(), self.0.code())
    }
}

/// Wrapper for a sub-field of a list schema.
struct InquireSubField(String, AttributeType);
impl fmt::Display for InquireSubField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.1)
    }
}

/// Prompt for one condition: attribute, then operator and value, or item conditions for lists.
pub fn prompt_condition(attributes: &[Attribute]) -> Result<Condition, CliError> {
    let attribute = Select::new("Attribute:", attributes.to_vec())
        .with_page_size(15)
        .prompt()
        .map_err(|_| CliError::InputError)?;

    if attribute.attribute_type == AttributeType::List {
        return prompt_list_condition(&attribute);
    }

    let operator = prompt_operator(operators_for(&attribute))?;
    let condition = if operator.is_existence() {
        Condition::without_value(&attribute.name, operator)
    } else {
        let value = prompt_value(&attribute, operator)?;
        Condition::new(&attribute.name, operator, value)
    };

    Ok(condition.with_type(attribute.attribute_type))
}

/// Prompt for match mode, logic and item conditions on a list attribute.
fn prompt_list_condition(attribute: &Attribute) -> Result<Condition, CliError> {
    let mode = Select::new("Match:", vec![ListMode::MatchAny, ListMode::MatchAll])
        .prompt()
        .map_err(|_| CliError::InputError)?;
    let logic = Select::new("Combine item conditions with:", vec![Combinator::And, Combinator::Or])
        .prompt()
        .map_err(|_| CliError::InputError)?;

    let mut items = Vec::new();
    loop {
        items.push(prompt_item_condition(attribute)?);

        let add_more = Confirm::new("Add another item condition?")
            .with_default(false)
            .prompt()
            .map_err(|_| CliError::InputError)?;
        if !add_more {
            break;
        }
    }

    Ok(Condition::list(&attribute.name, mode, logic, items))
}

/// Prompt for one predicate on a sub-field of a list element.
fn prompt_item_condition(attribute: &Attribute) -> Result<ItemCondition, CliError> {
    let sub_fields: Vec<InquireSubField> = attribute
        .schema()
        .map(|schema| {
            schema
                .iter()
                .map(|(name, field_type)| InquireSubField(name.clone(), *field_type))
                .collect()
        })
        .unwrap_or_default();

    // Lists without a known schema take free-form sub-field names.
    let (field, field_type) = if sub_fields.is_empty() {
        let field = Text::new("Item field:")
            .with_validator(ValueRequiredValidator::default())
            .prompt()
            .map_err(|_| CliError::InputError)?;
        (field, None)
    } else {
        let chosen = Select::new("Item field:", sub_fields)
            .prompt()
            .map_err(|_| CliError::InputError)?;
        (chosen.0, Some(chosen.1))
    };

    // Item conditions always carry a value.
    let operators: Vec<Operator> = applicable_operators(field_type.unwrap_or_default())
        .into_iter()
        .filter(|op| !op.is_existence())
        .collect();
    let operator = prompt_operator(operators)?;

    let value_attribute = Attribute::new(&field, field_type.unwrap_or_default());
    let value = prompt_value(&value_attribute, operator)?;

    Ok(ItemCondition {
        field,
        field_type,
        operator: Some(operator),
        value: Some(value),
    })
}

fn prompt_operator(operators: Vec<Operator>) -> Result<Operator, CliError> {
    let options: Vec<InquireOperator> = operators.into_iter().map(InquireOperator).collect();
    let chosen = Select::new("Operator:", options)
        .prompt()
        .map_err(|_| CliError::InputError)?;
    Ok(chosen.0)
}

/// Prompt for a value in the way that fits the attribute type and operator.
fn prompt_value(attribute: &Attribute, operator: Operator) -> Result<RawValue, CliError> {
    if operator.is_membership() {
        return Text::new("Values (comma separated):")
            .with_validator(ValueRequiredValidator::default())
            .prompt()
            .map(RawValue::Text)
            .map_err(|_| CliError::InputError);
    }

    match attribute.attribute_type {
        AttributeType::Boolean => Select::new("Value:", vec![true, false])
            .prompt()
            .map(RawValue::Boolean)
            .map_err(|_| CliError::InputError),
        AttributeType::Date => DateSelect::new("Date:")
            .prompt()
            .map(|date| RawValue::Text(format_date(date)))
            .map_err(|_| CliError::InputError),
        AttributeType::Enum => match attribute.enum_values() {
            Some(values) if !values.is_empty() => Select::new("Value:", values.to_vec())
                .prompt()
                .map(RawValue::Text)
                .map_err(|_| CliError::InputError),
            _ => prompt_text("Value:", None),
        },
        AttributeType::DateTime => prompt_text("Date and time:", Some("2024-01-31T12:00:00")),
        AttributeType::Integer => prompt_text("Value:", Some("42")),
        AttributeType::Decimal | AttributeType::Number => prompt_text("Value:", Some("4.5")),
        _ => prompt_text("Value:", None),
    }
}

/// Dates are sent as calendar days, e.g. `2024-01-31`.
fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn prompt_text<'a>(message: &'a str, placeholder: Option<&'a str>) -> Result<RawValue, CliError> {
    let mut prompt = Text::new(message).with_validator(ValueRequiredValidator::default());
    if let Some(placeholder) = placeholder {
        prompt = prompt.with_placeholder(placeholder);
    }
    prompt
        .prompt()
        .map(RawValue::Text)
        .map_err(|_| CliError::InputError)
}

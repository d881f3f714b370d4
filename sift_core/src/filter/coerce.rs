//! Value coercion: turns user-entered values into typed filter values
//!
//! Coercion never fails. A value that does not parse as the attribute's
//! type is passed through unchanged.

use super::operator::Operator;
use super::types::{FilterValue, RawValue};
use crate::AttributeType;

/// Coerce a raw value for a field of the given type under the given operator.
///
/// `attribute_type` is `None` when the type is unknown (for example a list
/// sub-field missing from its schema); values are then left as entered.
pub fn coerce(
    raw: &RawValue,
    attribute_type: Option<AttributeType>,
    operator: Operator,
) -> FilterValue {
    if operator.is_membership() {
        return coerce_list(&raw.as_text(), attribute_type);
    }
    match attribute_type {
        Some(attribute_type) => coerce_scalar(raw, attribute_type),
        None => FilterValue::from(raw),
    }
}

/// Splits a comma separated value and coerces each piece.
///
/// Pieces are trimmed and empty pieces dropped; order is kept.
pub fn coerce_list(raw: &str, attribute_type: Option<AttributeType>) -> FilterValue {
    let items = raw
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| {
            let piece = RawValue::Text(piece.to_string());
            match attribute_type {
                Some(attribute_type) => coerce_scalar(&piece, attribute_type),
                None => FilterValue::from(&piece),
            }
        })
        .collect();

    FilterValue::List(items)
}

/// Coerce a single value according to the scalar rules of a type.
pub fn coerce_scalar(raw: &RawValue, attribute_type: AttributeType) -> FilterValue {
    match (attribute_type, raw) {
        (AttributeType::Integer, RawValue::Text(s)) => match s.trim().parse::<i64>() {
            Ok(i) => FilterValue::Integer(i),
            Err(_) => FilterValue::from(raw),
        },
        (AttributeType::Decimal | AttributeType::Number, RawValue::Text(s)) => {
            match s.trim().parse::<f64>() {
                Ok(d) if d.is_finite() => FilterValue::Decimal(d),
                _ => FilterValue::from(raw),
            }
        }
        (AttributeType::Boolean, RawValue::Text(s)) => match parse_boolean(s) {
            Some(b) => FilterValue::Boolean(b),
            None => FilterValue::from(raw),
        },
        (AttributeType::Boolean, RawValue::Integer(1)) => FilterValue::Boolean(true),
        (AttributeType::Boolean, RawValue::Integer(0)) => FilterValue::Boolean(false),
        _ => FilterValue::from(raw),
    }
}

/// Recognises `true/1/yes` and `false/0/no`, ignoring case.
fn parse_boolean(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

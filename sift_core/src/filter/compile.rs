//! Compiles a filter set into the People API filter grammar
//!
//! Compilation is a pure function of the filter set. Incomplete conditions
//! are skipped rather than reported, so a half-edited filter set always
//! compiles to whatever is usable so far.

use log::trace;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;

use super::coerce::coerce;
use super::operator::Operator;
use super::path::{field_node, single};
use super::types::{Condition, FilterSet, ListClause};
use crate::{AttributeType, list_field_name};

/// Everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped in a URI component.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A compiled filter in its raw JSON form and percent-encoded for a URL.
///
/// Both are empty when no condition was usable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompiledFilter {
    pub raw: String,
    pub encoded: String,
}

impl CompiledFilter {
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// Compile a filter set into its raw and encoded text.
pub fn compile(filter_set: &FilterSet) -> CompiledFilter {
    match compile_root(filter_set) {
        Some(root) => {
            let raw = root.to_string();
            let encoded = encode(&raw);
            CompiledFilter { raw, encoded }
        }
        None => CompiledFilter::default(),
    }
}

/// Build the root filter node, or `None` when nothing usable is left.
pub fn compile_root(filter_set: &FilterSet) -> Option<Value> {
    let mut nodes: Vec<Value> = filter_set
        .conditions
        .iter()
        .filter(|condition| {
            let complete = condition.is_complete();
            if !complete {
                trace!("Skipping incomplete condition on '{}'", condition.field);
            }
            complete
        })
        .filter_map(compile_condition)
        .collect();

    match nodes.len() {
        0 => None,
        1 => nodes.pop(),
        _ => Some(single(filter_set.logic.key(), Value::Array(nodes))),
    }
}

/// Percent-encode text as a URI component.
pub fn encode(raw: &str) -> String {
    utf8_percent_encode(raw, URI_COMPONENT).to_string()
}

/// Compile one complete condition into its node.
fn compile_condition(condition: &Condition) -> Option<Value> {
    if condition.is_list() {
        return condition
            .list
            .as_ref()
            .and_then(|clause| compile_list(&condition.field, clause));
    }

    let operator = condition.operator?;
    let code = operator.code();
    let field = condition.field.as_str();

    if operator.is_existence() {
        return Some(field_node(field, Some(&code), Value::Bool(true), false));
    }

    let raw = condition.value.as_ref()?;
    let value = coerce(raw, Some(condition.field_type), operator).to_json();

    let node = if operator.is_membership() {
        field_node(field, Some(&code), value, false)
    } else if condition.field_type == AttributeType::Array {
        field_node(field, Some(&code), value, true)
    } else if operator == Operator::Equal {
        field_node(field, None, value, false)
    } else {
        field_node(field, Some(&code), value, false)
    };

    Some(node)
}

/// Compile the item conditions of a list attribute.
///
/// Returns `None` when no item condition is complete.
fn compile_list(field: &str, clause: &ListClause) -> Option<Value> {
    let items: Vec<Value> = clause
        .conditions
        .iter()
        .filter(|item| item.is_complete())
        .filter_map(|item| {
            let operator = item.operator?;
            let value = coerce(item.value.as_ref()?, item.field_type, operator).to_json();
            let assignment = single(item.field.clone(), value);

            Some(match operator {
                Operator::Equal => assignment,
                _ => single(operator.code(), assignment),
            })
        })
        .collect();

    if items.is_empty() {
        return None;
    }

    let combined = single(clause.logic.key(), Value::Array(items));
    Some(single(
        clause.mode.key(),
        single(list_field_name(field), combined),
    ))
}

//! Filter type definitions

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

use super::operator::{MARKER, Operator};
use crate::{Attribute, AttributeType};

/// Largest integer a JSON consumer can hold exactly as a double.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Logical operator for combining sibling conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combinator {
    #[default]
    And,
    Or,
}

impl Combinator {
    /// Key used in the compiled filter.
    pub fn key(&self) -> String {
        match self {
            Combinator::And => format!("{}and", MARKER),
            Combinator::Or => format!("{}or", MARKER),
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::And => write!(f, "and"),
            Combinator::Or => write!(f, "or"),
        }
    }
}

/// How many elements of a list attribute have to match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListMode {
    #[default]
    MatchAny,
    MatchAll,
}

impl ListMode {
    /// Key used in the compiled filter.
    pub fn key(&self) -> String {
        match self {
            ListMode::MatchAny => format!("{}any", MARKER),
            ListMode::MatchAll => format!("{}all", MARKER),
        }
    }
}

impl fmt::Display for ListMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListMode::MatchAny => write!(f, "match-any"),
            ListMode::MatchAll => write!(f, "match-all"),
        }
    }
}

/// A value as the user entered it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Boolean(bool),
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl RawValue {
    /// Empty text counts as no value at all.
    pub fn is_empty(&self) -> bool {
        matches!(self, RawValue::Text(s) if s.is_empty())
    }

    pub fn as_text(&self) -> String {
        match self {
            RawValue::Boolean(b) => b.to_string(),
            RawValue::Integer(i) => i.to_string(),
            RawValue::Decimal(d) => d.to_string(),
            RawValue::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Integer(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Decimal(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Boolean(value)
    }
}

/// A typed value ready to be placed in a compiled filter
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    String(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
    List(Vec<FilterValue>),
}

impl FilterValue {
    /// JSON rendering of the value.
    ///
    /// Whole decimals are written without a fraction (`30`, not `30.0`) and
    /// non-finite decimals become null, like a JavaScript client would send them.
    pub fn to_json(&self) -> Value {
        match self {
            FilterValue::String(s) => Value::String(s.clone()),
            FilterValue::Integer(i) => Value::from(*i),
            FilterValue::Decimal(d) => {
                if d.fract() == 0.0 && d.abs() <= MAX_SAFE_INTEGER {
                    Value::from(*d as i64)
                } else {
                    Number::from_f64(*d).map(Value::Number).unwrap_or(Value::Null)
                }
            }
            FilterValue::Boolean(b) => Value::Bool(*b),
            FilterValue::List(items) => Value::Array(items.iter().map(|v| v.to_json()).collect()),
        }
    }
}

impl From<&RawValue> for FilterValue {
    fn from(raw: &RawValue) -> Self {
        match raw {
            RawValue::Boolean(b) => FilterValue::Boolean(*b),
            RawValue::Integer(i) => FilterValue::Integer(*i),
            RawValue::Decimal(d) => FilterValue::Decimal(*d),
            RawValue::Text(s) => FilterValue::String(s.clone()),
        }
    }
}

/// One predicate on a sub-field of a list attribute element
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemCondition {
    #[serde(default)]
    pub field: String,
    /// Declared type in the list's sub-schema, when known.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<AttributeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<RawValue>,
}

impl ItemCondition {
    pub fn new(field: &str, operator: Operator, value: impl Into<RawValue>) -> Self {
        Self {
            field: field.to_string(),
            field_type: None,
            operator: Some(operator),
            value: Some(value.into()),
        }
    }

    pub fn with_type(mut self, field_type: AttributeType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    /// Field, operator and value are all present.
    pub fn is_complete(&self) -> bool {
        !self.field.is_empty()
            && self.operator.is_some()
            && self.value.as_ref().is_some_and(|v| !v.is_empty())
    }
}

/// Sub-conditions of a list-type condition
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListClause {
    #[serde(default)]
    pub mode: ListMode,
    #[serde(default)]
    pub logic: Combinator,
    #[serde(default)]
    pub conditions: Vec<ItemCondition>,
}

/// A user-authored predicate on one attribute
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub field: String,
    #[serde(rename = "type", default)]
    pub field_type: AttributeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<ListClause>,
}

impl Condition {
    /// Create a new condition on a string field
    pub fn new(field: &str, operator: Operator, value: impl Into<RawValue>) -> Self {
        Self {
            field: field.to_string(),
            operator: Some(operator),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// Create a condition that carries no value, such as an existence check
    pub fn without_value(field: &str, operator: Operator) -> Self {
        Self {
            field: field.to_string(),
            operator: Some(operator),
            ..Default::default()
        }
    }

    /// Create a condition on a list attribute
    pub fn list(
        field: &str,
        mode: ListMode,
        logic: Combinator,
        conditions: Vec<ItemCondition>,
    ) -> Self {
        Self {
            field: field.to_string(),
            field_type: AttributeType::List,
            list: Some(ListClause {
                mode,
                logic,
                conditions,
            }),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, field_type: AttributeType) -> Self {
        self.field_type = field_type;
        self
    }

    pub fn is_list(&self) -> bool {
        self.field_type == AttributeType::List
    }

    /// Item conditions of a list clause that are complete.
    pub fn complete_items(&self) -> impl Iterator<Item = &ItemCondition> {
        self.list
            .iter()
            .flat_map(|clause| clause.conditions.iter())
            .filter(|item| item.is_complete())
    }

    /// Whether this condition takes part in compilation.
    pub fn is_complete(&self) -> bool {
        if self.field.is_empty() {
            return false;
        }
        if self.is_list() {
            return self.complete_items().next().is_some();
        }
        match self.operator {
            None => false,
            Some(op) if op.is_existence() => true,
            Some(_) => self.value.as_ref().is_some_and(|v| !v.is_empty()),
        }
    }
}

/// The root input of compilation: ordered conditions and how to combine them
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default)]
    pub logic: Combinator,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl FilterSet {
    pub fn new(logic: Combinator) -> Self {
        Self {
            logic,
            conditions: Vec::new(),
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Fills in field types from a list of attributes, matching by name.
    ///
    /// Unknown fields keep whatever type they already carry. Item conditions
    /// of list attributes take the type declared in the list's sub-schema.
    pub fn resolve_types(&mut self, attributes: &[Attribute]) {
        for condition in &mut self.conditions {
            let Some(attribute) = attributes.iter().find(|a| a.is_named(&condition.field)) else {
                log::debug!("No attribute named '{}', keeping declared type", condition.field);
                continue;
            };
            condition.field_type = attribute.attribute_type;

            if let Some(clause) = condition.list.as_mut() {
                for item in &mut clause.conditions {
                    if let Some(sub_type) = attribute.schema_type(&item.field) {
                        item.field_type = Some(sub_type);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_raw_value_deserializes_literals() {
        let values: Vec<RawValue> = serde_json::from_str(r#"[true, 30, 2.5, "Ana"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                RawValue::Boolean(true),
                RawValue::Integer(30),
                RawValue::Decimal(2.5),
                RawValue::Text("Ana".to_string())
            ]
        );
    }

    #[test]
    fn test_raw_value_text_rendering() {
        assert_eq!(RawValue::Decimal(30.0).as_text(), "30");
        assert_eq!(RawValue::Decimal(2.5).as_text(), "2.5");
        assert_eq!(RawValue::Boolean(false).as_text(), "false");
    }

    #[test]
    fn test_decimal_json_rendering() {
        assert_eq!(FilterValue::Decimal(30.0).to_json().to_string(), "30");
        assert_eq!(FilterValue::Decimal(-2.5).to_json().to_string(), "-2.5");
        assert_eq!(FilterValue::Decimal(f64::NAN).to_json(), Value::Null);
    }

    #[test]
    fn test_flat_condition_completeness() {
        assert!(Condition::new("firstName", Operator::Equal, "Ana").is_complete());
        assert!(!Condition::new("", Operator::Equal, "Ana").is_complete());
        assert!(!Condition::new("firstName", Operator::Equal, "").is_complete());
        assert!(!Condition::without_value("firstName", Operator::Equal).is_complete());
        assert!(Condition::without_value("firstName", Operator::Exists).is_complete());

        let mut no_operator = Condition::new("firstName", Operator::Equal, "Ana");
        no_operator.operator = None;
        assert!(!no_operator.is_complete());
    }

    #[test]
    fn test_list_condition_completeness() {
        let empty = Condition::list("data.Orders", ListMode::MatchAny, Combinator::And, vec![]);
        assert!(!empty.is_complete());

        let half_done = Condition::list(
            "data.Orders",
            ListMode::MatchAny,
            Combinator::And,
            vec![ItemCondition::new("color", Operator::Equal, "")],
        );
        assert!(!half_done.is_complete());

        let ready = Condition::list(
            "data.Orders",
            ListMode::MatchAny,
            Combinator::And,
            vec![
                ItemCondition::new("color", Operator::Equal, ""),
                ItemCondition::new("color", Operator::Equal, "red"),
            ],
        );
        assert!(ready.is_complete());
        assert_eq!(ready.complete_items().count(), 1);
    }

    #[test]
    fn test_existence_item_still_needs_value() {
        let item = ItemCondition {
            field: "color".to_string(),
            operator: Some(Operator::Exists),
            ..Default::default()
        };
        assert!(!item.is_complete());
    }

    #[test]
    fn test_resolve_types() {
        let attributes = vec![
            Attribute::new("age", AttributeType::Integer),
            Attribute::list(
                "data\u{1}Orders",
                BTreeMap::from([("total".to_string(), AttributeType::Decimal)]),
            ),
        ];

        let mut set = FilterSet::new(Combinator::And)
            .with_condition(Condition::new("age", Operator::GreaterThan, "30"))
            .with_condition(Condition {
                field: "data.Orders".to_string(),
                list: Some(ListClause {
                    conditions: vec![
                        ItemCondition::new("total", Operator::GreaterThan, "10"),
                        ItemCondition::new("note", Operator::Equal, "x"),
                    ],
                    ..Default::default()
                }),
                ..Default::default()
            })
            .with_condition(Condition::new("unknown", Operator::Equal, "x"));

        set.resolve_types(&attributes);

        assert_eq!(set.conditions[0].field_type, AttributeType::Integer);
        assert_eq!(set.conditions[1].field_type, AttributeType::List);
        let items = &set.conditions[1].list.as_ref().unwrap().conditions;
        assert_eq!(items[0].field_type, Some(AttributeType::Decimal));
        assert_eq!(items[1].field_type, None);
        assert_eq!(set.conditions[2].field_type, AttributeType::String);
    }

    #[test]
    fn test_filter_set_json_shape() {
        let json = r##"{
            "logic": "or",
            "conditions": [
                {"field": "age", "type": "integer", "operator": "gt", "value": 30},
                {"field": "data.Orders", "type": "list", "list": {
                    "mode": "match-all",
                    "conditions": [{"field": "color", "operator": "#eq", "value": "red"}]
                }}
            ]
        }"##;

        let set: FilterSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.logic, Combinator::Or);
        assert_eq!(set.conditions[0].value, Some(RawValue::Integer(30)));
        let clause = set.conditions[1].list.as_ref().unwrap();
        assert_eq!(clause.mode, ListMode::MatchAll);
        assert_eq!(clause.logic, Combinator::And);
    }
}

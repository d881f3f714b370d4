//! Operator catalog: every operator the filter grammar knows and where it applies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::AttributeType;

/// Marker prefixed to every operator and logic key in the filter grammar.
pub const MARKER: char = '#';

const SCALAR: &[AttributeType] = &[
    AttributeType::String,
    AttributeType::Integer,
    AttributeType::Decimal,
    AttributeType::Number,
    AttributeType::Boolean,
    AttributeType::Date,
    AttributeType::DateTime,
    AttributeType::Enum,
];
const TEXTUAL: &[AttributeType] = &[AttributeType::String, AttributeType::Array];
const STRING_ONLY: &[AttributeType] = &[AttributeType::String];
const ORDERED: &[AttributeType] = &[
    AttributeType::Integer,
    AttributeType::Decimal,
    AttributeType::Date,
    AttributeType::DateTime,
    AttributeType::Number,
];
const LISTABLE: &[AttributeType] = &[
    AttributeType::String,
    AttributeType::Integer,
    AttributeType::Decimal,
    AttributeType::Number,
    AttributeType::Date,
    AttributeType::DateTime,
    AttributeType::Enum,
];
const ANY: &[AttributeType] = &AttributeType::ALL;

/// Comparison operators of the filter grammar, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operator {
    Equal,
    NotEqual,
    Contains,
    NotContain,
    StartsWith,
    EndsWith,
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
    In,
    NotIn,
    Exists,
    NotExist,
}

impl Operator {
    pub const ALL: [Operator; 14] = [
        Operator::Equal,
        Operator::NotEqual,
        Operator::Contains,
        Operator::NotContain,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::GreaterThan,
        Operator::GreaterOrEqual,
        Operator::LessThan,
        Operator::LessOrEqual,
        Operator::In,
        Operator::NotIn,
        Operator::Exists,
        Operator::NotExist,
    ];

    /// Operator name without the marker, e.g. `notContain`.
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Equal => "eq",
            Operator::NotEqual => "ne",
            Operator::Contains => "contains",
            Operator::NotContain => "notContain",
            Operator::StartsWith => "startsWith",
            Operator::EndsWith => "endsWith",
            Operator::GreaterThan => "gt",
            Operator::GreaterOrEqual => "gte",
            Operator::LessThan => "lt",
            Operator::LessOrEqual => "lte",
            Operator::In => "in",
            Operator::NotIn => "notIn",
            Operator::Exists => "exists",
            Operator::NotExist => "notExist",
        }
    }

    /// Key used in the compiled filter, e.g. `#notContain`.
    pub fn code(&self) -> String {
        format!("{}{}", MARKER, self.name())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Operator::Equal => "equals",
            Operator::NotEqual => "does not equal",
            Operator::Contains => "contains",
            Operator::NotContain => "does not contain",
            Operator::StartsWith => "starts with",
            Operator::EndsWith => "ends with",
            Operator::GreaterThan => "greater than",
            Operator::GreaterOrEqual => "greater than or equal to",
            Operator::LessThan => "less than",
            Operator::LessOrEqual => "less than or equal to",
            Operator::In => "is one of",
            Operator::NotIn => "is none of",
            Operator::Exists => "exists",
            Operator::NotExist => "does not exist",
        }
    }

    /// Attribute types this operator is generically applicable to.
    pub fn applicable_types(&self) -> &'static [AttributeType] {
        match self {
            Operator::Equal | Operator::NotEqual => SCALAR,
            Operator::Contains | Operator::NotContain => TEXTUAL,
            Operator::StartsWith | Operator::EndsWith => STRING_ONLY,
            Operator::GreaterThan
            | Operator::GreaterOrEqual
            | Operator::LessThan
            | Operator::LessOrEqual => ORDERED,
            Operator::In | Operator::NotIn => LISTABLE,
            Operator::Exists | Operator::NotExist => ANY,
        }
    }

    pub fn applies_to(&self, attribute_type: AttributeType) -> bool {
        self.applicable_types().contains(&attribute_type)
    }

    /// Operators that only test presence and ignore the value.
    pub fn is_existence(&self) -> bool {
        matches!(self, Operator::Exists | Operator::NotExist)
    }

    /// Operators whose value is a comma separated list.
    pub fn is_membership(&self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }

    /// Operators that only make sense on text.
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            Operator::Contains | Operator::NotContain | Operator::StartsWith | Operator::EndsWith
        )
    }

    fn symbol(&self) -> Option<&'static str> {
        match self {
            Operator::Equal => Some("="),
            Operator::NotEqual => Some("!="),
            Operator::GreaterThan => Some(">"),
            Operator::GreaterOrEqual => Some(">="),
            Operator::LessThan => Some("<"),
            Operator::LessOrEqual => Some("<="),
            _ => None,
        }
    }

    /// Looks up an operator by its code, with or without the marker.
    pub fn from_code(code: &str) -> Option<Operator> {
        let name = code.strip_prefix(MARKER).unwrap_or(code);
        Operator::ALL.into_iter().find(|op| op.name() == name)
    }
}

/// Generic catalog lookup: operators applicable to a type, in catalog order.
pub fn applicable_operators(attribute_type: AttributeType) -> Vec<Operator> {
    Operator::ALL
        .into_iter()
        .filter(|op| op.applies_to(attribute_type))
        .collect()
}

/// Error for an operator string that is not in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownOperator(pub String);

impl fmt::Display for UnknownOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = Operator::ALL.iter().map(|op| op.name()).collect();
        write!(
            f,
            "Unknown operator '{}'. Supported: {}",
            self.0,
            known.join(", ")
        )
    }
}

impl std::error::Error for UnknownOperator {}

impl FromStr for Operator {
    type Err = UnknownOperator;

    /// Accepts codes (`#gt`), names (`gt`) and comparison symbols (`>`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Operator::from_code(trimmed)
            .or_else(|| {
                Operator::ALL
                    .into_iter()
                    .find(|op| op.symbol() == Some(trimmed))
            })
            .ok_or_else(|| UnknownOperator(trimmed.to_string()))
    }
}

impl TryFrom<String> for Operator {
    type Error = UnknownOperator;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.name().to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

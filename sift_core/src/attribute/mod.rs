//! Filterable attributes of a person profile

mod defaults;

pub use defaults::standard_attributes;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Reserved separator the People API uses to address list attributes.
pub const LIST_SEPARATOR: char = '\u{1}';

/// Converts a dotted field path into the separator-addressed list field name.
///
/// `data.Orders` becomes `data\u{1}Orders`.
pub fn list_field_name(field: &str) -> String {
    field.replace('.', &LIST_SEPARATOR.to_string())
}

/// The type of a filterable attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    #[default]
    String,
    Integer,
    Decimal,
    Number,
    Boolean,
    Date,
    DateTime,
    Enum,
    Array,
    List,
}

impl AttributeType {
    pub const ALL: [AttributeType; 10] = [
        AttributeType::String,
        AttributeType::Integer,
        AttributeType::Decimal,
        AttributeType::Number,
        AttributeType::Boolean,
        AttributeType::Date,
        AttributeType::DateTime,
        AttributeType::Enum,
        AttributeType::Array,
        AttributeType::List,
    ];

    /// Integer, decimal and number attributes.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            AttributeType::Integer | AttributeType::Decimal | AttributeType::Number
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Integer => "integer",
            AttributeType::Decimal => "decimal",
            AttributeType::Number => "number",
            AttributeType::Boolean => "boolean",
            AttributeType::Date => "date",
            AttributeType::DateTime => "date_time",
            AttributeType::Enum => "enum",
            AttributeType::Array => "array",
            AttributeType::List => "list",
        }
    }

    /// Parses a type label as reported by the remote API.
    ///
    /// Unknown labels are treated as strings, which keeps them filterable.
    pub fn from_remote(label: &str) -> Self {
        label.parse().unwrap_or(AttributeType::String)
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AttributeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "string" | "text" => Ok(AttributeType::String),
            "integer" | "int" | "long" => Ok(AttributeType::Integer),
            "decimal" | "double" | "float" => Ok(AttributeType::Decimal),
            "number" => Ok(AttributeType::Number),
            "boolean" | "bool" => Ok(AttributeType::Boolean),
            "date" => Ok(AttributeType::Date),
            "date_time" | "datetime" => Ok(AttributeType::DateTime),
            "enum" => Ok(AttributeType::Enum),
            "array" => Ok(AttributeType::Array),
            "list" | "list_of_objects" => Ok(AttributeType::List),
            other => Err(format!("Unknown attribute type '{}'", other)),
        }
    }
}

/// A filterable field of a person profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enum_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schema: Option<BTreeMap<String, AttributeType>>,
}

impl Attribute {
    /// Creates a plain attribute. Use [`Attribute::enumeration`] or
    /// [`Attribute::list`] for the types that carry extra shape.
    pub fn new(name: &str, attribute_type: AttributeType) -> Self {
        Self {
            name: name.to_string(),
            attribute_type,
            is_custom: false,
            enum_values: None,
            schema: None,
        }
    }

    /// Creates an enum attribute with its closed set of legal values.
    pub fn enumeration(name: &str, values: &[&str]) -> Self {
        Self {
            enum_values: Some(values.iter().map(|v| v.to_string()).collect()),
            ..Self::new(name, AttributeType::Enum)
        }
    }

    /// Creates a list attribute whose elements follow the given sub-schema.
    pub fn list(name: &str, schema: BTreeMap<String, AttributeType>) -> Self {
        Self {
            schema: Some(schema),
            ..Self::new(name, AttributeType::List)
        }
    }

    pub fn custom(mut self) -> Self {
        self.is_custom = true;
        self
    }

    /// Legal values, only for enum attributes.
    pub fn enum_values(&self) -> Option<&[String]> {
        match self.attribute_type {
            AttributeType::Enum => self.enum_values.as_deref(),
            _ => None,
        }
    }

    /// Element shape, only for list attributes.
    pub fn schema(&self) -> Option<&BTreeMap<String, AttributeType>> {
        match self.attribute_type {
            AttributeType::List => self.schema.as_ref(),
            _ => None,
        }
    }

    /// Declared type of a sub-field of a list attribute.
    pub fn schema_type(&self, sub_field: &str) -> Option<AttributeType> {
        self.schema().and_then(|s| s.get(sub_field).copied())
    }

    /// Whether this attribute is addressed by `field` (dots and separators are interchangeable).
    pub fn is_named(&self, field: &str) -> bool {
        list_field_name(&self.name) == list_field_name(field)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.replace(LIST_SEPARATOR, ".");
        if self.is_custom {
            write!(f, "{} ({}, custom)", name, self.attribute_type)
        } else {
            write!(f, "{} ({})", name, self.attribute_type)
        }
    }
}

//! Core data structures for building People API profile filters.
//!
//! - [`attribute`]: filterable attributes and the built-in standard set
//! - [`filter`]: operator catalog, value coercion and the filter compiler

pub mod attribute;
pub mod filter;

pub use attribute::{Attribute, AttributeType, LIST_SEPARATOR, list_field_name};

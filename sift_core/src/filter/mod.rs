//! Filter building: operator catalog, value coercion and compilation
//!
//! A [`FilterSet`] is compiled into the nested JSON structure the People API
//! expects, with operators and logic keys prefixed by [`MARKER`]:
//!
//! ```
//! use sift_core::AttributeType;
//! use sift_core::filter::{compile, Condition, FilterSet, Operator};
//!
//! let set = FilterSet::default()
//!     .with_condition(Condition::new("age", Operator::GreaterThan, "30").with_type(AttributeType::Integer));
//!
//! assert_eq!(compile(&set).raw, r##"{"#gt":{"age":30}}"##);
//! ```

mod coerce;
mod compile;
mod narrowing;
mod operator;
mod path;
mod types;

pub use coerce::{coerce, coerce_list, coerce_scalar};
pub use compile::{CompiledFilter, compile, compile_root, encode};
pub use narrowing::{NARROWING_RULES, Narrowing, NarrowingRule, operators_for};
pub use operator::{MARKER, Operator, UnknownOperator, applicable_operators};
pub use path::{field_node, nest};
pub use types::*;

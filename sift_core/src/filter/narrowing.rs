//! Per-field narrowing of operator choices
//!
//! The generic catalog lookup is followed by an ordered list of override
//! rules. Every matching rule is applied in turn, so later rules see the
//! result of earlier ones.

use super::operator::{Operator, applicable_operators};
use crate::{Attribute, AttributeType};

/// What a narrowing rule does to the current operator choices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Narrowing {
    /// Replace the choices with exactly these operators (catalog order).
    Only(&'static [Operator]),
    /// Remove these operators from the choices.
    Exclude(&'static [Operator]),
}

/// An override rule applied after the generic type lookup.
#[derive(Debug, Clone, Copy)]
pub struct NarrowingRule {
    pub name: &'static str,
    pub applies: fn(&Attribute) -> bool,
    pub narrowing: Narrowing,
}

impl NarrowingRule {
    fn apply(&self, operators: Vec<Operator>) -> Vec<Operator> {
        match self.narrowing {
            Narrowing::Only(allowed) => Operator::ALL
                .into_iter()
                .filter(|op| allowed.contains(op))
                .collect(),
            Narrowing::Exclude(excluded) => operators
                .into_iter()
                .filter(|op| !excluded.contains(op))
                .collect(),
        }
    }
}

/// Override rules in application order.
pub const NARROWING_RULES: [NarrowingRule; 4] = [
    NarrowingRule {
        name: "list attributes take no top-level operator",
        applies: |attribute| attribute.attribute_type == AttributeType::List,
        narrowing: Narrowing::Only(&[]),
    },
    NarrowingRule {
        name: "tags only support containment",
        applies: |attribute| attribute.name == "tags",
        narrowing: Narrowing::Only(&[Operator::Contains, Operator::NotContain]),
    },
    NarrowingRule {
        name: "enums only support equality",
        applies: |attribute| attribute.attribute_type == AttributeType::Enum,
        narrowing: Narrowing::Only(&[Operator::Equal, Operator::NotEqual]),
    },
    NarrowingRule {
        name: "numbers never get text operators",
        applies: |attribute| attribute.attribute_type.is_numeric(),
        narrowing: Narrowing::Exclude(&[
            Operator::Contains,
            Operator::NotContain,
            Operator::StartsWith,
            Operator::EndsWith,
        ]),
    },
];

/// Operators to offer for an attribute: generic lookup, then every matching override.
pub fn operators_for(attribute: &Attribute) -> Vec<Operator> {
    NARROWING_RULES
        .iter()
        .filter(|rule| (rule.applies)(attribute))
        .fold(applicable_operators(attribute.attribute_type), |ops, rule| {
            log::trace!("Narrowing '{}': {}", attribute.name, rule.name);
            rule.apply(ops)
        })
}
